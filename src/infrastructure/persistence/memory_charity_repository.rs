//! Process-memory implementation of the charity repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Category, Charity, NewCharity};
use crate::domain::repositories::CharityRepository;
use crate::error::AppError;

/// Charity store backed by a vector in insertion order.
///
/// Contents are rebuilt on every process start; nothing is persisted.
#[derive(Default)]
pub struct InMemoryCharityRepository {
    charities: RwLock<Vec<Charity>>,
}

impl InMemoryCharityRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `seed`, assigning fresh ids.
    pub fn with_seed(seed: impl IntoIterator<Item = NewCharity>) -> Self {
        let charities = seed
            .into_iter()
            .map(|new| Charity::from_new(Uuid::new_v4().to_string(), new))
            .collect();

        Self {
            charities: RwLock::new(charities),
        }
    }
}

#[async_trait]
impl CharityRepository for InMemoryCharityRepository {
    async fn all(&self) -> Result<Vec<Charity>, AppError> {
        Ok(self.charities.read().await.clone())
    }

    async fn by_category(&self, category: Category) -> Result<Vec<Charity>, AppError> {
        Ok(self
            .charities
            .read()
            .await
            .iter()
            .filter(|c| c.category == category)
            .cloned()
            .collect())
    }

    async fn search(&self, needle: &str) -> Result<Vec<Charity>, AppError> {
        Ok(self
            .charities
            .read()
            .await
            .iter()
            .filter(|c| c.matches(needle))
            .cloned()
            .collect())
    }

    async fn insert(&self, new_charity: NewCharity) -> Result<Charity, AppError> {
        let charity = Charity::from_new(Uuid::new_v4().to_string(), new_charity);

        self.charities.write().await.push(charity.clone());

        Ok(charity)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.charities.read().await.len())
    }
}

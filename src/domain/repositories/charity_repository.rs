//! Repository trait for charity data access.

use crate::domain::entities::{Category, Charity, NewCharity};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the charity directory.
///
/// All listing operations return records in insertion order.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryCharityRepository`] - process-memory store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharityRepository: Send + Sync {
    /// Returns every stored charity.
    async fn all(&self) -> Result<Vec<Charity>, AppError>;

    /// Returns the charities listed under `category`.
    async fn by_category(&self, category: Category) -> Result<Vec<Charity>, AppError>;

    /// Returns charities whose name, description or focus area contains
    /// `needle`.
    ///
    /// `needle` is already lowercased and non-empty.
    async fn search(&self, needle: &str) -> Result<Vec<Charity>, AppError>;

    /// Appends a new charity and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be written.
    async fn insert(&self, new_charity: NewCharity) -> Result<Charity, AppError>;

    /// Number of stored charities.
    async fn count(&self) -> Result<usize, AppError>;
}

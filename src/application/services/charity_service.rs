//! Charity directory service.

use std::sync::Arc;

use serde_json::json;
use validator::Validate;

use crate::domain::entities::{Category, Charity, NewCharity};
use crate::domain::repositories::CharityRepository;
use crate::error::AppError;

/// Service for listing, searching and adding directory entries.
pub struct CharityService<R: CharityRepository> {
    repository: Arc<R>,
}

impl<R: CharityRepository> CharityService<R> {
    /// Creates a new charity service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every charity in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Charity>, AppError> {
        self.repository.all().await
    }

    /// Returns the charities of a category.
    ///
    /// An unknown category name yields an empty list rather than an error.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Charity>, AppError> {
        match category.parse::<Category>() {
            Ok(category) => self.repository.by_category(category).await,
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Case-insensitive search across name, description and focus area.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `term` is empty or whitespace.
    pub async fn search(&self, term: &str) -> Result<Vec<Charity>, AppError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::bad_request(
                "Search query is required",
                json!({ "fields": { "q": ["q must not be empty"] } }),
            ));
        }

        self.repository.search(&term.to_lowercase()).await
    }

    /// Validates and stores a new charity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages if any text
    /// field is empty or the website is not an HTTP(S) URL. The store is left
    /// untouched in that case.
    pub async fn create(&self, new_charity: NewCharity) -> Result<Charity, AppError> {
        new_charity.validate()?;

        let charity = self.repository.insert(new_charity).await?;
        tracing::info!(id = %charity.id, category = %charity.category, "Charity created");

        Ok(charity)
    }

    /// Number of charities in the directory.
    pub async fn count(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }
}

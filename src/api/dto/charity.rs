//! DTOs for the charity directory endpoints.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::entities::{Category, Charity, NewCharity};
use crate::error::AppError;

/// A charity as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharityItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub website: String,
    pub category: Category,
    pub focus_area: String,
    pub featured: bool,
}

impl From<Charity> for CharityItem {
    fn from(c: Charity) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            website: c.website,
            category: c.category,
            focus_area: c.focus_area,
            featured: c.featured,
        }
    }
}

/// Request body for `POST /charities`.
///
/// Fields are optional at the serde level so that a missing field is reported
/// per field instead of as an opaque body rejection.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharityRequest {
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,

    #[validate(required(message = "description is required"))]
    pub description: Option<String>,

    #[validate(required(message = "website is required"))]
    pub website: Option<String>,

    #[validate(required(message = "category is required"))]
    pub category: Option<String>,

    #[validate(required(message = "focusArea is required"))]
    pub focus_area: Option<String>,

    pub featured: Option<bool>,
}

impl CreateCharityRequest {
    /// Checks every field and builds the insert payload. Text fields are
    /// trimmed before the content checks of [`NewCharity`] run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming every missing or malformed
    /// field. Fields that were sent are checked even when others are missing.
    pub fn into_new_charity(self) -> Result<NewCharity, AppError> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let category = match self.category.as_deref().map(str::parse::<Category>) {
            Some(Ok(category)) => Some(category),
            Some(Err(_)) => {
                errors.add("category", unknown_category());
                None
            }
            None => None,
        };

        let trimmed = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();
        let candidate = NewCharity {
            name: trimmed(&self.name),
            description: trimmed(&self.description),
            website: trimmed(&self.website),
            category: category.unwrap_or(Category::Muslim),
            focus_area: trimmed(&self.focus_area),
            featured: self.featured.unwrap_or(false),
        };

        // missing fields already carry a "required" error
        if let Err(content_errors) = candidate.validate() {
            let fields = content_errors.field_errors();
            let sent = [
                ("name", self.name.is_some()),
                ("description", self.description.is_some()),
                ("website", self.website.is_some()),
                ("focus_area", self.focus_area.is_some()),
            ];

            for (field, _) in sent.into_iter().filter(|(_, sent)| *sent) {
                for error in fields.get(field).into_iter().flat_map(|errs| errs.iter()) {
                    errors.add(field, error.clone());
                }
            }
        }

        if errors.is_empty() {
            Ok(candidate)
        } else {
            Err(errors.into())
        }
    }
}

fn unknown_category() -> ValidationError {
    let names = Category::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    ValidationError::new("category").with_message(format!("category must be one of {names}").into())
}

/// Query string for `GET /charities/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_request() -> CreateCharityRequest {
        serde_json::from_value(json!({
            "name": "  Gaza Relief  ",
            "description": "Emergency aid",
            "website": "https://example.org",
            "category": "gaza",
            "focusArea": "Emergency Relief"
        }))
        .unwrap()
    }

    #[test]
    fn test_complete_request_builds_new_charity() {
        let new = full_request().into_new_charity().unwrap();

        assert_eq!(new.name, "Gaza Relief");
        assert_eq!(new.category, Category::Gaza);
        assert_eq!(new.focus_area, "Emergency Relief");
        assert!(!new.featured);
    }

    #[test]
    fn test_missing_fields_are_named() {
        let request: CreateCharityRequest =
            serde_json::from_value(json!({ "name": "Only a name" })).unwrap();

        let err = request.into_new_charity().unwrap_err();
        let info = err.to_error_info();
        let fields = &info.details["fields"];

        assert_eq!(info.code, "validation_error");
        assert!(fields.get("focusArea").is_some());
        assert!(fields.get("website").is_some());
        assert!(fields.get("name").is_none());
    }

    #[test]
    fn test_missing_and_malformed_fields_reported_together() {
        let request: CreateCharityRequest = serde_json::from_value(json!({
            "description": "Emergency aid",
            "website": "ftp://example.org",
            "category": "gaza",
            "focusArea": "   "
        }))
        .unwrap();

        let err = request.into_new_charity().unwrap_err();
        let fields = &err.to_error_info().details["fields"];

        assert_eq!(fields["name"].as_array().map(Vec::len), Some(1));
        assert!(fields["website"].is_array());
        assert!(fields["focusArea"].is_array());
        assert!(fields.get("description").is_none());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let mut request = full_request();
        request.category = Some("sports".to_string());

        let err = request.into_new_charity().unwrap_err();
        let details = err.to_error_info().details;

        assert!(
            details["fields"]["category"][0]
                .as_str()
                .unwrap()
                .contains("muslim")
        );
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = CharityItem {
            id: "1".to_string(),
            name: "n".to_string(),
            description: "d".to_string(),
            website: "https://example.org".to_string(),
            category: Category::Medical,
            focus_area: "f".to_string(),
            featured: true,
        };

        let value = serde_json::to_value(item).unwrap();
        assert_eq!(value["focusArea"], "f");
        assert_eq!(value["category"], "medical");
    }
}

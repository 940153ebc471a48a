//! Charity entity and its category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::website::validate_website;

/// Directory category a charity is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Muslim,
    International,
    Gaza,
    Medical,
    Education,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Muslim,
        Category::International,
        Category::Gaza,
        Category::Medical,
        Category::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Muslim => "muslim",
            Category::International => "international",
            Category::Gaza => "gaza",
            Category::Medical => "medical",
            Category::Education => "education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A charity listed in the directory.
///
/// Records are never modified after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Charity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub website: String,
    pub category: Category,
    pub focus_area: String,
    pub featured: bool,
}

impl Charity {
    /// Builds a stored record from validated input and a freshly assigned id.
    pub fn from_new(id: String, new: NewCharity) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            website: new.website,
            category: new.category,
            focus_area: new.focus_area,
            featured: new.featured,
        }
    }

    /// Case-insensitive substring match on name, description and focus area.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.focus_area.to_lowercase().contains(needle)
    }
}

/// Input data for inserting a charity.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewCharity {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,

    #[validate(custom(function = "validate_website"))]
    pub website: String,

    pub category: Category,

    #[validate(length(min = 1, message = "focusArea must not be empty"))]
    pub focus_area: String,

    pub featured: bool,
}

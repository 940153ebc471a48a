//! Utility functions shared across layers.
//!
//! - [`website`] - Website URL validation for charity records

pub mod website;

//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Charity`] - A directory listing
//! - [`NewCharity`] - Validated input for inserting a listing
//! - [`Category`] - The fixed set of directory categories

pub mod charity;

pub use charity::{Category, Charity, NewCharity, UnknownCategory};

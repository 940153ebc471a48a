//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod charities;
pub mod health;
pub mod not_found;

pub use charities::{
    charities_by_category_handler, create_charity_handler, list_charities_handler,
    search_charities_handler,
};
pub use health::health_handler;
pub use not_found::{not_found_handler, route_not_found};

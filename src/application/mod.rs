//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::charity_service::CharityService`] - Directory listing, search and inserts

pub mod services;

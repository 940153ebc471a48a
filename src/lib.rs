//! # Charity Directory
//!
//! A small directory of charities served over HTTP, guarded by a layered
//! request-admission stack. Built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Charity entity and repository trait
//! - **Application Layer** ([`application`]) - Directory service
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store and seed data
//! - **Security** ([`security`]) - Client identity, rate limiting, abuse heuristics
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - List, filter, search and add charities
//! - Keyed client identities; raw addresses never reach the logs
//! - Fixed-window rate limiting with exponential penalty
//! - Honeypot paths, burst detection and tarpit delays
//! - Security headers per deployment mode
//!
//! ## Quick Start
//!
//! ```bash
//! export IP_HASH_SECRET="change-me"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod security;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::CharityService;
    pub use crate::domain::entities::{Category, Charity, NewCharity};
    pub use crate::error::AppError;
    pub use crate::security::{Clock, ManualClock, SystemClock};
    pub use crate::state::AppState;
}

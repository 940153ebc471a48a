//! Repository implementations.
//!
//! # Repositories
//!
//! - [`InMemoryCharityRepository`] - Charity directory held in process memory
//!
//! [`seed`] holds the listings loaded at startup.

pub mod memory_charity_repository;
pub mod seed;

pub use memory_charity_repository::InMemoryCharityRepository;
pub use seed::seed_charities;

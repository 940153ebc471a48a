//! Infrastructure layer.
//!
//! Implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - In-memory repository implementations and seed data

pub mod persistence;

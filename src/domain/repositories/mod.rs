//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod charity_repository;

pub use charity_repository::CharityRepository;

#[cfg(test)]
pub use charity_repository::MockCharityRepository;

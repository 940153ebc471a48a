//! Business logic services for the application layer.

pub mod charity_service;

pub use charity_service::CharityService;

//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::MappingStore`] trait and give HTTP
//! handlers and the admin CLI one place for validation and collision policy.
//!
//! # Available Services
//!
//! - [`mapping_service::MappingService`] - Short link creation and resolution

pub mod mapping_service;

pub use mapping_service::MappingService;

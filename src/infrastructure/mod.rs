//! Infrastructure layer for external integrations.
//!
//! Implements the [`crate::domain::MappingStore`] contract against concrete
//! backends.
//!
//! # Modules
//!
//! - [`store`] - In-memory, Redis and PostgreSQL mapping stores

pub mod store;

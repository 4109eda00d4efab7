//! Domain layer: the mapping entity and the store contract.
//!
//! # Architecture
//!
//! - [`mapping`] - The [`Mapping`] entity (slug → target)
//! - [`store`] - The [`MappingStore`] trait consumed by the application layer
//!
//! The domain layer knows nothing about HTTP or concrete backends. Store
//! implementations live in [`crate::infrastructure::store`].

pub mod mapping;
pub mod store;

pub use mapping::Mapping;
pub use store::{MappingStore, PutOutcome, StoreError};

#[cfg(test)]
pub use store::MockMappingStore;

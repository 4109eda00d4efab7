//! Data Transfer Objects for request and response serialization.

pub mod create;
pub mod health;

pub use create::{CreateMappingForm, CreateMappingResponse};
pub use health::{CheckStatus, HealthChecks, HealthResponse};

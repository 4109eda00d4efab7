//! # Hexlinks
//!
//! A small URL shortener built with Axum: long links go in, 4-character
//! slugs come out, and `GET /{slug}` answers with a permanent redirect.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::Mapping`] entity and the
//!   [`domain::MappingStore`] contract
//! - **Application Layer** ([`application`]) - Validation and slug collision policy
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory, Redis and PostgreSQL stores
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! # In-memory store, nothing else needed
//! cargo run
//!
//! # Durable store
//! export STORE_BACKEND=redis
//! export REDIS_URL="redis://localhost:6379"
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
    pub use crate::application::MappingService;
    pub use crate::domain::{Mapping, MappingStore, PutOutcome, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::MemoryStore;
    pub use crate::state::AppState;
}

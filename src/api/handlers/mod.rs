//! HTTP request handlers.
//!
//! Each handler module corresponds to one route.

pub mod create;
pub mod health;
pub mod home;
pub mod redirect;

pub use create::create_mapping_handler;
pub use health::health_handler;
pub use home::home_handler;
pub use redirect::{new_path_redirect_handler, redirect_handler};

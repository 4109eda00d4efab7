//! Utility functions for slug generation and URL handling.
//!
//! - [`slug`] - Slug generation and length check
//! - [`url_validator`] - Target URL validation and `Location` header building

pub mod slug;
pub mod url_validator;

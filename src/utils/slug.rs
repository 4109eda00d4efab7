//! Slug generation and validation.
//!
//! Slugs are 4 characters of URL-safe base64 (`A-Z a-z 0-9 - _`) encoding
//! 3 bytes from the operating system's CSPRNG.

use base64::Engine as _;

/// Number of characters in every slug.
pub const SLUG_LENGTH: usize = 4;

/// Random bytes consumed per slug. 3 bytes encode to exactly 4 base64 characters.
const SLUG_BYTES: usize = 3;

/// Generates a random slug.
///
/// Uniqueness is not checked here; the caller resolves collisions against
/// the store.
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug()?;
/// assert_eq!(slug.len(), 4);
/// ```
pub fn generate_slug() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; SLUG_BYTES];

    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `slug` has the exact slug length.
///
/// Length is counted in characters, so multi-byte input is judged by what
/// the client typed rather than by its UTF-8 size.
pub fn is_valid_slug(slug: &str) -> bool {
    slug.chars().count() == SLUG_LENGTH
}

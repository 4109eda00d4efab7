//! Mapping entity representing a shortened URL.

use chrono::{DateTime, Duration, Utc};

/// An association between a slug and the URL it redirects to.
///
/// Mappings are immutable once stored. `expires_at` is only set when the
/// service runs with a mapping TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub slug: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Mapping {
    /// Creates a mapping stamped with the current time.
    ///
    /// When `ttl` is given, `expires_at` is `created_at + ttl`. An expiry past
    /// the last representable timestamp is treated as no expiry.
    pub fn new(slug: String, target: String, ttl: Option<Duration>) -> Self {
        let created_at = Utc::now();

        Self {
            slug,
            target,
            created_at,
            expires_at: ttl.and_then(|ttl| created_at.checked_add_signed(ttl)),
        }
    }

    /// Returns true if the mapping has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

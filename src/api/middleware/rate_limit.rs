//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Token bucket parameters for a rate-limited route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// Seconds between token refills.
    pub replenish_seconds: u64,
    pub burst_size: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            replenish_seconds: 2,
            burst_size: 100,
        }
    }
}

/// Creates a per-IP rate limiter for write endpoints.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// Returns `None` if either setting is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/new", post(create_mapping_handler))
///     .layer(rate_limit::layer(RateLimitSettings::default()).unwrap());
/// ```
pub fn layer(
    settings: RateLimitSettings,
) -> Option<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(settings.replenish_seconds)
            .burst_size(settings.burst_size)
            .finish()?,
    );

    Some(GovernorLayer::new(governor_conf))
}

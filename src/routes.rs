//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`           - Submission form
//! - `POST /new`        - Create a mapping (rate limited per IP)
//! - `GET  /new`        - Slug lookup for the literal path `new` (always 400)
//! - `GET  /api/health` - Health check
//! - `GET  /{slug}`     - Redirect to the stored target
//!
//! Every other single-segment path is a slug lookup, which is why the
//! health check lives under a two-segment path.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `POST /new`

use crate::api::handlers::{
    create_mapping_handler, health_handler, home_handler, new_path_redirect_handler,
    redirect_handler,
};
use crate::api::middleware::rate_limit::{self, RateLimitSettings};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - token bucket for `POST /new`; `None` disables limiting.
///   The limiter keys on the peer address, so the router must be served
///   with `ConnectInfo<SocketAddr>` when this is set
pub fn app_router(state: AppState, rate_limit: Option<RateLimitSettings>) -> Router {
    let mut create_routes = Router::new().route("/new", post(create_mapping_handler));

    if let Some(settings) = rate_limit {
        match rate_limit::layer(settings) {
            Some(layer) => create_routes = create_routes.layer(layer),
            None => ::tracing::warn!("Invalid rate limit settings {:?}, limiter disabled", settings),
        }
    }

    Router::new()
        .route("/", get(home_handler))
        .route("/api/health", get(health_handler))
        .route("/new", get(new_path_redirect_handler))
        .route("/{slug}", get(redirect_handler))
        .merge(create_routes)
        .with_state(state)
        .layer(tracing::layer())
}

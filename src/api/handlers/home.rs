//! Handler for the landing page.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Serves the static submission form.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

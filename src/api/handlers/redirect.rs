//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::location_header;

/// Redirects a slug to its target URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Errors
///
/// - 400 Bad Request if the slug is not exactly 4 characters
/// - 404 Not Found if no mapping exists
/// - 500 Internal Server Error if the store fails
///
/// On success returns `301 Moved Permanently` with `Location` set to the
/// stored target.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    redirect(&state, slug).await
}

/// `GET /new`.
///
/// `/new` is registered for `POST`, so lookups of that path land here
/// instead of [`redirect_handler`] and get the same answer as any other
/// slug: `400 Bad Request`, since `new` is not a valid slug.
pub async fn new_path_redirect_handler(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    redirect(&state, "new".to_string()).await
}

async fn redirect(state: &AppState, slug: String) -> Result<Response, AppError> {
    let target = state.mapping_service.resolve(&slug).await?;

    let location = location_header(&target).ok_or_else(|| {
        AppError::internal(
            "Stored target is not a valid redirect location",
            json!({ "slug": slug }),
        )
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

//! Handler for the create-mapping endpoint.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::warn;

use crate::api::dto::{CreateMappingForm, CreateMappingResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a mapping for a long URL.
///
/// # Endpoint
///
/// `POST /new`
///
/// # Request Body
///
/// `application/x-www-form-urlencoded`:
///
/// ```text
/// url=https%3A%2F%2Fexample.com
/// ```
///
/// # Response
///
/// `201 Created` with `Location: /{slug}`:
///
/// ```json
/// {
///   "slug": "Xk_3",
///   "target": "https://example.com",
///   "short_url": "http://localhost:8080/Xk_3"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is missing, not form-encoded, or has no `url`
/// - 422 Unprocessable Entity if `url` is not an absolute URL, contains control
///   characters or uses a blocked scheme (`javascript:`, `data:`, ...)
/// - 500 Internal Server Error if the store fails
pub async fn create_mapping_handler(
    State(state): State<AppState>,
    form: Result<Form<CreateMappingForm>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Form(form) = form.map_err(|rejection| {
        let reason = rejection.body_text();
        warn!("Rejected create request: {}", reason);
        AppError::bad_request(
            "Spell, Hex, requires a target",
            json!({ "reason": reason }),
        )
    })?;

    let long_url = form.url.ok_or_else(|| {
        warn!("Rejected create request without url field");
        AppError::bad_request("Spell, Hex, requires a target", json!({ "field": "url" }))
    })?;

    let mapping = state.mapping_service.create_mapping(&long_url).await?;

    let location = format!("/{}", mapping.slug);
    let body = CreateMappingResponse {
        short_url: state.mapping_service.short_url(&mapping.slug),
        slug: mapping.slug,
        target: mapping.target,
    };

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)))
}

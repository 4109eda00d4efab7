//! DTOs for the create-mapping endpoint.

use serde::{Deserialize, Serialize};

/// Form body of `POST /new`.
///
/// The canonical content type is `application/x-www-form-urlencoded`.
/// The field is optional so a missing value surfaces as 400 rather than
/// a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateMappingForm {
    #[serde(alias = "URL")]
    pub url: Option<String>,
}

/// Response for a newly created mapping.
#[derive(Debug, Serialize)]
pub struct CreateMappingResponse {
    pub slug: String,
    pub target: String,
    pub short_url: String,
}

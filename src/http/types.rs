use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Validation outcome for a create payload, rendered as a 400 whose body is
/// a field → message JSON object.
#[derive(Debug)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl IntoResponse for FieldErrors {
    fn into_response(self) -> Response { (StatusCode::BAD_REQUEST, axum::Json(self.0)).into_response() }
}

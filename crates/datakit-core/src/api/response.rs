//! Normalization of transport results into `Result<Value, ApiError>`.

use serde_json::Value;
use tracing::warn;

use super::transport::{ResponseBody, TransportResponse};
use super::{ApiError, TransportError};

/// Parse a response body into JSON.
///
/// Structured bodies pass through unchanged; text bodies must parse.
pub(crate) fn parse_body(body: ResponseBody) -> Result<Value, ApiError> {
    match body {
        ResponseBody::Json(value) => Ok(value),
        ResponseBody::Text(text) => serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, bytes = text.len(), "Response body is not valid JSON");
            ApiError::body_parse(e, &text)
        }),
    }
}

fn body_text(body: &ResponseBody) -> String {
    match body {
        ResponseBody::Json(value) => value.to_string(),
        ResponseBody::Text(text) => text.clone(),
    }
}

/// Normalize the outcome of a collection fetch.
pub(crate) fn normalize(
    result: Result<TransportResponse, TransportError>,
) -> Result<Value, ApiError> {
    let response = result?;
    if !response.is_success() {
        return Err(ApiError::from_status(response.status, &body_text(&response.body)));
    }
    parse_body(response.body)
}

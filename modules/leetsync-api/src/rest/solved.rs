use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tracing::{info, warn};

use leetsync_core::ResponseFormat;

use crate::error::ApiError;
use crate::AppState;

/// Request body fields, read leniently: a field of the wrong type is treated
/// as absent rather than failing the request.
#[derive(Debug, Default)]
pub struct SolvedRequest {
    pub username: Option<String>,
    pub response_format: Option<String>,
    pub include_full_history: Option<bool>,
}

impl SolvedRequest {
    /// Anything that isn't a JSON object parses to an empty request, which
    /// then fails the username check.
    pub fn parse(body: &[u8]) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        Self {
            username: fields.get("username").and_then(Value::as_str).map(String::from),
            response_format: fields
                .get("responseFormat")
                .and_then(Value::as_str)
                .map(String::from),
            include_full_history: fields.get("includeFullHistory").and_then(Value::as_bool),
        }
    }

    /// Trimmed, non-empty username.
    pub fn username(&self) -> Result<&str, ApiError> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ApiError::MissingUsername)
    }

    /// Older clients send neither flag and expect a bare array.
    pub fn format(&self) -> ResponseFormat {
        if self.response_format.as_deref() == Some("v2") || self.include_full_history == Some(true) {
            ResponseFormat::V2
        } else {
            ResponseFormat::Legacy
        }
    }
}

pub async fn api_solved(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let request = SolvedRequest::parse(&body);
    let username = request.username()?;
    let format = request.format();
    info!(username, ?format, "Solved problems requested");

    match state.aggregator.solved(username, format).await {
        Ok(response) => Ok(Json(response).into_response()),
        Err(e) => {
            warn!(username, error = %e, "Failed to fetch recent submissions");
            Err(ApiError::Upstream(e))
        }
    }
}

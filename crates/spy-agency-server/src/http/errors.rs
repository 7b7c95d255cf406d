// SPDX-License-Identifier: Apache-2.0

use crate::middleware::timeout::enter_store_stage;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use spy_agency_api::error_mapping::map_error;
use spy_agency_api::{ApiError, ApiErrorCode, ApiErrorEnvelope};
use spy_agency_model::AgencyError;
use spy_agency_store::AgencyStore;
use tracing::{debug, error};

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(
            code = err.code.as_str(),
            request_id = %err.request_id,
            message = %err.message,
            "request failed"
        );
    } else {
        debug!(
            code = err.code.as_str(),
            request_id = %err.request_id,
            message = %err.message,
            "request rejected"
        );
    }
    (status, Json(ApiErrorEnvelope::from(err))).into_response()
}

pub(crate) fn respond(result: Result<Response, ApiError>, request_id: String) -> Response {
    result.unwrap_or_else(|err| api_error_response(err.with_request_id(request_id)))
}

pub(crate) fn decode_json<T: DeserializeOwned>(
    body: Result<Bytes, BytesRejection>,
) -> Result<T, ApiError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(
                ApiErrorCode::PayloadTooLarge,
                "request body exceeds limit",
                json!({"reason": rejection.body_text()}),
                "req-unknown",
            )
        } else {
            ApiError::malformed_body(&rejection.body_text())
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::malformed_body(&e.to_string()))
}

pub(crate) fn parse_id(name: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::invalid_path_param(name, raw))
}

/// Runs a store call on the blocking pool. Once started, the call runs to
/// completion and its outcome is what the client sees, even past the request
/// deadline.
pub(crate) async fn run_store<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AgencyStore) -> Result<T, AgencyError> + Send + 'static,
{
    enter_store_stage();
    let store = state.store.clone();
    let out = tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| AgencyError::internal(format!("store task failed: {e}")))?;
    Ok(out?)
}

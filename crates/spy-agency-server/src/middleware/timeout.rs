// SPDX-License-Identifier: Apache-2.0

use super::normalized_header_value;
use crate::http::errors::api_error_response;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use serde_json::json;
use spy_agency_api::{ApiError, ApiErrorCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

tokio::task_local! {
    static STORE_STAGE: Arc<AtomicBool>;
}

/// Records that the current request has handed work to the store. From then
/// on the deadline no longer cancels the request.
pub(crate) fn enter_store_stage() {
    let _ = STORE_STAGE.try_with(|stage| stage.store(true, Ordering::SeqCst));
}

pub(crate) async fn timeout_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let request_id = normalized_header_value(req.headers(), "x-request-id", 128)
        .unwrap_or_else(|| "req-unknown".to_string());
    let limit = state.api.request_timeout;
    let stage = Arc::new(AtomicBool::new(false));
    let handler = STORE_STAGE.scope(Arc::clone(&stage), next.run(req));
    tokio::pin!(handler);

    tokio::select! {
        resp = &mut handler => resp,
        () = tokio::time::sleep(limit) => {
            let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            if stage.load(Ordering::SeqCst) {
                warn!(
                    request_id = %request_id,
                    timeout_ms,
                    "deadline passed during store call, awaiting its outcome"
                );
                return handler.await;
            }
            warn!(request_id = %request_id, timeout_ms, "request timed out");
            api_error_response(ApiError::new(
                ApiErrorCode::Timeout,
                "request timed out",
                json!({"timeout_ms": timeout_ms}),
                request_id,
            ))
        }
    }
}

// SPDX-License-Identifier: Apache-2.0

use super::normalized_header_value;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::info;

pub(crate) async fn audit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.api.enable_audit_log {
        return next.run(req).await;
    }
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id =
        normalized_header_value(req.headers(), "x-request-id", 128).unwrap_or_default();
    let resp = next.run(req).await;
    info!(
        target: "agency_audit",
        method = %method,
        path = %path,
        status = resp.status().as_u16(),
        request_id = %request_id,
        latency_ms = started.elapsed().as_millis() as u64,
        "audit"
    );
    resp
}

// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::http::HeaderMap;
use std::sync::atomic::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestTrace {
    pub request_id: String,
    pub correlation_id: Option<String>,
}

fn header_value(headers: &HeaderMap, key: &str) -> Option<String> {
    headers
        .get(key)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(ToString::to_string)
}

#[must_use]
pub(crate) fn extract_request_trace(headers: &HeaderMap, state: &AppState) -> RequestTrace {
    let request_id = header_value(headers, "x-request-id").unwrap_or_else(|| {
        let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    });

    RequestTrace {
        request_id,
        correlation_id: header_value(headers, "x-correlation-id"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BreedCache, FakeBreedCatalog};
    use axum::http::HeaderValue;
    use spy_agency_store::{AgencyStore, StoreConfig};
    use std::sync::Arc;
    use std::time::Duration;

    fn state(dir: &tempfile::TempDir) -> AppState {
        let store = AgencyStore::open(dir.path().join("agency.sqlite"), StoreConfig::default())
            .expect("store");
        let breeds = BreedCache::new(
            Arc::new(FakeBreedCatalog::default()),
            Duration::from_secs(60),
        );
        AppState::new(store, Arc::new(breeds))
    }

    #[test]
    fn extracts_request_trace_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state(&dir);
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-abc"));
        headers.insert("x-correlation-id", HeaderValue::from_static("corr-1"));

        let trace = extract_request_trace(&headers, &state);
        assert_eq!(trace.request_id, "req-abc");
        assert_eq!(trace.correlation_id.as_deref(), Some("corr-1"));
    }

    #[test]
    fn generates_sequential_ids_when_header_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state(&dir);
        let headers = HeaderMap::new();
        let first = extract_request_trace(&headers, &state).request_id;
        let second = extract_request_trace(&headers, &state).request_id;
        assert_eq!(first, "req-0000000000000001");
        assert_eq!(second, "req-0000000000000002");
    }
}

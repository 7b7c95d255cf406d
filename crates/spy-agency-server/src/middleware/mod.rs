// SPDX-License-Identifier: Apache-2.0

pub(crate) mod audit;
pub(crate) mod cors;
pub(crate) mod request_tracing;
pub(crate) mod timeout;

use axum::http::HeaderMap;

pub(crate) fn normalized_header_value(
    headers: &HeaderMap,
    key: &str,
    max_len: usize,
) -> Option<String> {
    let raw = headers.get(key)?.to_str().ok()?.trim();
    if raw.is_empty() || raw.len() > max_len {
        return None;
    }
    Some(raw.to_string())
}

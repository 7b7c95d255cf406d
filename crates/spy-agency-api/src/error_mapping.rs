// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

pub const API_ERROR_SCHEMA_REF: &str = "#/components/schemas/ApiErrorEnvelope";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
    pub schema_ref: &'static str,
}

/// Business-rule conflicts share 400 with validation failures; upstream
/// catalog failures surface as 500.
#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::InvalidInput | ApiErrorCode::Conflict | ApiErrorCode::MalformedBody => 400,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::PayloadTooLarge => 413,
        ApiErrorCode::Timeout => 504,
        _ => 500,
    };

    ApiErrorMapping {
        status_code,
        schema_ref: API_ERROR_SCHEMA_REF,
    }
}

// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use spy_agency_model::{AgencyError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidInput,
    NotFound,
    Conflict,
    DependencyUnavailable,
    MalformedBody,
    PayloadTooLarge,
    Timeout,
    Internal,
}

impl ApiErrorCode {
    pub const ALL: [Self; 8] = [
        Self::InvalidInput,
        Self::NotFound,
        Self::Conflict,
        Self::DependencyUnavailable,
        Self::MalformedBody,
        Self::PayloadTooLarge,
        Self::Timeout,
        Self::Internal,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInput",
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::DependencyUnavailable => "DependencyUnavailable",
            Self::MalformedBody => "MalformedBody",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::Timeout => "Timeout",
            Self::Internal => "Internal",
        }
    }
}

impl From<ErrorKind> for ApiErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::InvalidInput => Self::InvalidInput,
            ErrorKind::Conflict => Self::Conflict,
            ErrorKind::DependencyUnavailable => Self::DependencyUnavailable,
            _ => Self::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn from_agency(err: &AgencyError, request_id: impl Into<String>) -> Self {
        let details: Map<String, Value> = err
            .details
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Self::new(
            err.kind.into(),
            err.message.clone(),
            Value::Object(details),
            request_id,
        )
    }

    #[must_use]
    pub fn malformed_body(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::MalformedBody,
            "request body could not be parsed",
            json!({"reason": reason}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_path_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidInput,
            format!("invalid path parameter: {name}"),
            json!({"parameter": name, "value": value}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }
}

impl From<AgencyError> for ApiError {
    fn from(err: AgencyError) -> Self {
        Self::from_agency(&err, "req-unknown")
    }
}

/// Wire shape of every error response: `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiErrorEnvelope {
    pub error: ApiError,
}

impl From<ApiError> for ApiErrorEnvelope {
    fn from(error: ApiError) -> Self {
        Self { error }
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
    assert_traits::<ApiErrorEnvelope>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agency_error_details_become_json_object() {
        let err = AgencyError::not_found("mission", 7).with_detail("scope", "assign");
        let api = ApiError::from_agency(&err, "req-1");
        assert_eq!(api.code, ApiErrorCode::NotFound);
        assert_eq!(api.message, "mission not found");
        assert_eq!(api.details["id"], "7");
        assert_eq!(api.details["scope"], "assign");
        assert_eq!(api.request_id, "req-1");
    }

    #[test]
    fn error_code_serializes_as_variant_name() {
        for code in ApiErrorCode::ALL {
            let value = serde_json::to_value(code).expect("serialize code");
            assert_eq!(value, Value::String(code.as_str().to_string()));
        }
    }

    #[test]
    fn envelope_wraps_error_under_error_key() {
        let env = ApiErrorEnvelope::from(ApiError::malformed_body("eof").with_request_id("req-9"));
        let value = serde_json::to_value(&env).expect("serialize");
        assert_eq!(value["error"]["code"], "MalformedBody");
        assert_eq!(value["error"]["request_id"], "req-9");
        assert_eq!(value["error"]["details"]["reason"], "eof");
    }
}

use serde_json::json;
use spy_agency_api::error_mapping::{map_error, API_ERROR_SCHEMA_REF};
use spy_agency_api::{ApiError, ApiErrorCode};
use spy_agency_model::AgencyError;

fn status_for(code: ApiErrorCode) -> u16 {
    map_error(&ApiError::new(code, "x", json!({}), "req-1")).status_code
}

#[test]
fn api_error_mapping_is_centralized_and_stable() {
    assert_eq!(status_for(ApiErrorCode::InvalidInput), 400);
    assert_eq!(status_for(ApiErrorCode::Conflict), 400);
    assert_eq!(status_for(ApiErrorCode::MalformedBody), 400);
    assert_eq!(status_for(ApiErrorCode::NotFound), 404);
    assert_eq!(status_for(ApiErrorCode::PayloadTooLarge), 413);
    assert_eq!(status_for(ApiErrorCode::Timeout), 504);
    assert_eq!(status_for(ApiErrorCode::DependencyUnavailable), 500);
    assert_eq!(status_for(ApiErrorCode::Internal), 500);

    let mapped = map_error(&ApiError::malformed_body("eof"));
    assert_eq!(mapped.schema_ref, API_ERROR_SCHEMA_REF);
}

#[test]
fn agency_errors_keep_their_status_family() {
    let cases = [
        (AgencyError::not_found("spy cat", 1), 404),
        (AgencyError::invalid_input("salary cannot be negative"), 400),
        (AgencyError::conflict("spy cat already has an active mission"), 400),
        (AgencyError::dependency_unavailable("breed catalog unreachable"), 500),
        (AgencyError::internal("database error"), 500),
    ];
    for (err, status) in cases {
        let api = ApiError::from_agency(&err, "req-2");
        assert_eq!(map_error(&api).status_code, status, "{err}");
    }
}

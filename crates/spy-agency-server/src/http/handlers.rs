// SPDX-License-Identifier: Apache-2.0

use axum::response::IntoResponse;
use axum::Json;
use spy_agency_api::{openapi_v1_spec, ServiceInfoDto, SERVICE_TITLE};

pub(crate) async fn landing_handler() -> impl IntoResponse {
    Json(ServiceInfoDto {
        message: format!("{SERVICE_TITLE} API"),
    })
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    "ok"
}

pub(crate) async fn openapi_handler() -> impl IntoResponse {
    Json(openapi_v1_spec())
}

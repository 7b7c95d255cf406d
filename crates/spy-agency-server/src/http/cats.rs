// SPDX-License-Identifier: Apache-2.0

use super::errors::{decode_json, parse_id, respond, run_store};
use super::request_tracing::extract_request_trace;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use spy_agency_api::{ApiError, CreateSpyCatRequest, SpyCatDto, UpdateSalaryRequest};
use spy_agency_model::CatId;

pub(crate) async fn create_spy_cat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let req: CreateSpyCatRequest = decode_json(body)?;
        let new = req.into_model();
        new.validate()?;
        state.breeds.validate_breed(&new.breed).await?;
        let cat = run_store(&state, move |store| store.create_spy_cat(&new)).await?;
        Ok((StatusCode::CREATED, Json(SpyCatDto::from(&cat))).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn list_spy_cats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let cats = run_store(&state, |store| store.list_spy_cats()).await?;
        let dtos: Vec<SpyCatDto> = cats.iter().map(SpyCatDto::from).collect();
        Ok(Json(dtos).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn get_spy_cat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let id = CatId::new(parse_id("cat_id", &raw_id)?);
        let cat = run_store(&state, move |store| store.get_spy_cat(id)).await?;
        Ok(Json(SpyCatDto::from(&cat)).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn update_salary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let id = CatId::new(parse_id("cat_id", &raw_id)?);
        let req: UpdateSalaryRequest = decode_json(body)?;
        let cat = run_store(&state, move |store| {
            store.update_spy_cat_salary(id, req.salary)
        })
        .await?;
        Ok(Json(SpyCatDto::from(&cat)).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn delete_spy_cat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let id = CatId::new(parse_id("cat_id", &raw_id)?);
        run_store(&state, move |store| store.delete_spy_cat(id)).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
    .await;
    respond(result, trace.request_id)
}

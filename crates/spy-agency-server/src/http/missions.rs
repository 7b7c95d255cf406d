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
use spy_agency_api::{
    ApiError, AssignCatRequest, CreateMissionRequest, MissionDto, TargetDto,
    UpdateTargetsRequest,
};
use spy_agency_model::{CatId, MissionId, TargetId};

pub(crate) async fn create_mission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let req: CreateMissionRequest = decode_json(body)?;
        let new = req.into_model();
        let mission = run_store(&state, move |store| store.create_mission(&new)).await?;
        Ok((StatusCode::CREATED, Json(MissionDto::from(&mission))).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn list_missions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let missions = run_store(&state, |store| store.list_missions()).await?;
        let dtos: Vec<MissionDto> = missions.iter().map(MissionDto::from).collect();
        Ok(Json(dtos).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn get_mission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let id = MissionId::new(parse_id("mission_id", &raw_id)?);
        let mission = run_store(&state, move |store| store.get_mission(id)).await?;
        Ok(Json(MissionDto::from(&mission)).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn update_targets_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let id = MissionId::new(parse_id("mission_id", &raw_id)?);
        let req: UpdateTargetsRequest = decode_json(body)?;
        let updates = req.into_model();
        let mission = run_store(&state, move |store| {
            store.update_mission_targets(id, &updates)
        })
        .await?;
        Ok(Json(MissionDto::from(&mission)).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn complete_target_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let id = TargetId::new(parse_id("target_id", &raw_id)?);
        let target = run_store(&state, move |store| store.complete_target(id)).await?;
        Ok(Json(TargetDto::from(&target)).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn assign_cat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let id = MissionId::new(parse_id("mission_id", &raw_id)?);
        let req: AssignCatRequest = decode_json(body)?;
        let cat_id = CatId::new(req.cat_id);
        let mission = run_store(&state, move |store| store.assign_cat(id, cat_id)).await?;
        Ok(Json(MissionDto::from(&mission)).into_response())
    }
    .await;
    respond(result, trace.request_id)
}

pub(crate) async fn delete_mission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let trace = extract_request_trace(&headers, &state);
    let result: Result<Response, ApiError> = async {
        let id = MissionId::new(parse_id("mission_id", &raw_id)?);
        run_store(&state, move |store| store.delete_mission(id)).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
    .await;
    respond(result, trace.request_id)
}

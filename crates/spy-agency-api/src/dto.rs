// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use spy_agency_model::CompleteState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSpyCatRequest {
    pub name: String,
    pub years_of_experience: i64,
    pub breed: String,
    pub salary: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSalaryRequest {
    pub salary: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTargetRequest {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMissionRequest {
    #[serde(default)]
    pub spy_cat_id: Option<i64>,
    pub targets: Vec<CreateTargetRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetNotesRequest {
    pub id: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTargetsRequest {
    pub targets: Vec<TargetNotesRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignCatRequest {
    pub cat_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetDto {
    pub id: i64,
    pub mission_id: i64,
    pub name: String,
    pub country: String,
    pub notes: Option<String>,
    pub complete_state: CompleteState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissionDto {
    pub id: i64,
    pub complete_state: CompleteState,
    pub spy_cat_id: Option<i64>,
    pub targets: Vec<TargetDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpyCatDto {
    pub id: i64,
    pub name: String,
    pub years_of_experience: i64,
    pub breed: String,
    pub salary: i64,
    pub missions: Vec<MissionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceInfoDto {
    pub message: String,
}

// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod convert;
pub mod dto;
pub mod error_mapping;
mod errors;
pub mod openapi;

pub use dto::{
    AssignCatRequest, CreateMissionRequest, CreateSpyCatRequest, CreateTargetRequest,
    MissionDto, ServiceInfoDto, SpyCatDto, TargetDto, TargetNotesRequest, UpdateSalaryRequest,
    UpdateTargetsRequest,
};
pub use errors::{ApiError, ApiErrorCode, ApiErrorEnvelope};
pub use openapi::openapi_v1_spec;

pub const CRATE_NAME: &str = "spy-agency-api";
pub const SERVICE_TITLE: &str = "Spy Cat Agency";

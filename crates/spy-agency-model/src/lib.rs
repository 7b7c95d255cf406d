// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Spy cat agency model SSOT.
//!
//! Value objects are always fully populated: a [`SpyCat`] carries its
//! missions and a [`Mission`] carries its targets.

mod cat;
mod error;
mod ids;
mod mission;
pub mod rules;
mod state;

pub use cat::{NewSpyCat, SpyCat, BREED_MAX_LEN, CAT_NAME_MAX_LEN};
pub use error::{AgencyError, ErrorKind, FieldError};
pub use ids::{CatId, MissionId, TargetId};
pub use mission::{
    Mission, NewMission, NewTarget, Target, TargetNotesUpdate, COUNTRY_MAX_LEN, MAX_TARGETS,
    MIN_TARGETS, NOTES_MAX_LEN, TARGET_NAME_MAX_LEN,
};
pub use state::CompleteState;

pub const CRATE_NAME: &str = "spy-agency-model";

pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Empty(field));
    }
    if value.chars().count() > max_len {
        return Err(FieldError::TooLong(field, max_len));
    }
    Ok(())
}

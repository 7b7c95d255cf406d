// SPDX-License-Identifier: Apache-2.0

use crate::{check_text, rules, AgencyError, CatId, CompleteState, FieldError, MissionId, TargetId};
use serde::{Deserialize, Serialize};

pub const TARGET_NAME_MAX_LEN: usize = 255;
pub const COUNTRY_MAX_LEN: usize = 255;
pub const NOTES_MAX_LEN: usize = 2047;
pub const MIN_TARGETS: usize = 1;
pub const MAX_TARGETS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub mission_id: MissionId,
    pub name: String,
    pub country: String,
    pub notes: Option<String>,
    pub complete_state: CompleteState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub complete_state: CompleteState,
    pub spy_cat_id: Option<CatId>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Mission {
    #[must_use]
    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTarget {
    pub name: String,
    pub country: String,
    pub notes: Option<String>,
}

impl NewTarget {
    pub fn validate(&self) -> Result<(), AgencyError> {
        check_text("name", &self.name, TARGET_NAME_MAX_LEN)?;
        check_text("country", &self.country, COUNTRY_MAX_LEN)?;
        check_notes(self.notes.as_deref())?;
        Ok(())
    }
}

/// Mission and its targets, created together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMission {
    pub spy_cat_id: Option<CatId>,
    pub targets: Vec<NewTarget>,
}

impl NewMission {
    pub fn validate(&self) -> Result<(), AgencyError> {
        rules::validate_target_count(&self.targets)?;
        self.targets.iter().try_for_each(NewTarget::validate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetNotesUpdate {
    pub target_id: TargetId,
    pub notes: Option<String>,
}

impl TargetNotesUpdate {
    pub fn validate(&self) -> Result<(), AgencyError> {
        check_notes(self.notes.as_deref())?;
        Ok(())
    }
}

fn check_notes(notes: Option<&str>) -> Result<(), FieldError> {
    match notes {
        Some(n) if n.chars().count() > NOTES_MAX_LEN => {
            Err(FieldError::TooLong("notes", NOTES_MAX_LEN))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn target(name: &str) -> NewTarget {
        NewTarget {
            name: name.to_string(),
            country: "France".to_string(),
            notes: None,
        }
    }

    #[test]
    fn new_mission_requires_valid_targets() {
        let mission = NewMission {
            spy_cat_id: None,
            targets: vec![target("A"), target("")],
        };
        let err = mission.validate().expect_err("empty target name");
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.details.get("field").map(String::as_str), Some("name"));
    }

    #[test]
    fn notes_are_optional_but_bounded() {
        let mut t = target("A");
        assert!(t.validate().is_ok());
        t.notes = Some("n".repeat(NOTES_MAX_LEN));
        assert!(t.validate().is_ok());
        t.notes = Some("n".repeat(NOTES_MAX_LEN + 1));
        assert!(t.validate().is_err());
    }

    #[test]
    fn mission_serializes_with_wire_field_names() {
        let mission = Mission {
            id: MissionId::new(7),
            complete_state: CompleteState::InProgress,
            spy_cat_id: None,
            targets: vec![Target {
                id: TargetId::new(1),
                mission_id: MissionId::new(7),
                name: "A".to_string(),
                country: "France".to_string(),
                notes: None,
                complete_state: CompleteState::Completed,
            }],
        };
        let value = serde_json::to_value(&mission).expect("serialize");
        assert_eq!(value["id"], 7);
        assert_eq!(value["complete_state"], "in_progress");
        assert!(value["spy_cat_id"].is_null());
        assert_eq!(value["targets"][0]["complete_state"], "completed");
        assert_eq!(value["targets"][0]["mission_id"], 7);
    }
}

// SPDX-License-Identifier: Apache-2.0

//! Stateless business rules. Callers load the records they check inside the
//! same store transaction that performs the write.

use crate::{
    AgencyError, CompleteState, FieldError, Mission, SpyCat, Target, MAX_TARGETS, MIN_TARGETS,
};

pub fn validate_salary(amount: i64) -> Result<(), AgencyError> {
    if amount < 0 {
        return Err(FieldError::Negative("salary").into());
    }
    Ok(())
}

pub fn validate_years_of_experience(years: i64) -> Result<(), AgencyError> {
    if years < 0 {
        return Err(FieldError::Negative("years_of_experience").into());
    }
    Ok(())
}

pub fn validate_target_count<T>(targets: &[T]) -> Result<(), AgencyError> {
    let count = targets.len();
    if !(MIN_TARGETS..=MAX_TARGETS).contains(&count) {
        return Err(AgencyError::invalid_input(format!(
            "a mission must have between {MIN_TARGETS} and {MAX_TARGETS} targets"
        ))
        .with_detail("target_count", &count.to_string()));
    }
    Ok(())
}

pub fn validate_cat_assignable(cat: &SpyCat) -> Result<(), AgencyError> {
    if let Some(active) = cat.active_mission() {
        return Err(
            AgencyError::conflict("spy cat already has an active mission")
                .with_detail("spy_cat_id", &cat.id.to_string())
                .with_detail("mission_id", &active.id.to_string()),
        );
    }
    Ok(())
}

pub fn validate_target_mutable(target: &Target) -> Result<(), AgencyError> {
    if target.complete_state.is_completed() {
        return Err(AgencyError::conflict("target is already completed")
            .with_detail("target_id", &target.id.to_string()));
    }
    Ok(())
}

pub fn validate_mission_deletable(mission: &Mission) -> Result<(), AgencyError> {
    if let Some(cat_id) = mission.spy_cat_id {
        return Err(
            AgencyError::conflict("mission is assigned to a spy cat and cannot be deleted")
                .with_detail("mission_id", &mission.id.to_string())
                .with_detail("spy_cat_id", &cat_id.to_string()),
        );
    }
    Ok(())
}

/// Mission state derived from the full set of its targets.
#[must_use]
pub fn mission_state_for(targets: &[Target]) -> CompleteState {
    if !targets.is_empty() && targets.iter().all(|t| t.complete_state.is_completed()) {
        CompleteState::Completed
    } else {
        CompleteState::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatId, ErrorKind, MissionId, TargetId};

    fn target(id: i64, state: CompleteState) -> Target {
        Target {
            id: TargetId::new(id),
            mission_id: MissionId::new(1),
            name: format!("t{id}"),
            country: "Spain".to_string(),
            notes: None,
            complete_state: state,
        }
    }

    fn mission(spy_cat_id: Option<i64>, state: CompleteState) -> Mission {
        Mission {
            id: MissionId::new(1),
            complete_state: state,
            spy_cat_id: spy_cat_id.map(CatId::new),
            targets: vec![target(1, state)],
        }
    }

    fn cat(missions: Vec<Mission>) -> SpyCat {
        SpyCat {
            id: CatId::new(9),
            name: "Felix".to_string(),
            years_of_experience: 2,
            breed: "Bengal".to_string(),
            salary: 10,
            missions,
        }
    }

    #[test]
    fn salary_zero_is_allowed() {
        assert!(validate_salary(0).is_ok());
        assert_eq!(
            validate_salary(-5).expect_err("negative").kind,
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn target_count_bounds() {
        assert!(validate_target_count::<u8>(&[]).is_err());
        assert!(validate_target_count(&[1]).is_ok());
        assert!(validate_target_count(&[1, 2, 3]).is_ok());
        let err = validate_target_count(&[1, 2, 3, 4]).expect_err("four targets");
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(
            err.details.get("target_count").map(String::as_str),
            Some("4")
        );
    }

    #[test]
    fn cat_with_active_mission_is_not_assignable() {
        let busy = cat(vec![mission(Some(9), CompleteState::InProgress)]);
        assert_eq!(
            validate_cat_assignable(&busy).expect_err("busy cat").kind,
            ErrorKind::Conflict
        );
        let free = cat(vec![mission(Some(9), CompleteState::Completed)]);
        assert!(validate_cat_assignable(&free).is_ok());
        assert!(validate_cat_assignable(&cat(Vec::new())).is_ok());
    }

    #[test]
    fn completed_target_is_locked() {
        assert!(validate_target_mutable(&target(1, CompleteState::InProgress)).is_ok());
        assert_eq!(
            validate_target_mutable(&target(1, CompleteState::Completed))
                .expect_err("locked")
                .kind,
            ErrorKind::Conflict
        );
    }

    #[test]
    fn assigned_mission_is_not_deletable() {
        assert!(validate_mission_deletable(&mission(None, CompleteState::InProgress)).is_ok());
        assert_eq!(
            validate_mission_deletable(&mission(Some(3), CompleteState::Completed))
                .expect_err("assigned")
                .kind,
            ErrorKind::Conflict
        );
    }

    #[test]
    fn mission_completes_only_when_every_target_completes() {
        let partial = [
            target(1, CompleteState::Completed),
            target(2, CompleteState::InProgress),
        ];
        assert_eq!(mission_state_for(&partial), CompleteState::InProgress);
        let done = [
            target(1, CompleteState::Completed),
            target(2, CompleteState::Completed),
        ];
        assert_eq!(mission_state_for(&done), CompleteState::Completed);
        assert_eq!(mission_state_for(&[]), CompleteState::InProgress);
    }
}

// SPDX-License-Identifier: Apache-2.0

use crate::rows::{mission_from_row, target_from_row, MISSION_COLUMNS, TARGET_COLUMNS};
use crate::{cats, db_error, AgencyStore};
use rusqlite::{params, Connection, OptionalExtension};
use spy_agency_model::rules::{
    mission_state_for, validate_cat_assignable, validate_mission_deletable,
    validate_target_mutable,
};
use spy_agency_model::{
    AgencyError, CatId, CompleteState, Mission, MissionId, NewMission, Target, TargetId,
    TargetNotesUpdate,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub(crate) fn load_mission(
    conn: &Connection,
    id: MissionId,
) -> Result<Option<Mission>, AgencyError> {
    let mission = conn
        .query_row(
            &format!("SELECT {MISSION_COLUMNS} FROM mission WHERE id = ?1"),
            params![id.get()],
            mission_from_row,
        )
        .optional()
        .map_err(db_error)?;
    let Some(mut mission) = mission else {
        return Ok(None);
    };
    mission.targets = load_targets(conn, id)?;
    Ok(Some(mission))
}

pub(crate) fn require_mission(conn: &Connection, id: MissionId) -> Result<Mission, AgencyError> {
    load_mission(conn, id)?.ok_or_else(|| AgencyError::not_found("mission", id))
}

/// Missions with their targets, optionally restricted to one cat, ordered by id.
pub(crate) fn load_missions(
    conn: &Connection,
    spy_cat_id: Option<CatId>,
) -> Result<Vec<Mission>, AgencyError> {
    let (mission_sql, target_sql) = match spy_cat_id {
        Some(_) => (
            format!("SELECT {MISSION_COLUMNS} FROM mission WHERE spy_cat_id = ?1 ORDER BY id"),
            format!(
                "SELECT {TARGET_COLUMNS} FROM target
                 WHERE mission_id IN (SELECT id FROM mission WHERE spy_cat_id = ?1)
                 ORDER BY mission_id, id"
            ),
        ),
        None => (
            format!("SELECT {MISSION_COLUMNS} FROM mission ORDER BY id"),
            format!("SELECT {TARGET_COLUMNS} FROM target ORDER BY mission_id, id"),
        ),
    };
    let bind: Vec<i64> = spy_cat_id.map(CatId::get).into_iter().collect();

    let mut stmt = conn.prepare(&mission_sql).map_err(db_error)?;
    let mut missions = stmt
        .query_map(rusqlite::params_from_iter(bind.iter()), mission_from_row)
        .map_err(db_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(db_error)?;

    let mut stmt = conn.prepare(&target_sql).map_err(db_error)?;
    let mut by_mission: BTreeMap<MissionId, Vec<Target>> = BTreeMap::new();
    for target in stmt
        .query_map(rusqlite::params_from_iter(bind.iter()), target_from_row)
        .map_err(db_error)?
    {
        let target = target.map_err(db_error)?;
        by_mission.entry(target.mission_id).or_default().push(target);
    }
    for mission in &mut missions {
        mission.targets = by_mission.remove(&mission.id).unwrap_or_default();
    }
    Ok(missions)
}

fn load_targets(conn: &Connection, mission_id: MissionId) -> Result<Vec<Target>, AgencyError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {TARGET_COLUMNS} FROM target WHERE mission_id = ?1 ORDER BY id"
        ))
        .map_err(db_error)?;
    let rows = stmt
        .query_map(params![mission_id.get()], target_from_row)
        .map_err(db_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(db_error)?;
    Ok(rows)
}

fn require_target(conn: &Connection, id: TargetId) -> Result<Target, AgencyError> {
    conn.query_row(
        &format!("SELECT {TARGET_COLUMNS} FROM target WHERE id = ?1"),
        params![id.get()],
        target_from_row,
    )
    .optional()
    .map_err(db_error)?
    .ok_or_else(|| AgencyError::not_found("target", id))
}

fn write_notes(conn: &Connection, target: &Target, notes: Option<&str>) -> Result<(), AgencyError> {
    validate_target_mutable(target)?;
    let changed = conn
        .execute(
            "UPDATE target SET notes = ?1 WHERE id = ?2 AND complete_state = 'in_progress'",
            params![notes, target.id.get()],
        )
        .map_err(db_error)?;
    if changed == 0 {
        return Err(AgencyError::conflict("target is already completed")
            .with_detail("target_id", &target.id.to_string()));
    }
    Ok(())
}

impl AgencyStore {
    pub fn create_mission(&self, new: &NewMission) -> Result<Mission, AgencyError> {
        new.validate()?;
        self.write(|tx| {
            if let Some(cat_id) = new.spy_cat_id {
                let cat = cats::require_cat(tx, cat_id)?;
                validate_cat_assignable(&cat)?;
            }
            tx.execute(
                "INSERT INTO mission (complete_state, spy_cat_id) VALUES (?1, ?2)",
                params![
                    CompleteState::InProgress.as_str(),
                    new.spy_cat_id.map(CatId::get)
                ],
            )
            .map_err(db_error)?;
            let mission_id = MissionId::new(tx.last_insert_rowid());
            let mut stmt = tx
                .prepare(
                    "INSERT INTO target (name, country, notes, complete_state, mission_id)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(db_error)?;
            for target in &new.targets {
                stmt.execute(params![
                    target.name,
                    target.country,
                    target.notes,
                    CompleteState::InProgress.as_str(),
                    mission_id.get()
                ])
                .map_err(db_error)?;
            }
            info!(
                mission_id = %mission_id,
                target_count = new.targets.len(),
                spy_cat_id = ?new.spy_cat_id.map(CatId::get),
                "mission created"
            );
            require_mission(tx, mission_id)
        })
    }

    pub fn list_missions(&self) -> Result<Vec<Mission>, AgencyError> {
        self.read(|conn| load_missions(conn, None))
    }

    pub fn get_mission(&self, id: MissionId) -> Result<Mission, AgencyError> {
        self.read(|conn| require_mission(conn, id))
    }

    /// Overwrites the notes of one target; name and country stay immutable.
    pub fn update_target_notes(
        &self,
        target_id: TargetId,
        notes: Option<String>,
    ) -> Result<Target, AgencyError> {
        let update = TargetNotesUpdate { target_id, notes };
        update.validate()?;
        self.write(|tx| {
            let target = require_target(tx, target_id)?;
            write_notes(tx, &target, update.notes.as_deref())?;
            require_target(tx, target_id)
        })
    }

    /// Bulk notes update scoped to one mission. Every listed target must
    /// belong to the mission and still be in progress, otherwise nothing is
    /// written.
    pub fn update_mission_targets(
        &self,
        mission_id: MissionId,
        updates: &[TargetNotesUpdate],
    ) -> Result<Mission, AgencyError> {
        updates.iter().try_for_each(TargetNotesUpdate::validate)?;
        self.write(|tx| {
            let mission = require_mission(tx, mission_id)?;
            for update in updates {
                let target = mission.target(update.target_id).ok_or_else(|| {
                    AgencyError::not_found("target", update.target_id)
                        .with_detail("mission_id", &mission_id.to_string())
                })?;
                write_notes(tx, target, update.notes.as_deref())?;
            }
            debug!(mission_id = %mission_id, updated = updates.len(), "target notes updated");
            require_mission(tx, mission_id)
        })
    }

    /// Marks a target completed and completes its mission once every sibling
    /// target is completed. Siblings are re-read after the write.
    pub fn complete_target(&self, target_id: TargetId) -> Result<Target, AgencyError> {
        self.write(|tx| {
            let target = require_target(tx, target_id)?;
            validate_target_mutable(&target)?;
            let changed = tx
                .execute(
                    "UPDATE target SET complete_state = 'completed'
                     WHERE id = ?1 AND complete_state = 'in_progress'",
                    params![target_id.get()],
                )
                .map_err(db_error)?;
            if changed == 0 {
                return Err(AgencyError::conflict("target is already completed")
                    .with_detail("target_id", &target_id.to_string()));
            }

            let siblings = load_targets(tx, target.mission_id)?;
            if mission_state_for(&siblings) == CompleteState::Completed {
                tx.execute(
                    "UPDATE mission SET complete_state = 'completed' WHERE id = ?1",
                    params![target.mission_id.get()],
                )
                .map_err(db_error)?;
                info!(mission_id = %target.mission_id, "mission completed");
            }
            info!(target_id = %target_id, mission_id = %target.mission_id, "target completed");
            siblings
                .into_iter()
                .find(|t| t.id == target_id)
                .ok_or_else(|| AgencyError::not_found("target", target_id))
        })
    }

    /// One-time assignment. The conditional update only links a mission that
    /// has no cat yet.
    pub fn assign_cat(&self, mission_id: MissionId, cat_id: CatId) -> Result<Mission, AgencyError> {
        self.write(|tx| {
            let mission = require_mission(tx, mission_id)?;
            if let Some(existing) = mission.spy_cat_id {
                return Err(
                    AgencyError::conflict("mission is already assigned to a spy cat")
                        .with_detail("mission_id", &mission_id.to_string())
                        .with_detail("spy_cat_id", &existing.to_string()),
                );
            }
            let cat = cats::require_cat(tx, cat_id)?;
            validate_cat_assignable(&cat)?;
            let changed = tx
                .execute(
                    "UPDATE mission SET spy_cat_id = ?1 WHERE id = ?2 AND spy_cat_id IS NULL",
                    params![cat_id.get(), mission_id.get()],
                )
                .map_err(db_error)?;
            if changed == 0 {
                return Err(AgencyError::conflict("mission is already assigned to a spy cat")
                    .with_detail("mission_id", &mission_id.to_string()));
            }
            info!(mission_id = %mission_id, spy_cat_id = %cat_id, "spy cat assigned");
            require_mission(tx, mission_id)
        })
    }

    pub fn delete_mission(&self, id: MissionId) -> Result<(), AgencyError> {
        self.write(|tx| {
            let mission = require_mission(tx, id)?;
            validate_mission_deletable(&mission)?;
            let changed = tx
                .execute(
                    "DELETE FROM mission WHERE id = ?1 AND spy_cat_id IS NULL",
                    params![id.get()],
                )
                .map_err(db_error)?;
            if changed == 0 {
                return Err(AgencyError::conflict(
                    "mission is assigned to a spy cat and cannot be deleted",
                ));
            }
            info!(mission_id = %id, targets = mission.targets.len(), "mission deleted");
            Ok(())
        })
    }
}

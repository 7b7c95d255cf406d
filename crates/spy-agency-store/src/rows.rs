// SPDX-License-Identifier: Apache-2.0

use rusqlite::types::Type;
use rusqlite::Row;
use spy_agency_model::{CatId, CompleteState, Mission, MissionId, SpyCat, Target, TargetId};

pub(crate) const CAT_COLUMNS: &str = "id, name, years_of_experience, breed, salary";
pub(crate) const MISSION_COLUMNS: &str = "id, complete_state, spy_cat_id";
pub(crate) const TARGET_COLUMNS: &str = "id, mission_id, name, country, notes, complete_state";

fn complete_state(row: &Row<'_>, idx: usize) -> rusqlite::Result<CompleteState> {
    let raw: String = row.get(idx)?;
    CompleteState::parse(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn cat_from_row(row: &Row<'_>) -> rusqlite::Result<SpyCat> {
    Ok(SpyCat {
        id: CatId::new(row.get(0)?),
        name: row.get(1)?,
        years_of_experience: row.get(2)?,
        breed: row.get(3)?,
        salary: row.get(4)?,
        missions: Vec::new(),
    })
}

pub(crate) fn mission_from_row(row: &Row<'_>) -> rusqlite::Result<Mission> {
    Ok(Mission {
        id: MissionId::new(row.get(0)?),
        complete_state: complete_state(row, 1)?,
        spy_cat_id: row.get::<_, Option<i64>>(2)?.map(CatId::new),
        targets: Vec::new(),
    })
}

pub(crate) fn target_from_row(row: &Row<'_>) -> rusqlite::Result<Target> {
    Ok(Target {
        id: TargetId::new(row.get(0)?),
        mission_id: MissionId::new(row.get(1)?),
        name: row.get(2)?,
        country: row.get(3)?,
        notes: row.get(4)?,
        complete_state: complete_state(row, 5)?,
    })
}

// SPDX-License-Identifier: Apache-2.0

use crate::missions::load_missions;
use crate::rows::{cat_from_row, CAT_COLUMNS};
use crate::{db_error, AgencyStore};
use rusqlite::{params, Connection, OptionalExtension};
use spy_agency_model::rules::validate_salary;
use spy_agency_model::{AgencyError, CatId, Mission, NewSpyCat, SpyCat};
use std::collections::BTreeMap;
use tracing::info;

pub(crate) fn require_cat(conn: &Connection, id: CatId) -> Result<SpyCat, AgencyError> {
    let mut cat = conn
        .query_row(
            &format!("SELECT {CAT_COLUMNS} FROM spy_cat WHERE id = ?1"),
            params![id.get()],
            cat_from_row,
        )
        .optional()
        .map_err(db_error)?
        .ok_or_else(|| AgencyError::not_found("spy cat", id))?;
    cat.missions = load_missions(conn, Some(id))?;
    Ok(cat)
}

fn load_cats(conn: &Connection) -> Result<Vec<SpyCat>, AgencyError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {CAT_COLUMNS} FROM spy_cat ORDER BY id"))
        .map_err(db_error)?;
    let mut cats = stmt
        .query_map([], cat_from_row)
        .map_err(db_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(db_error)?;

    let mut by_cat: BTreeMap<CatId, Vec<Mission>> = BTreeMap::new();
    for mission in load_missions(conn, None)? {
        if let Some(cat_id) = mission.spy_cat_id {
            by_cat.entry(cat_id).or_default().push(mission);
        }
    }
    for cat in &mut cats {
        cat.missions = by_cat.remove(&cat.id).unwrap_or_default();
    }
    Ok(cats)
}

impl AgencyStore {
    pub fn create_spy_cat(&self, new: &NewSpyCat) -> Result<SpyCat, AgencyError> {
        new.validate()?;
        self.write(|tx| {
            tx.execute(
                "INSERT INTO spy_cat (name, years_of_experience, breed, salary)
                 VALUES (?1, ?2, ?3, ?4)",
                params![new.name, new.years_of_experience, new.breed, new.salary],
            )
            .map_err(db_error)?;
            let id = CatId::new(tx.last_insert_rowid());
            info!(spy_cat_id = %id, breed = %new.breed, "spy cat created");
            Ok(SpyCat {
                id,
                name: new.name.clone(),
                years_of_experience: new.years_of_experience,
                breed: new.breed.clone(),
                salary: new.salary,
                missions: Vec::new(),
            })
        })
    }

    pub fn list_spy_cats(&self) -> Result<Vec<SpyCat>, AgencyError> {
        self.read(load_cats)
    }

    pub fn get_spy_cat(&self, id: CatId) -> Result<SpyCat, AgencyError> {
        self.read(|conn| require_cat(conn, id))
    }

    pub fn update_spy_cat_salary(&self, id: CatId, salary: i64) -> Result<SpyCat, AgencyError> {
        validate_salary(salary)?;
        self.write(|tx| {
            let changed = tx
                .execute(
                    "UPDATE spy_cat SET salary = ?1 WHERE id = ?2",
                    params![salary, id.get()],
                )
                .map_err(db_error)?;
            if changed == 0 {
                return Err(AgencyError::not_found("spy cat", id));
            }
            info!(spy_cat_id = %id, salary, "spy cat salary updated");
            require_cat(tx, id)
        })
    }

    /// Deletes the cat; its missions and their targets go with it through the
    /// foreign key cascade.
    pub fn delete_spy_cat(&self, id: CatId) -> Result<(), AgencyError> {
        self.write(|tx| {
            let changed = tx
                .execute("DELETE FROM spy_cat WHERE id = ?1", params![id.get()])
                .map_err(db_error)?;
            if changed == 0 {
                return Err(AgencyError::not_found("spy cat", id));
            }
            info!(spy_cat_id = %id, "spy cat deleted");
            Ok(())
        })
    }
}

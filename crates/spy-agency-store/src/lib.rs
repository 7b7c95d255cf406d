// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use rusqlite::{Connection, Transaction, TransactionBehavior};
use spy_agency_model::AgencyError;
use std::path::PathBuf;
use std::time::Duration;

mod cats;
mod missions;
mod rows;
mod schema;

pub use schema::SCHEMA_VERSION;

pub const CRATE_NAME: &str = "spy-agency-store";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(2),
        }
    }
}

/// SQLite-backed store. Every call opens its own connection; mutations run
/// inside a `BEGIN IMMEDIATE` transaction so rule checks and writes are
/// serialized against concurrent writers.
#[derive(Debug, Clone)]
pub struct AgencyStore {
    path: PathBuf,
    cfg: StoreConfig,
}

impl AgencyStore {
    pub fn open(path: impl Into<PathBuf>, cfg: StoreConfig) -> Result<Self, AgencyError> {
        let store = Self {
            path: path.into(),
            cfg,
        };
        let conn = store.connect()?;
        schema::migrate(&conn)?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, AgencyError> {
        let conn = Connection::open(&self.path).map_err(db_error)?;
        conn.busy_timeout(self.cfg.busy_timeout).map_err(db_error)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(db_error)?;
        Ok(conn)
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, AgencyError>,
    ) -> Result<T, AgencyError> {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Runs `f` in one immediate transaction; any error rolls the whole unit
    /// back when the transaction is dropped uncommitted.
    fn write<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T, AgencyError>,
    ) -> Result<T, AgencyError> {
        let mut conn = self.connect()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_error)?;
        let out = f(&tx)?;
        tx.commit().map_err(db_error)?;
        Ok(out)
    }
}

pub(crate) fn db_error(e: rusqlite::Error) -> AgencyError {
    if let rusqlite::Error::SqliteFailure(ref failure, _) = e {
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return AgencyError::conflict(format!("constraint violated: {e}"));
        }
    }
    AgencyError::internal(format!("database error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;
    use spy_agency_model::{ErrorKind, NewMission, NewSpyCat, NewTarget};

    fn seeded_store(dir: &tempfile::TempDir) -> (AgencyStore, i64) {
        let store = AgencyStore::open(dir.path().join("agency.sqlite"), StoreConfig::default())
            .expect("open store");
        let cat = store
            .create_spy_cat(&NewSpyCat {
                name: "Tom".to_string(),
                years_of_experience: 2,
                breed: "Bengal".to_string(),
                salary: 100,
            })
            .expect("cat");
        store
            .create_mission(&NewMission {
                spy_cat_id: Some(cat.id),
                targets: vec![NewTarget {
                    name: "A".to_string(),
                    country: "Spain".to_string(),
                    notes: None,
                }],
            })
            .expect("active mission");
        (store, cat.id.get())
    }

    #[test]
    fn second_active_mission_row_maps_to_conflict() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (store, cat_id) = seeded_store(&dir);

        let err = store
            .write(|tx| {
                tx.execute(
                    "INSERT INTO mission (spy_cat_id) VALUES (?1)",
                    params![cat_id],
                )
                .map_err(db_error)
            })
            .expect_err("unique index rejects a second active mission");
        assert_eq!(err.kind, ErrorKind::Conflict);

        let missions = store.list_missions().expect("list");
        assert_eq!(missions.len(), 1);
    }

    #[test]
    fn completed_missions_do_not_occupy_the_active_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (store, cat_id) = seeded_store(&dir);

        store
            .write(|tx| {
                tx.execute(
                    "INSERT INTO mission (spy_cat_id, complete_state) VALUES (?1, 'completed')",
                    params![cat_id],
                )
                .map_err(db_error)
            })
            .expect("completed mission row");
        assert_eq!(store.list_missions().expect("list").len(), 2);
    }
}

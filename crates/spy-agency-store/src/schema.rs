// SPDX-License-Identifier: Apache-2.0

use crate::db_error;
use rusqlite::Connection;
use spy_agency_model::AgencyError;
use tracing::info;

pub const SCHEMA_VERSION: i64 = 1;

// The partial unique index enforces one active mission per cat underneath the
// transactional rule check. A violating write surfaces as a conflict.
const SCHEMA_V1: &str = "
    BEGIN;
    CREATE TABLE IF NOT EXISTS spy_cat (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL,
      years_of_experience INTEGER NOT NULL,
      breed TEXT NOT NULL,
      salary INTEGER NOT NULL CHECK (salary >= 0)
    );
    CREATE TABLE IF NOT EXISTS mission (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      complete_state TEXT NOT NULL DEFAULT 'in_progress'
        CHECK (complete_state IN ('in_progress', 'completed')),
      spy_cat_id INTEGER REFERENCES spy_cat(id) ON DELETE CASCADE
    );
    CREATE TABLE IF NOT EXISTS target (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL,
      country TEXT NOT NULL,
      notes TEXT,
      complete_state TEXT NOT NULL DEFAULT 'in_progress'
        CHECK (complete_state IN ('in_progress', 'completed')),
      mission_id INTEGER NOT NULL REFERENCES mission(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_mission_spy_cat_id ON mission(spy_cat_id);
    CREATE INDEX IF NOT EXISTS idx_target_mission_id ON target(mission_id);
    CREATE UNIQUE INDEX IF NOT EXISTS idx_mission_one_active_per_cat
      ON mission(spy_cat_id)
      WHERE spy_cat_id IS NOT NULL AND complete_state = 'in_progress';
    PRAGMA user_version = 1;
    COMMIT;
";

pub(crate) fn migrate(conn: &Connection) -> Result<(), AgencyError> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(db_error)?;
    if version == SCHEMA_VERSION {
        return Ok(());
    }
    if version > SCHEMA_VERSION {
        return Err(AgencyError::internal(format!(
            "database schema version {version} is newer than supported version {SCHEMA_VERSION}"
        )));
    }
    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .map_err(db_error)?;
    conn.execute_batch(SCHEMA_V1).map_err(db_error)?;
    info!(from = version, to = SCHEMA_VERSION, "database schema migrated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_is_idempotent_and_sets_user_version() {
        let dir = tempfile::tempdir().expect("tempdir");
        let conn = Connection::open(dir.path().join("agency.sqlite")).expect("open sqlite");
        migrate(&conn).expect("first migrate");
        migrate(&conn).expect("second migrate");
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .expect("user_version");
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn migrate_refuses_newer_schema() {
        let dir = tempfile::tempdir().expect("tempdir");
        let conn = Connection::open(dir.path().join("agency.sqlite")).expect("open sqlite");
        conn.execute_batch("PRAGMA user_version = 99;")
            .expect("bump version");
        assert!(migrate(&conn).is_err());
    }

    #[test]
    fn completion_state_column_rejects_unknown_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let conn = Connection::open(dir.path().join("agency.sqlite")).expect("open sqlite");
        migrate(&conn).expect("migrate");
        let err = conn.execute(
            "INSERT INTO mission (complete_state) VALUES ('paused')",
            [],
        );
        assert!(err.is_err());
    }
}

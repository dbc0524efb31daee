//! Schema migrations tracked with `PRAGMA user_version`.

pub mod v001_initial_schema;
pub mod v002_learning_tables;

use rusqlite::Connection;
use tracing::info;

use vitality_core::errors::{StorageError, VitalityResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> VitalityResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_initial_schema::migrate),
    (2, v002_learning_tables::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the stored version.
pub fn run_migrations(conn: &Connection) -> VitalityResult<()> {
    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if current >= *version {
            continue;
        }
        migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })?;
        info!(version, "applied migration");
    }
    Ok(())
}

pub fn current_version(conn: &Connection) -> VitalityResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

//! PRAGMA configuration applied when a connection is opened.

use rusqlite::Connection;

use vitality_core::config::StorageConfig;
use vitality_core::errors::VitalityResult;

use crate::to_storage_err;

/// Apply journal, sync, and integrity pragmas.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> VitalityResult<()> {
    if config.wal_mode {
        // In-memory databases report "memory" and ignore the request.
        let _mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(|e| to_storage_err(format!("journal_mode: {e}")))?;
    }
    conn.execute_batch(&format!(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = {};
        PRAGMA temp_store = MEMORY;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(format!("failed to apply pragmas: {e}")))?;
    Ok(())
}

/// Whether the connection is running in WAL mode.
pub fn verify_wal_mode(conn: &Connection) -> VitalityResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}

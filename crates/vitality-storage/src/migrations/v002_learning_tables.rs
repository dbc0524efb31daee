//! v002: interaction_outcomes, badge_unlocks.

use rusqlite::Connection;

use vitality_core::errors::VitalityResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VitalityResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS interaction_outcomes (
            id              TEXT PRIMARY KEY,
            relationship_id TEXT NOT NULL REFERENCES relationships(id) ON DELETE CASCADE,
            interaction_id  TEXT NOT NULL REFERENCES interactions(id) ON DELETE CASCADE,
            category        TEXT,
            score_before    REAL NOT NULL,
            expected_impact REAL NOT NULL,
            captured_at     TEXT NOT NULL,
            measured_at     TEXT,
            actual_impact   REAL
        );

        CREATE INDEX IF NOT EXISTS idx_outcomes_pending
            ON interaction_outcomes(measured_at, captured_at);
        CREATE INDEX IF NOT EXISTS idx_outcomes_relationship
            ON interaction_outcomes(relationship_id);

        CREATE TABLE IF NOT EXISTS badge_unlocks (
            id             TEXT PRIMARY KEY,
            scope          TEXT NOT NULL,
            badge_id       TEXT NOT NULL,
            unlocked_at    TEXT NOT NULL,
            interaction_id TEXT,
            UNIQUE (scope, badge_id)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

//! v001: relationships, interactions, interaction_participants.

use rusqlite::Connection;

use vitality_core::errors::VitalityResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VitalityResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS relationships (
            id                      TEXT PRIMARY KEY,
            name                    TEXT NOT NULL,
            tier                    TEXT NOT NULL,
            archetype               TEXT NOT NULL,
            score                   REAL NOT NULL,
            last_updated            TEXT NOT NULL,
            resilience              REAL NOT NULL DEFAULT 1.0,
            momentum                REAL NOT NULL DEFAULT 0.0,
            momentum_updated        TEXT NOT NULL,
            rated_interaction_count INTEGER NOT NULL DEFAULT 0,
            typical_interval_days   REAL,
            tolerance_window_days   REAL,
            outcome_count           INTEGER NOT NULL DEFAULT 0,
            category_effectiveness  TEXT NOT NULL DEFAULT '{}',
            initiations_user        INTEGER NOT NULL DEFAULT 0,
            initiations_other       INTEGER NOT NULL DEFAULT 0,
            dormant                 INTEGER NOT NULL DEFAULT 0,
            dormant_since           TEXT,
            birthday                TEXT,
            anniversary             TEXT,
            created_at              TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_relationships_tier ON relationships(tier);

        CREATE TABLE IF NOT EXISTS interactions (
            id             TEXT PRIMARY KEY,
            date           TEXT NOT NULL,
            status         TEXT NOT NULL,
            has_reflection INTEGER NOT NULL DEFAULT 0,
            attributes     TEXT NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_interactions_status ON interactions(status);

        CREATE TABLE IF NOT EXISTS interaction_participants (
            interaction_id  TEXT NOT NULL REFERENCES interactions(id) ON DELETE CASCADE,
            relationship_id TEXT NOT NULL REFERENCES relationships(id) ON DELETE CASCADE,
            PRIMARY KEY (interaction_id, relationship_id)
        );

        CREATE INDEX IF NOT EXISTS idx_participants_relationship
            ON interaction_participants(relationship_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

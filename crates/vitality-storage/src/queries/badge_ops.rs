//! Write-once badge unlocks, unique per (scope, badge_id).

use rusqlite::{params, Connection};

use vitality_core::errors::{VitalityError, VitalityResult};
use vitality_core::models::{BadgeScope, BadgeUnlock};

use super::parse_timestamp;
use crate::to_storage_err;

pub fn badge_exists(conn: &Connection, scope: &BadgeScope, badge_id: &str) -> VitalityResult<bool> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM badge_unlocks WHERE scope = ?1 AND badge_id = ?2",
            params![scope.key(), badge_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n > 0)
}

/// Insert an unlock. A second insert for the same scope and badge violates
/// the unique constraint and fails.
pub fn insert_badge(conn: &Connection, unlock: &BadgeUnlock) -> VitalityResult<()> {
    conn.execute(
        "INSERT INTO badge_unlocks (id, scope, badge_id, unlocked_at, interaction_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            unlock.id,
            unlock.scope.key(),
            unlock.badge_id,
            unlock.unlocked_at.to_rfc3339(),
            unlock.interaction_id,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Unlocks for one scope, oldest first.
pub fn badges_for(conn: &Connection, scope: &BadgeScope) -> VitalityResult<Vec<BadgeUnlock>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, scope, badge_id, unlocked_at, interaction_id FROM badge_unlocks
             WHERE scope = ?1 ORDER BY unlocked_at ASC, badge_id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![scope.key()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, scope_key, badge_id, unlocked_at, interaction_id) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let scope = BadgeScope::from_key(&scope_key).ok_or_else(|| {
            VitalityError::SerializationError(format!("unknown badge scope {scope_key:?}"))
        })?;
        out.push(BadgeUnlock {
            id,
            scope,
            badge_id,
            unlocked_at: parse_timestamp(&unlocked_at)?,
            interaction_id,
        });
    }
    Ok(out)
}

//! Interactions and their participant join records.

use rusqlite::{params, Connection, OptionalExtension};

use vitality_core::errors::{VitalityError, VitalityResult};
use vitality_core::models::{Interaction, InteractionAttributes, InteractionStatus};

use super::parse_timestamp;
use crate::to_storage_err;

/// Insert an interaction and link it to every participant. Callers wrap this
/// in a transaction so the row and its links land together.
pub fn insert_interaction(
    conn: &Connection,
    interaction: &Interaction,
    participant_ids: &[String],
) -> VitalityResult<()> {
    let attrs = &interaction.attributes;
    conn.execute(
        "INSERT INTO interactions (id, date, status, has_reflection, attributes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            interaction.id,
            attrs.date.to_rfc3339(),
            attrs.status.wire_name(),
            attrs.reflection.is_some() as i32,
            serde_json::to_string(attrs)?,
            interaction.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO interaction_participants (interaction_id, relationship_id)
             VALUES (?1, ?2)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for relationship_id in participant_ids {
        stmt.execute(params![interaction.id, relationship_id])
            .map_err(|e| to_storage_err(format!("link {relationship_id}: {e}")))?;
    }
    Ok(())
}

pub fn get_interaction(conn: &Connection, id: &str) -> VitalityResult<Option<Interaction>> {
    let row = conn
        .query_row(
            "SELECT id, attributes, created_at FROM interactions WHERE id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(decode).transpose()
}

/// Change the status column and the serialized attributes together.
pub fn set_status(conn: &Connection, id: &str, status: InteractionStatus) -> VitalityResult<()> {
    let mut interaction = get_interaction(conn, id)?
        .ok_or_else(|| VitalityError::InteractionNotFound { id: id.to_string() })?;
    interaction.attributes.status = status;
    conn.execute(
        "UPDATE interactions SET status = ?2, attributes = ?3 WHERE id = ?1",
        params![
            id,
            status.wire_name(),
            serde_json::to_string(&interaction.attributes)?
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn participants_of(conn: &Connection, interaction_id: &str) -> VitalityResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT relationship_id FROM interaction_participants
             WHERE interaction_id = ?1 ORDER BY relationship_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![interaction_id], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<String>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Interactions linked to a relationship, oldest first.
pub fn interactions_for(conn: &Connection, relationship_id: &str) -> VitalityResult<Vec<Interaction>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT i.id, i.attributes, i.created_at
             FROM interactions i
             JOIN interaction_participants p ON p.interaction_id = i.id
             WHERE p.relationship_id = ?1
             ORDER BY i.date ASC, i.created_at ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![relationship_id], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(decode(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(out)
}

pub fn count_completed(conn: &Connection) -> VitalityResult<usize> {
    count(conn, "SELECT COUNT(*) FROM interactions WHERE status = 'completed'")
}

pub fn count_reflections(conn: &Connection) -> VitalityResult<usize> {
    count(
        conn,
        "SELECT COUNT(*) FROM interactions WHERE status = 'completed' AND has_reflection = 1",
    )
}

fn count(conn: &Connection, sql: &str) -> VitalityResult<usize> {
    let n: i64 = conn
        .query_row(sql, [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n.max(0) as usize)
}

fn decode((id, attributes, created_at): (String, String, String)) -> VitalityResult<Interaction> {
    let attributes: InteractionAttributes = serde_json::from_str(&attributes)?;
    Ok(Interaction {
        id,
        attributes,
        created_at: parse_timestamp(&created_at)?,
    })
}

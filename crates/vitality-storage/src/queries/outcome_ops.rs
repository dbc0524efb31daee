//! Interaction outcome rows for effectiveness learning.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use vitality_core::errors::VitalityResult;
use vitality_core::models::{Category, InteractionOutcome};

use super::{parse_optional_timestamp, parse_timestamp, parse_wire};
use crate::to_storage_err;

const COLUMNS: &str = "id, relationship_id, interaction_id, category, score_before,
    expected_impact, captured_at, measured_at, actual_impact";

pub fn insert_outcome(conn: &Connection, outcome: &InteractionOutcome) -> VitalityResult<()> {
    conn.execute(
        &format!("INSERT INTO interaction_outcomes ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
        params![
            outcome.id,
            outcome.relationship_id,
            outcome.interaction_id,
            outcome.category.map(|c| c.wire_name()),
            outcome.score_before,
            outcome.expected_impact,
            outcome.captured_at.to_rfc3339(),
            outcome.measured_at.map(|t| t.to_rfc3339()),
            outcome.actual_impact,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Unmeasured outcomes captured at or before the cutoff, oldest first.
pub fn pending_outcomes(
    conn: &Connection,
    captured_before: DateTime<Utc>,
) -> VitalityResult<Vec<InteractionOutcome>> {
    // RFC 3339 strings in UTC sort chronologically.
    query(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM interaction_outcomes
             WHERE measured_at IS NULL AND captured_at <= ?1
             ORDER BY captured_at ASC"
        ),
        captured_before.to_rfc3339(),
    )
}

/// Fill the measurement once. Returns `false` when the row is missing or
/// already measured.
pub fn mark_measured(
    conn: &Connection,
    id: &str,
    measured_at: DateTime<Utc>,
    actual_impact: f64,
) -> VitalityResult<bool> {
    let changed = conn
        .execute(
            "UPDATE interaction_outcomes SET measured_at = ?2, actual_impact = ?3
             WHERE id = ?1 AND measured_at IS NULL",
            params![id, measured_at.to_rfc3339(), actual_impact],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

pub fn outcomes_for(conn: &Connection, relationship_id: &str) -> VitalityResult<Vec<InteractionOutcome>> {
    query(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM interaction_outcomes
             WHERE relationship_id = ?1 ORDER BY captured_at ASC"
        ),
        relationship_id.to_string(),
    )
}

fn query(conn: &Connection, sql: &str, param: String) -> VitalityResult<Vec<InteractionOutcome>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![param], OutcomeRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_outcome()?);
    }
    Ok(out)
}

struct OutcomeRow {
    id: String,
    relationship_id: String,
    interaction_id: String,
    category: Option<String>,
    score_before: f64,
    expected_impact: f64,
    captured_at: String,
    measured_at: Option<String>,
    actual_impact: Option<f64>,
}

impl OutcomeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            relationship_id: row.get(1)?,
            interaction_id: row.get(2)?,
            category: row.get(3)?,
            score_before: row.get(4)?,
            expected_impact: row.get(5)?,
            captured_at: row.get(6)?,
            measured_at: row.get(7)?,
            actual_impact: row.get(8)?,
        })
    }

    fn into_outcome(self) -> VitalityResult<InteractionOutcome> {
        let category = self
            .category
            .as_deref()
            .map(|c| parse_wire("category", c, Category::parse))
            .transpose()?;
        Ok(InteractionOutcome {
            id: self.id,
            relationship_id: self.relationship_id,
            interaction_id: self.interaction_id,
            category,
            score_before: self.score_before,
            expected_impact: self.expected_impact,
            captured_at: parse_timestamp(&self.captured_at)?,
            measured_at: parse_optional_timestamp(self.measured_at)?,
            actual_impact: self.actual_impact,
        })
    }
}

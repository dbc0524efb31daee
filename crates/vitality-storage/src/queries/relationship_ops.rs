//! Relationship rows.

use rusqlite::{params, Connection, OptionalExtension, Row};

use vitality_core::errors::VitalityResult;
use vitality_core::models::{
    Archetype, InitiationCounts, Relationship, Resilience, Tier, VitalityScore,
};

use super::{parse_optional_date, parse_optional_timestamp, parse_timestamp, parse_wire};
use crate::to_storage_err;

const COLUMNS: &str = "id, name, tier, archetype, score, last_updated, resilience, momentum,
    momentum_updated, rated_interaction_count, typical_interval_days, tolerance_window_days,
    outcome_count, category_effectiveness, initiations_user, initiations_other, dormant,
    dormant_since, birthday, anniversary, created_at";

/// Insert a relationship or update it in place. The row is never deleted,
/// so cascading links and outcomes survive.
pub fn upsert_relationship(conn: &Connection, rel: &Relationship) -> VitalityResult<()> {
    let effectiveness = serde_json::to_string(&rel.category_effectiveness)?;
    conn.execute(
        &format!(
            "INSERT INTO relationships ({COLUMNS}) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                ?18, ?19, ?20, ?21
            )
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                tier = excluded.tier,
                archetype = excluded.archetype,
                score = excluded.score,
                last_updated = excluded.last_updated,
                resilience = excluded.resilience,
                momentum = excluded.momentum,
                momentum_updated = excluded.momentum_updated,
                rated_interaction_count = excluded.rated_interaction_count,
                typical_interval_days = excluded.typical_interval_days,
                tolerance_window_days = excluded.tolerance_window_days,
                outcome_count = excluded.outcome_count,
                category_effectiveness = excluded.category_effectiveness,
                initiations_user = excluded.initiations_user,
                initiations_other = excluded.initiations_other,
                dormant = excluded.dormant,
                dormant_since = excluded.dormant_since,
                birthday = excluded.birthday,
                anniversary = excluded.anniversary,
                created_at = excluded.created_at"
        ),
        params![
            rel.id,
            rel.name,
            rel.tier.wire_name(),
            rel.archetype.wire_name(),
            rel.score.value(),
            rel.last_updated.to_rfc3339(),
            rel.resilience.value(),
            rel.momentum,
            rel.momentum_updated.to_rfc3339(),
            rel.rated_interaction_count,
            rel.typical_interval_days,
            rel.tolerance_window_days,
            rel.outcome_count,
            effectiveness,
            rel.initiation_counts.user,
            rel.initiation_counts.other,
            rel.dormant as i32,
            rel.dormant_since.map(|t| t.to_rfc3339()),
            rel.birthday.map(|d| d.to_string()),
            rel.anniversary.map(|d| d.to_string()),
            rel.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_relationship(conn: &Connection, id: &str) -> VitalityResult<Option<Relationship>> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM relationships WHERE id = ?1"),
            params![id],
            RelationshipRow::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(RelationshipRow::into_relationship).transpose()
}

/// All relationships ordered by id.
pub fn list_relationships(conn: &Connection) -> VitalityResult<Vec<Relationship>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM relationships ORDER BY id"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], RelationshipRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let row = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(row.into_relationship()?);
    }
    Ok(out)
}

/// Raw column values, decoded outside the rusqlite row callback.
struct RelationshipRow {
    id: String,
    name: String,
    tier: String,
    archetype: String,
    score: f64,
    last_updated: String,
    resilience: f64,
    momentum: f64,
    momentum_updated: String,
    rated_interaction_count: u32,
    typical_interval_days: Option<f64>,
    tolerance_window_days: Option<f64>,
    outcome_count: u32,
    category_effectiveness: String,
    initiations_user: u32,
    initiations_other: u32,
    dormant: bool,
    dormant_since: Option<String>,
    birthday: Option<String>,
    anniversary: Option<String>,
    created_at: String,
}

impl RelationshipRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            tier: row.get(2)?,
            archetype: row.get(3)?,
            score: row.get(4)?,
            last_updated: row.get(5)?,
            resilience: row.get(6)?,
            momentum: row.get(7)?,
            momentum_updated: row.get(8)?,
            rated_interaction_count: row.get(9)?,
            typical_interval_days: row.get(10)?,
            tolerance_window_days: row.get(11)?,
            outcome_count: row.get(12)?,
            category_effectiveness: row.get(13)?,
            initiations_user: row.get(14)?,
            initiations_other: row.get(15)?,
            dormant: row.get(16)?,
            dormant_since: row.get(17)?,
            birthday: row.get(18)?,
            anniversary: row.get(19)?,
            created_at: row.get(20)?,
        })
    }

    fn into_relationship(self) -> VitalityResult<Relationship> {
        Ok(Relationship {
            tier: parse_wire("tier", &self.tier, Tier::parse)?,
            archetype: parse_wire("archetype", &self.archetype, Archetype::parse)?,
            score: VitalityScore::new(self.score),
            last_updated: parse_timestamp(&self.last_updated)?,
            resilience: Resilience::new(self.resilience),
            momentum: self.momentum,
            momentum_updated: parse_timestamp(&self.momentum_updated)?,
            rated_interaction_count: self.rated_interaction_count,
            typical_interval_days: self.typical_interval_days,
            tolerance_window_days: self.tolerance_window_days,
            outcome_count: self.outcome_count,
            category_effectiveness: serde_json::from_str(&self.category_effectiveness)?,
            initiation_counts: InitiationCounts {
                user: self.initiations_user,
                other: self.initiations_other,
            },
            dormant: self.dormant,
            dormant_since: parse_optional_timestamp(self.dormant_since)?,
            birthday: parse_optional_date(self.birthday)?,
            anniversary: parse_optional_date(self.anniversary)?,
            created_at: parse_timestamp(&self.created_at)?,
            id: self.id,
            name: self.name,
        })
    }
}

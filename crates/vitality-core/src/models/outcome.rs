use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::Category;

/// Learning record pairing the points an interaction was predicted to add
/// with the score change later observed.
///
/// Created right after scoring; `measured_at` / `actual_impact` are filled
/// exactly once by the maturation pass and the row is kept as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InteractionOutcome {
    pub id: String,
    pub relationship_id: String,
    pub interaction_id: String,
    pub category: Option<Category>,
    pub score_before: f64,
    pub expected_impact: f64,
    pub captured_at: DateTime<Utc>,
    pub measured_at: Option<DateTime<Utc>>,
    pub actual_impact: Option<f64>,
}

impl InteractionOutcome {
    pub fn capture(
        relationship_id: impl Into<String>,
        interaction_id: impl Into<String>,
        category: Option<Category>,
        score_before: f64,
        expected_impact: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            relationship_id: relationship_id.into(),
            interaction_id: interaction_id.into(),
            category,
            score_before,
            expected_impact,
            captured_at: now,
            measured_at: None,
            actual_impact: None,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.measured_at.is_some()
    }
}

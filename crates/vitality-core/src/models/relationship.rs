use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Archetype, Category, Initiator, Resilience, Tier, VitalityScore};

/// Who initiated contact, tallied over the relationship's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InitiationCounts {
    /// Initiated by the account owner.
    pub user: u32,
    /// Initiated by the friend.
    pub other: u32,
}

impl InitiationCounts {
    pub fn total(&self) -> u32 {
        self.user + self.other
    }

    pub fn record(&mut self, initiator: Initiator) {
        match initiator {
            Initiator::User => self.user += 1,
            Initiator::Other => self.other += 1,
        }
    }
}

/// One tracked person and everything the engine has learned about them.
///
/// `score` is the value at `last_updated`; decay is applied on read and is
/// never persisted continuously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Relationship {
    pub id: String,
    pub name: String,
    pub tier: Tier,
    pub archetype: Archetype,

    // --- Score state ---
    pub score: VitalityScore,
    pub last_updated: DateTime<Utc>,
    pub resilience: Resilience,
    pub momentum: f64,
    pub momentum_updated: DateTime<Utc>,

    // --- Learned parameters ---
    /// Interactions carrying a vibe; gates resilience adaptation.
    pub rated_interaction_count: u32,
    pub typical_interval_days: Option<f64>,
    pub tolerance_window_days: Option<f64>,
    /// Measured effectiveness samples; gates use of the learned ratios.
    pub outcome_count: u32,
    /// Learned actual/expected impact ratio per category. Missing = 1.0.
    pub category_effectiveness: BTreeMap<Category, f64>,
    pub initiation_counts: InitiationCounts,

    // --- Lifecycle ---
    pub dormant: bool,
    pub dormant_since: Option<DateTime<Utc>>,
    pub birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    /// Start tracking a person at the initial score.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        tier: Tier,
        archetype: Archetype,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            archetype,
            score: VitalityScore::default(),
            last_updated: now,
            resilience: Resilience::default(),
            momentum: 0.0,
            momentum_updated: now,
            rated_interaction_count: 0,
            typical_interval_days: None,
            tolerance_window_days: None,
            outcome_count: 0,
            category_effectiveness: BTreeMap::new(),
            initiation_counts: InitiationCounts::default(),
            dormant: false,
            dormant_since: None,
            birthday: None,
            anniversary: None,
            created_at: now,
        }
    }

    /// Learned effectiveness ratio for a category (1.0 when never measured).
    pub fn learned_ratio(&self, category: Category) -> f64 {
        self.category_effectiveness
            .get(&category)
            .copied()
            .unwrap_or(1.0)
    }
}

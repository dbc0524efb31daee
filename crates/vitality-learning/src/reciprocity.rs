//! Who reaches out first. Purely additive tallies; no decay.

use serde::{Deserialize, Serialize};
use vitality_core::config::ReciprocityConfig;
use vitality_core::models::{InitiationCounts, Initiator, Relationship};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReciprocityBalance {
    InsufficientData,
    Balanced,
    UserLeading,
    OtherLeading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReciprocitySummary {
    pub user: u32,
    pub other: u32,
    /// `user / (user + other)`; `None` before any initiation is recorded.
    pub ratio: Option<f64>,
    pub balance: ReciprocityBalance,
}

#[derive(Debug, Clone, Default)]
pub struct ReciprocityTracker {
    config: ReciprocityConfig,
}

impl ReciprocityTracker {
    pub fn new(config: ReciprocityConfig) -> Self {
        Self { config }
    }

    pub fn record(&self, relationship: &mut Relationship, initiator: Initiator) {
        relationship.initiation_counts.record(initiator);
    }

    pub fn ratio(counts: &InitiationCounts) -> Option<f64> {
        let total = counts.total();
        (total > 0).then(|| counts.user as f64 / total as f64)
    }

    pub fn balance(&self, counts: &InitiationCounts) -> ReciprocityBalance {
        if counts.total() < self.config.min_samples {
            return ReciprocityBalance::InsufficientData;
        }
        match Self::ratio(counts) {
            Some(r) if r > self.config.balanced_high => ReciprocityBalance::UserLeading,
            Some(r) if r < self.config.balanced_low => ReciprocityBalance::OtherLeading,
            Some(_) => ReciprocityBalance::Balanced,
            None => ReciprocityBalance::InsufficientData,
        }
    }

    pub fn summary(&self, relationship: &Relationship) -> ReciprocitySummary {
        let counts = &relationship.initiation_counts;
        ReciprocitySummary {
            user: counts.user,
            other: counts.other,
            ratio: Self::ratio(counts),
            balance: self.balance(counts),
        }
    }
}

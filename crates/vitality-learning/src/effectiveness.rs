//! Effectiveness learning: did an interaction move the score as much as
//! predicted?
//!
//! Capture happens right after scoring. Measurement runs later, once the
//! outcome has matured, and folds `actual / expected` into a per-category
//! exponential moving average on the relationship.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vitality_core::config::EffectivenessConfig;
use vitality_core::models::{Category, InteractionOutcome, Relationship};
use vitality_core::time::elapsed_days;
use vitality_decay::DecayModel;

/// Result of measuring one matured outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub actual_impact: f64,
    /// `actual / expected`, clamped. `None` when the outcome cannot teach
    /// anything (negligible expected impact or unknown category).
    pub sample_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct EffectivenessLearner {
    config: EffectivenessConfig,
    decay: DecayModel,
}

impl EffectivenessLearner {
    pub fn new(config: EffectivenessConfig, decay: DecayModel) -> Self {
        Self { config, decay }
    }

    pub fn config(&self) -> &EffectivenessConfig {
        &self.config
    }

    /// Outcomes captured at or before this instant are mature at `now`.
    pub fn maturity_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.config.maturation_days)
    }

    pub fn is_mature(&self, outcome: &InteractionOutcome, now: DateTime<Utc>) -> bool {
        outcome.captured_at <= self.maturity_cutoff(now)
    }

    /// Realized impact at `now`, adjusted for the decay the relationship
    /// would have accrued anyway since capture.
    pub fn measure(
        &self,
        relationship: &Relationship,
        outcome: &InteractionOutcome,
        now: DateTime<Utc>,
    ) -> Measurement {
        let current = self.decay.current_score(relationship, now);
        let natural_decay = self
            .decay
            .decay_over(relationship, elapsed_days(outcome.captured_at, now));
        let actual_impact = current - outcome.score_before + natural_decay;

        let sample_ratio = match outcome.category {
            Some(_) if outcome.expected_impact > self.config.min_expected_impact => Some(
                (actual_impact / outcome.expected_impact)
                    .clamp(0.0, self.config.sample_ratio_max),
            ),
            _ => None,
        };

        Measurement {
            actual_impact,
            sample_ratio,
        }
    }

    /// Fold a sample into the category's moving average and count it.
    pub fn fold(&self, relationship: &mut Relationship, category: Category, sample_ratio: f64) {
        let previous = relationship.learned_ratio(category);
        let updated = (previous + self.config.alpha * (sample_ratio - previous))
            .clamp(self.config.learned_ratio_min, self.config.learned_ratio_max);
        relationship.category_effectiveness.insert(category, updated);
        relationship.outcome_count += 1;
        debug!(
            relationship_id = %relationship.id,
            category = ?category,
            previous,
            updated,
            outcome_count = relationship.outcome_count,
            "effectiveness ratio updated"
        );
    }

    /// Measure and, when the sample is usable, fold it in.
    pub fn learn(
        &self,
        relationship: &mut Relationship,
        outcome: &InteractionOutcome,
        now: DateTime<Utc>,
    ) -> Measurement {
        let measurement = self.measure(relationship, outcome, now);
        if let (Some(category), Some(ratio)) = (outcome.category, measurement.sample_ratio) {
            self.fold(relationship, category, ratio);
        }
        measurement
    }
}

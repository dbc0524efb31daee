use chrono::{DateTime, Utc};
use vitality_core::config::DecayConfig;
use vitality_core::models::{Relationship, Resilience, Vibe};

use crate::dormancy::{self, DormancyDecision};
use crate::formula::{self, DecayBreakdown, DecayContext};
use crate::{momentum, resilience};

/// Score decay model: two-phase decay, momentum, resilience, and dormancy
/// under one configuration.
#[derive(Debug, Clone, Default)]
pub struct DecayModel {
    config: DecayConfig,
}

impl DecayModel {
    pub fn new(config: DecayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// Present score in [0, 100]. Pure.
    pub fn current_score(&self, relationship: &Relationship, now: DateTime<Utc>) -> f64 {
        formula::compute(relationship, &DecayContext { now }, &self.config)
    }

    /// Present score with a breakdown of each decay phase.
    pub fn breakdown(&self, relationship: &Relationship, now: DateTime<Utc>) -> DecayBreakdown {
        formula::compute_breakdown(relationship, &DecayContext { now }, &self.config)
    }

    /// Decay the relationship would accrue over `days` from its last write.
    pub fn decay_over(&self, relationship: &Relationship, days: f64) -> f64 {
        formula::decay_amount(relationship, days, &self.config)
    }

    pub fn tolerance_days(&self, relationship: &Relationship) -> f64 {
        formula::tolerance_days(relationship, &self.config)
    }

    /// Momentum left at `now`.
    pub fn momentum(&self, relationship: &Relationship, now: DateTime<Utc>) -> f64 {
        momentum::current(relationship, now, &self.config)
    }

    pub fn momentum_active(&self, relationship: &Relationship, now: DateTime<Utc>) -> bool {
        momentum::is_active(relationship, now, &self.config)
    }

    pub fn reset_momentum(&self, relationship: &mut Relationship, now: DateTime<Utc>) {
        momentum::reset(relationship, now, &self.config)
    }

    /// Resilience after a rated interaction; `rated_count` includes it.
    pub fn adapt_resilience(&self, current: Resilience, vibe: Vibe, rated_count: u32) -> Resilience {
        resilience::adapt(current, vibe, rated_count, &self.config)
    }

    /// Evaluate dormancy at `now`.
    pub fn evaluate_dormancy(
        &self,
        relationship: &Relationship,
        now: DateTime<Utc>,
    ) -> DormancyDecision {
        let score = self.current_score(relationship, now);
        dormancy::evaluate(relationship, score, self.config.dormant_score_threshold)
    }

    /// Current score and dormancy decision for each relationship.
    pub fn process_batch(
        &self,
        relationships: &[Relationship],
        now: DateTime<Utc>,
    ) -> Vec<(f64, DormancyDecision)> {
        relationships
            .iter()
            .map(|r| {
                let score = self.current_score(r, now);
                let decision =
                    dormancy::evaluate(r, score, self.config.dormant_score_threshold);
                (score, decision)
            })
            .collect()
    }
}

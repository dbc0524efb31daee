//! Cadence learning: how often this relationship naturally sees contact.
//!
//! Gaps between consecutive completed interactions give an average interval
//! and a coefficient of variation (`stddev / mean`). A cadence is reliable
//! when there are enough gaps and the CV is low; reliable cadences set the
//! tolerance window to `clamp(mean × multiplier, min, max)`, so slow
//! rhythms get wider windows than the tier default and frequent ones
//! narrower.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitality_core::config::PatternConfig;
use vitality_core::models::{Interaction, Relationship};
use vitality_core::time::elapsed_days;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadenceAnalysis {
    pub interaction_count: usize,
    pub gap_count: usize,
    pub average_interval_days: f64,
    pub std_dev_days: f64,
    pub coefficient_of_variation: f64,
    pub reliable: bool,
    /// Window that would be applied; `None` when unreliable.
    pub tolerance_window_days: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct PatternLearner {
    config: PatternConfig,
}

impl PatternLearner {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Analyze completed interactions. `None` until the minimum count exists.
    pub fn analyze(&self, interactions: &[Interaction]) -> Option<CadenceAnalysis> {
        let mut dates: Vec<_> = interactions
            .iter()
            .filter(|i| i.attributes.is_completed())
            .map(|i| i.attributes.date)
            .collect();
        if dates.len() < self.config.min_interactions {
            return None;
        }
        dates.sort();

        let gaps: Vec<f64> = dates
            .windows(2)
            .map(|pair| elapsed_days(pair[0], pair[1]))
            .collect();
        let n = gaps.len() as f64;
        let average = gaps.iter().sum::<f64>() / n;
        let variance = gaps.iter().map(|g| (g - average).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        let cv = if average > 0.0 { std_dev / average } else { f64::INFINITY };

        let reliable = gaps.len() >= self.config.min_gaps
            && average > 0.0
            && cv <= self.config.max_coefficient_of_variation;

        let tolerance = reliable.then(|| {
            (average * self.config.tolerance_multiplier)
                .clamp(self.config.min_tolerance_days, self.config.max_tolerance_days)
        });

        Some(CadenceAnalysis {
            interaction_count: dates.len(),
            gap_count: gaps.len(),
            average_interval_days: average,
            std_dev_days: std_dev,
            coefficient_of_variation: cv,
            reliable,
            tolerance_window_days: tolerance,
        })
    }

    /// Write a reliable cadence onto the relationship. Returns whether the
    /// learned fields changed. Unreliable analyses leave them untouched.
    pub fn apply(&self, relationship: &mut Relationship, analysis: &CadenceAnalysis) -> bool {
        let Some(tolerance) = analysis.tolerance_window_days else {
            debug!(
                relationship_id = %relationship.id,
                cv = analysis.coefficient_of_variation,
                "cadence not reliable, keeping learned fields"
            );
            return false;
        };
        let typical = Some(analysis.average_interval_days);
        let changed = relationship.typical_interval_days != typical
            || relationship.tolerance_window_days != Some(tolerance);
        relationship.typical_interval_days = typical;
        relationship.tolerance_window_days = Some(tolerance);
        changed
    }

    /// Analyze and apply in one step.
    pub fn learn(
        &self,
        relationship: &mut Relationship,
        interactions: &[Interaction],
    ) -> Option<CadenceAnalysis> {
        let analysis = self.analyze(interactions)?;
        self.apply(relationship, &analysis);
        Some(analysis)
    }
}

use serde::{Deserialize, Serialize};

use super::defaults;

/// Cadence learning policy. A pattern is reliable once enough gaps exist and
/// their coefficient of variation stays under `max_coefficient_of_variation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub min_interactions: usize,
    pub min_gaps: usize,
    pub max_coefficient_of_variation: f64,
    pub tolerance_multiplier: f64,
    pub min_tolerance_days: f64,
    pub max_tolerance_days: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_interactions: defaults::DEFAULT_PATTERN_MIN_INTERACTIONS,
            min_gaps: defaults::DEFAULT_PATTERN_MIN_GAPS,
            max_coefficient_of_variation: defaults::DEFAULT_PATTERN_MAX_CV,
            tolerance_multiplier: defaults::DEFAULT_PATTERN_TOLERANCE_MULTIPLIER,
            min_tolerance_days: defaults::DEFAULT_PATTERN_MIN_TOLERANCE_DAYS,
            max_tolerance_days: defaults::DEFAULT_PATTERN_MAX_TOLERANCE_DAYS,
        }
    }
}

/// Effectiveness learning: maturation delay and blending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectivenessConfig {
    pub maturation_days: i64,
    /// EMA weight of the newest sample.
    pub alpha: f64,
    /// Outcomes required before learned ratios affect scoring.
    pub min_outcomes: u32,
    /// Outcomes at which the learned ratio is trusted fully.
    pub full_confidence_outcomes: u32,
    pub sample_ratio_max: f64,
    pub learned_ratio_min: f64,
    pub learned_ratio_max: f64,
    /// Expected impacts at or below this are not learned from.
    pub min_expected_impact: f64,
}

impl Default for EffectivenessConfig {
    fn default() -> Self {
        Self {
            maturation_days: defaults::DEFAULT_MATURATION_DAYS,
            alpha: defaults::DEFAULT_EFFECTIVENESS_ALPHA,
            min_outcomes: defaults::DEFAULT_EFFECTIVENESS_MIN_OUTCOMES,
            full_confidence_outcomes: defaults::DEFAULT_EFFECTIVENESS_FULL_CONFIDENCE_OUTCOMES,
            sample_ratio_max: defaults::DEFAULT_SAMPLE_RATIO_MAX,
            learned_ratio_min: defaults::DEFAULT_LEARNED_RATIO_MIN,
            learned_ratio_max: defaults::DEFAULT_LEARNED_RATIO_MAX,
            min_expected_impact: defaults::DEFAULT_MIN_EXPECTED_IMPACT,
        }
    }
}

/// Reciprocity balance classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReciprocityConfig {
    pub min_samples: u32,
    pub balanced_low: f64,
    pub balanced_high: f64,
}

impl Default for ReciprocityConfig {
    fn default() -> Self {
        Self {
            min_samples: defaults::DEFAULT_RECIPROCITY_MIN_SAMPLES,
            balanced_low: defaults::DEFAULT_RECIPROCITY_BALANCED_LOW,
            balanced_high: defaults::DEFAULT_RECIPROCITY_BALANCED_HIGH,
        }
    }
}

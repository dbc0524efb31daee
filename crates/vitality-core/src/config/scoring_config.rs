use serde::{Deserialize, Serialize};

use super::defaults;

/// Interaction scoring configuration. The per-category, per-archetype tables
/// are fixed in `vitality-scoring`; these are the blend knobs around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub quality_multiplier_floor: f64,
    pub quality_multiplier_span: f64,
    /// Share of the group-dilution loss given back to high-quality group weaves.
    pub dilution_restore_fraction: f64,
    pub dilution_restore_min_quality: u8,
    pub momentum_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            quality_multiplier_floor: defaults::DEFAULT_QUALITY_MULTIPLIER_FLOOR,
            quality_multiplier_span: defaults::DEFAULT_QUALITY_MULTIPLIER_SPAN,
            dilution_restore_fraction: defaults::DEFAULT_DILUTION_RESTORE_FRACTION,
            dilution_restore_min_quality: defaults::DEFAULT_DILUTION_RESTORE_MIN_QUALITY,
            momentum_bonus: defaults::DEFAULT_MOMENTUM_BONUS,
        }
    }
}

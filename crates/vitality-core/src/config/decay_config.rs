use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Tier;

/// Decay, momentum, resilience, and dormancy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Points lost per day for each tier before resilience and phase factors.
    pub inner_decay_rate: f64,
    pub close_decay_rate: f64,
    pub community_decay_rate: f64,
    /// Tolerance windows used until a cadence has been learned (days).
    pub inner_tolerance_days: f64,
    pub close_tolerance_days: f64,
    pub community_tolerance_days: f64,
    /// Rate multiplier inside the tolerance window.
    pub gentle_factor: f64,
    /// Rate multiplier past the tolerance window.
    pub accelerated_factor: f64,
    /// Current score at or below which a relationship goes dormant.
    pub dormant_score_threshold: f64,
    pub momentum_reset: f64,
    pub momentum_decay_per_day: f64,
    /// Vibe-bearing interactions required before resilience adapts.
    pub resilience_min_rated: u32,
    pub resilience_positive_step: f64,
    pub resilience_negative_step: f64,
}

impl DecayConfig {
    pub fn decay_rate(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Inner => self.inner_decay_rate,
            Tier::Close => self.close_decay_rate,
            Tier::Community => self.community_decay_rate,
        }
    }

    pub fn default_tolerance(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Inner => self.inner_tolerance_days,
            Tier::Close => self.close_tolerance_days,
            Tier::Community => self.community_tolerance_days,
        }
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            inner_decay_rate: defaults::DEFAULT_INNER_DECAY_RATE,
            close_decay_rate: defaults::DEFAULT_CLOSE_DECAY_RATE,
            community_decay_rate: defaults::DEFAULT_COMMUNITY_DECAY_RATE,
            inner_tolerance_days: defaults::DEFAULT_INNER_TOLERANCE_DAYS,
            close_tolerance_days: defaults::DEFAULT_CLOSE_TOLERANCE_DAYS,
            community_tolerance_days: defaults::DEFAULT_COMMUNITY_TOLERANCE_DAYS,
            gentle_factor: defaults::DEFAULT_GENTLE_DECAY_FACTOR,
            accelerated_factor: defaults::DEFAULT_ACCELERATED_DECAY_FACTOR,
            dormant_score_threshold: defaults::DEFAULT_DORMANT_SCORE_THRESHOLD,
            momentum_reset: defaults::DEFAULT_MOMENTUM_RESET,
            momentum_decay_per_day: defaults::DEFAULT_MOMENTUM_DECAY_PER_DAY,
            resilience_min_rated: defaults::DEFAULT_RESILIENCE_MIN_RATED,
            resilience_positive_step: defaults::DEFAULT_RESILIENCE_POSITIVE_STEP,
            resilience_negative_step: defaults::DEFAULT_RESILIENCE_NEGATIVE_STEP,
        }
    }
}

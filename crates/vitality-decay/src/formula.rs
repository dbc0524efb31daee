use chrono::{DateTime, Utc};
use vitality_core::config::DecayConfig;
use vitality_core::models::Relationship;
use vitality_core::time::elapsed_days;

/// Evaluation context for decay.
#[derive(Debug, Clone, Copy)]
pub struct DecayContext {
    pub now: DateTime<Utc>,
}

impl Default for DecayContext {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

/// Days of contact gap tolerated before accelerated decay: the learned
/// window when present, else the tier default.
pub fn tolerance_days(relationship: &Relationship, config: &DecayConfig) -> f64 {
    relationship
        .tolerance_window_days
        .filter(|days| days.is_finite() && *days > 0.0)
        .unwrap_or_else(|| config.default_tolerance(relationship.tier))
}

/// Two-phase decay over `elapsed` days.
///
/// ```text
/// elapsed ≤ tolerance:  elapsed × rate × 0.5 / resilience
/// elapsed > tolerance:  tolerance × rate × 0.5 / resilience
///                     + (elapsed − tolerance) × rate × 1.5 / resilience
/// ```
///
/// Returns `(gentle, accelerated)` portions; both are non-negative.
pub fn decay_phases(
    relationship: &Relationship,
    elapsed: f64,
    config: &DecayConfig,
) -> (f64, f64) {
    let elapsed = elapsed.max(0.0);
    let rate = config.decay_rate(relationship.tier);
    let resilience = relationship.resilience.value();
    let tolerance = tolerance_days(relationship, config);

    if elapsed <= tolerance {
        (elapsed * rate * config.gentle_factor / resilience, 0.0)
    } else {
        let gentle = tolerance * rate * config.gentle_factor / resilience;
        let accelerated = (elapsed - tolerance) * rate * config.accelerated_factor / resilience;
        (gentle, accelerated)
    }
}

/// Total decay over `elapsed` days.
pub fn decay_amount(relationship: &Relationship, elapsed: f64, config: &DecayConfig) -> f64 {
    let (gentle, accelerated) = decay_phases(relationship, elapsed, config);
    gentle + accelerated
}

/// Present score. Never above the stored score and never below zero.
pub fn compute(relationship: &Relationship, ctx: &DecayContext, config: &DecayConfig) -> f64 {
    let elapsed = elapsed_days(relationship.last_updated, ctx.now);
    let decay = decay_amount(relationship, elapsed, config);
    (relationship.score.value() - decay).max(0.0)
}

/// Each phase of the decay, for debugging/observability.
#[derive(Debug, Clone)]
pub struct DecayBreakdown {
    pub stored_score: f64,
    pub elapsed_days: f64,
    pub tolerance_days: f64,
    pub gentle_decay: f64,
    pub accelerated_decay: f64,
    pub current_score: f64,
}

impl DecayBreakdown {
    pub fn beyond_tolerance(&self) -> bool {
        self.elapsed_days > self.tolerance_days
    }
}

/// Compute decay with a full breakdown of each phase.
pub fn compute_breakdown(
    relationship: &Relationship,
    ctx: &DecayContext,
    config: &DecayConfig,
) -> DecayBreakdown {
    let elapsed = elapsed_days(relationship.last_updated, ctx.now);
    let (gentle, accelerated) = decay_phases(relationship, elapsed, config);
    let stored = relationship.score.value();

    DecayBreakdown {
        stored_score: stored,
        elapsed_days: elapsed,
        tolerance_days: tolerance_days(relationship, config),
        gentle_decay: gentle,
        accelerated_decay: accelerated,
        current_score: (stored - gentle - accelerated).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use vitality_core::models::{Archetype, Tier, VitalityScore};

    fn rel(tier: Tier, score: f64) -> Relationship {
        let mut r = Relationship::new("r", "R", tier, Archetype::Sun, Utc::now());
        r.score = VitalityScore::new(score);
        r
    }

    #[test]
    fn learned_tolerance_overrides_tier_default() {
        let config = DecayConfig::default();
        let mut r = rel(Tier::Close, 50.0);
        assert_eq!(tolerance_days(&r, &config), 14.0);
        r.tolerance_window_days = Some(30.0);
        assert_eq!(tolerance_days(&r, &config), 30.0);
        r.tolerance_window_days = Some(f64::NAN);
        assert_eq!(tolerance_days(&r, &config), 14.0);
    }

    #[test]
    fn no_elapsed_time_means_no_decay() {
        let r = rel(Tier::Inner, 80.0);
        let ctx = DecayContext { now: r.last_updated };
        assert_eq!(compute(&r, &ctx, &DecayConfig::default()), 80.0);
    }

    #[test]
    fn clock_skew_does_not_add_points() {
        let r = rel(Tier::Inner, 80.0);
        let ctx = DecayContext {
            now: r.last_updated - Duration::days(5),
        };
        assert_eq!(compute(&r, &ctx, &DecayConfig::default()), 80.0);
    }

    #[test]
    fn breakdown_matches_compute() {
        let config = DecayConfig::default();
        let r = rel(Tier::Close, 70.0);
        let ctx = DecayContext {
            now: r.last_updated + Duration::days(20),
        };
        let b = compute_breakdown(&r, &ctx, &config);
        assert!(b.beyond_tolerance());
        assert!((b.current_score - compute(&r, &ctx, &config)).abs() < 1e-12);
        // 14 × 1.5 × 0.5 = 10.5 gentle, 6 × 1.5 × 1.5 = 13.5 accelerated.
        assert!((b.gentle_decay - 10.5).abs() < 1e-9);
        assert!((b.accelerated_decay - 13.5).abs() < 1e-9);
    }
}

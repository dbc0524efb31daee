use chrono::{DateTime, Utc};
use vitality_core::config::DecayConfig;
use vitality_core::models::Relationship;
use vitality_core::time::elapsed_days;

/// Momentum left after linear decay: `max(0, momentum − days × perDay)`.
pub fn current(relationship: &Relationship, now: DateTime<Utc>, config: &DecayConfig) -> f64 {
    let days = elapsed_days(relationship.momentum_updated, now);
    (relationship.momentum - days * config.momentum_decay_per_day).max(0.0)
}

/// Whether the momentum bonus applies at `now`.
pub fn is_active(relationship: &Relationship, now: DateTime<Utc>, config: &DecayConfig) -> bool {
    current(relationship, now, config) > 0.0
}

/// Restart the momentum window after a completed interaction.
pub fn reset(relationship: &mut Relationship, now: DateTime<Utc>, config: &DecayConfig) {
    relationship.momentum = config.momentum_reset;
    relationship.momentum_updated = now;
}

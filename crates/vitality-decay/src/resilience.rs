use vitality_core::config::DecayConfig;
use vitality_core::models::{Resilience, Vibe};

/// Slow resilience adaptation from a rated interaction.
///
/// Only moves once `rated_count` (including this interaction) reaches the
/// configured minimum: strongly positive vibes raise it, strongly negative
/// vibes lower it, everything else leaves it alone. Always clamped to
/// [0.8, 1.5].
pub fn adapt(current: Resilience, vibe: Vibe, rated_count: u32, config: &DecayConfig) -> Resilience {
    if rated_count < config.resilience_min_rated {
        return current;
    }
    if vibe.is_strongly_positive() {
        current.nudged(config.resilience_positive_step)
    } else if vibe.is_strongly_negative() {
        current.nudged(-config.resilience_negative_step)
    } else {
        current
    }
}

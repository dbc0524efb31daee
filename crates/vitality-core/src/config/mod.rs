//! Engine configuration, loadable from TOML. Every section and field is
//! optional; missing values take the defaults in [`defaults`].

mod decay_config;
pub mod defaults;
mod learning_config;
mod runtime_config;
mod scoring_config;

use serde::{Deserialize, Serialize};

pub use decay_config::DecayConfig;
pub use learning_config::{EffectivenessConfig, PatternConfig, ReciprocityConfig};
pub use runtime_config::{ObservabilityConfig, QueueConfig, StorageConfig};
pub use scoring_config::ScoringConfig;

use crate::errors::{VitalityError, VitalityResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalityConfig {
    pub decay: DecayConfig,
    pub scoring: ScoringConfig,
    pub pattern: PatternConfig,
    pub effectiveness: EffectivenessConfig,
    pub reciprocity: ReciprocityConfig,
    pub queue: QueueConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl VitalityConfig {
    /// Parse a TOML document. An empty document yields all defaults.
    pub fn from_toml(source: &str) -> VitalityResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| VitalityError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_file(path: &std::path::Path) -> VitalityResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            VitalityError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&source)
    }

    fn validate(&self) -> VitalityResult<()> {
        let rates = [
            self.decay.inner_decay_rate,
            self.decay.close_decay_rate,
            self.decay.community_decay_rate,
        ];
        if rates.iter().any(|r| *r < 0.0) {
            return Err(VitalityError::ConfigError(
                "decay rates must be non-negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.effectiveness.alpha) {
            return Err(VitalityError::ConfigError(format!(
                "effectiveness.alpha must be within [0, 1], got {}",
                self.effectiveness.alpha
            )));
        }
        if self.effectiveness.full_confidence_outcomes == 0 {
            return Err(VitalityError::ConfigError(
                "effectiveness.full_confidence_outcomes must be positive".into(),
            ));
        }
        if self.queue.max_attempts == 0 {
            return Err(VitalityError::ConfigError(
                "queue.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

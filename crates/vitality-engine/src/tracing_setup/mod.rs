//! Subscriber installation and span definitions.

pub mod spans;

use tracing_subscriber::EnvFilter;

use vitality_core::config::ObservabilityConfig;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "VITALITY_LOG";

/// Install the global subscriber. `VITALITY_LOG` wins over the configured
/// level. Returns `false` if a subscriber was already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logs {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

//! Background learning worker on a tokio interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::engine::VitalityEngine;

/// Drain the learning queue and mature outcomes every `interval`. Abort the
/// returned handle to stop. Storage work runs on the blocking pool.
pub fn spawn_learning_worker(engine: Arc<VitalityEngine>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let engine = Arc::clone(&engine);
            let tick = tokio::task::spawn_blocking(move || {
                let now = Utc::now();
                let tasks = engine.run_learning_tasks(now);
                let outcomes = engine.measure_outcomes(now);
                (tasks, outcomes)
            })
            .await;

            match tick {
                Ok((tasks, Ok(outcomes))) => {
                    debug!(?tasks, ?outcomes, "learning tick");
                }
                Ok((_, Err(e))) => warn!(error = %e, "outcome maturation pass failed"),
                Err(e) => warn!(error = %e, "learning tick panicked"),
            }
        }
    })
}

impl VitalityEngine {
    /// Worker interval from `queue.worker_interval_secs`.
    pub fn worker_interval(&self) -> Duration {
        Duration::from_secs(self.config.queue.worker_interval_secs.max(1))
    }
}

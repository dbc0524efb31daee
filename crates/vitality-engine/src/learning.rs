//! Post-commit learning: draining the task queue and maturing outcomes.
//!
//! Each task or outcome runs in its own write transaction under the
//! relationship's lock. Failures are logged and retried or recorded, never
//! surfaced to whoever logged the interaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use vitality_core::errors::{VitalityError, VitalityResult};
use vitality_core::models::InteractionOutcome;
use vitality_learning::CadenceAnalysis;

use crate::engine::{load_relationship, VitalityEngine};
use crate::locks::acquire;
use crate::queue::LearningTask;

/// Counts from one queue drain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningReport {
    pub succeeded: usize,
    pub retried: usize,
    pub failed: usize,
}

/// Counts from one outcome maturation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementReport {
    /// Outcomes marked measured by this pass.
    pub measured: usize,
    /// Of those, outcomes whose ratio was folded into the relationship.
    pub folded: usize,
    /// Outcomes measured concurrently by someone else.
    pub skipped: usize,
    pub errors: usize,
}

impl VitalityEngine {
    /// Run every queued task once. Failed tasks go back on the queue until
    /// they exhaust `queue.max_attempts`.
    pub fn run_learning_tasks(&self, now: DateTime<Utc>) -> LearningReport {
        let batch = self.queue.drain();
        let span = crate::learning_span!(batch.len());
        let _enter = span.enter();

        let mut report = LearningReport::default();
        for queued in batch {
            match self.run_task(&queued.task) {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    let error = VitalityError::LearningTaskFailed {
                        task: queued.task.name().to_string(),
                        reason: e.to_string(),
                    };
                    warn!(
                        relationship_id = %queued.task.relationship_id(),
                        attempt = queued.attempts + 1,
                        error = %error,
                        "learning task failed"
                    );
                    if self.queue.retry_or_fail(queued, error.to_string(), now) {
                        report.retried += 1;
                    } else {
                        report.failed += 1;
                    }
                }
            }
        }
        if report != LearningReport::default() {
            info!(?report, "learning batch finished");
        }
        report
    }

    fn run_task(&self, task: &LearningTask) -> VitalityResult<()> {
        match task {
            LearningTask::CaptureOutcome {
                relationship_id,
                interaction_id,
                category,
                score_before,
                expected_impact,
                captured_at,
            } => {
                let outcome = InteractionOutcome::capture(
                    relationship_id.as_str(),
                    interaction_id.as_str(),
                    *category,
                    *score_before,
                    *expected_impact,
                    *captured_at,
                );
                let tx = self.storage.begin_write()?;
                tx.insert_outcome(&outcome)?;
                tx.commit()
            }
            LearningTask::AnalyzePattern { relationship_id } => {
                self.analyze_pattern(relationship_id).map(|_| ())
            }
            LearningTask::UpdateReciprocity {
                relationship_id,
                initiator,
            } => self.update_initiation(relationship_id, *initiator).map(|_| ()),
        }
    }

    /// Re-learn a relationship's contact cadence from its history.
    pub fn analyze_pattern(
        &self,
        relationship_id: &str,
    ) -> VitalityResult<Option<CadenceAnalysis>> {
        let handle = self.locks.handle(relationship_id);
        let _guard = acquire(&handle);

        let tx = self.storage.begin_write()?;
        let mut relationship = load_relationship(&*tx, relationship_id)?;
        let history = tx.interactions_for(relationship_id)?;
        let Some(analysis) = self.patterns.analyze(&history) else {
            return Ok(None);
        };
        if self.patterns.apply(&mut relationship, &analysis) {
            tx.put_relationship(&relationship)?;
            tx.commit()?;
            debug!(
                relationship_id,
                typical_interval_days = analysis.average_interval_days,
                tolerance_window_days = ?analysis.tolerance_window_days,
                "cadence learned"
            );
        }
        Ok(Some(analysis))
    }

    /// Measure every outcome that has matured by `now`. Safe to run any
    /// number of times: each outcome is marked measured exactly once, in the
    /// same transaction that updates the relationship.
    pub fn measure_outcomes(&self, now: DateTime<Utc>) -> VitalityResult<MeasurementReport> {
        let cutoff = self.effectiveness.maturity_cutoff(now);
        let pending = self.storage.begin_read()?.pending_outcomes(cutoff)?;
        let span = crate::measurement_span!(pending.len());
        let _enter = span.enter();

        let mut report = MeasurementReport::default();
        for outcome in &pending {
            match self.measure_one(outcome, now) {
                Ok(Some(folded)) => {
                    report.measured += 1;
                    report.folded += usize::from(folded);
                }
                Ok(None) => report.skipped += 1,
                Err(e) => {
                    report.errors += 1;
                    warn!(outcome_id = %outcome.id, error = %e, "outcome measurement failed");
                }
            }
        }
        Ok(report)
    }

    /// `Ok(None)` when the outcome was already measured.
    fn measure_one(
        &self,
        outcome: &InteractionOutcome,
        now: DateTime<Utc>,
    ) -> VitalityResult<Option<bool>> {
        let handle = self.locks.handle(&outcome.relationship_id);
        let _guard = acquire(&handle);

        let tx = self.storage.begin_write()?;
        let mut relationship = load_relationship(&*tx, &outcome.relationship_id)?;
        let before = relationship.outcome_count;
        let measurement = self.effectiveness.learn(&mut relationship, outcome, now);

        if !tx.mark_outcome_measured(&outcome.id, now, measurement.actual_impact)? {
            return Ok(None);
        }
        let folded = relationship.outcome_count != before;
        if folded {
            tx.put_relationship(&relationship)?;
        }
        tx.commit()?;
        Ok(Some(folded))
    }
}

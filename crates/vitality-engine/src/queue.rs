//! FIFO of post-commit learning work with bounded retry.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitality_core::models::{Category, Initiator};

/// Work scheduled after an interaction log commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LearningTask {
    /// Persist the prediction an outcome will later be measured against.
    CaptureOutcome {
        relationship_id: String,
        interaction_id: String,
        category: Option<Category>,
        score_before: f64,
        expected_impact: f64,
        captured_at: DateTime<Utc>,
    },
    /// Re-learn the contact cadence.
    AnalyzePattern { relationship_id: String },
    /// Tally who initiated.
    UpdateReciprocity {
        relationship_id: String,
        initiator: Initiator,
    },
}

impl LearningTask {
    pub fn name(&self) -> &'static str {
        match self {
            LearningTask::CaptureOutcome { .. } => "capture-outcome",
            LearningTask::AnalyzePattern { .. } => "analyze-pattern",
            LearningTask::UpdateReciprocity { .. } => "update-reciprocity",
        }
    }

    pub fn relationship_id(&self) -> &str {
        match self {
            LearningTask::CaptureOutcome {
                relationship_id, ..
            }
            | LearningTask::AnalyzePattern { relationship_id }
            | LearningTask::UpdateReciprocity {
                relationship_id, ..
            } => relationship_id,
        }
    }
}

/// A task that ran out of attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFailure {
    pub task: LearningTask,
    pub attempts: u32,
    pub last_error: String,
    pub failed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct QueuedTask {
    pub task: LearningTask,
    pub attempts: u32,
}

#[derive(Debug)]
pub struct LearningQueue {
    pending: Mutex<VecDeque<QueuedTask>>,
    failures: Mutex<Vec<TaskFailure>>,
    max_attempts: u32,
}

impl LearningQueue {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            failures: Mutex::new(Vec::new()),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn push(&self, task: LearningTask) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(QueuedTask { task, attempts: 0 });
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of pending tasks, front first.
    pub fn pending(&self) -> Vec<LearningTask> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|q| q.task.clone())
            .collect()
    }

    /// Tasks that exhausted their attempts.
    pub fn failures(&self) -> Vec<TaskFailure> {
        self.failures.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Take every task queued right now. Tasks pushed while the batch runs
    /// wait for the next one.
    pub(crate) fn drain(&self) -> Vec<QueuedTask> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }

    /// Requeue a failed task, or record it as failed once attempts run out.
    /// Returns `true` when the task was requeued.
    pub(crate) fn retry_or_fail(
        &self,
        mut queued: QueuedTask,
        error: String,
        now: DateTime<Utc>,
    ) -> bool {
        queued.attempts += 1;
        if queued.attempts < self.max_attempts {
            self.pending
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push_back(queued);
            return true;
        }
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(TaskFailure {
                task: queued.task,
                attempts: queued.attempts,
                last_error: error,
                failed_at: now,
            });
        false
    }
}

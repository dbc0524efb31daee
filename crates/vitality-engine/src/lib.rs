//! # vitality-engine
//!
//! Orchestrates the decay, scoring, learning, and milestone crates over a
//! transactional store. [`VitalityEngine::log_interaction`] is the only
//! entry point that mutates scores; learned parameters are updated by the
//! [`LearningQueue`] after the primary write commits.

pub mod engine;
pub mod learning;
pub mod locks;
pub mod queue;
pub mod tracing_setup;
pub mod weave;
pub mod worker;

pub use engine::VitalityEngine;
pub use learning::{LearningReport, MeasurementReport};
pub use queue::{LearningQueue, LearningTask, TaskFailure};
pub use weave::{LoggedInteraction, ScoreUpdate};
pub use worker::spawn_learning_worker;

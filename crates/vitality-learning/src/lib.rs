//! # vitality-learning
//!
//! Learners that tune a relationship's parameters from its history:
//! natural contact cadence (tolerance window), realized vs. predicted
//! interaction impact (effectiveness ratios), and who initiates contact.

pub mod effectiveness;
pub mod pattern;
pub mod reciprocity;

pub use effectiveness::{EffectivenessLearner, Measurement};
pub use pattern::{CadenceAnalysis, PatternLearner};
pub use reciprocity::{ReciprocityBalance, ReciprocitySummary, ReciprocityTracker};

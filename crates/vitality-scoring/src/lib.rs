//! # vitality-scoring
//!
//! Points awarded for a new interaction: base points by category, scaled by
//! archetype affinity, duration, vibe, occasion, group size, interaction
//! quality, learned effectiveness, and momentum.

pub mod engine;
pub mod formula;
pub mod quality;
pub mod tables;

pub use engine::ScoringModel;
pub use formula::{PointsBreakdown, ScoringContext};
pub use quality::QualityAssessment;

//! # vitality-decay
//!
//! Computes a relationship's present score from its stored score and the
//! time elapsed since it was written. Decay is gentle while contact stays
//! inside the relationship's tolerance window and accelerates past it.
//! Also owns the short-lived momentum bonus, resilience adaptation, and the
//! dormancy trigger.

pub mod dormancy;
pub mod engine;
pub mod formula;
pub mod momentum;
pub mod resilience;

pub use dormancy::DormancyDecision;
pub use engine::DecayModel;
pub use formula::{DecayBreakdown, DecayContext};

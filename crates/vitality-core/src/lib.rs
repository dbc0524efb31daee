//! # vitality-core
//!
//! Foundation crate for the relationship vitality engine.
//! Defines all models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod time;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VitalityConfig;
pub use errors::{VitalityError, VitalityResult};
pub use models::{
    ActivityType, Archetype, BadgeScope, BadgeUnlock, Category, EventImportance, Initiator,
    Interaction, InteractionAttributes, InteractionDuration, InteractionOutcome,
    InteractionStatus, Relationship, Resilience, Tier, Vibe, VitalityScore,
};

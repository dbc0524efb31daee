mod badge;
mod enums;
mod interaction;
mod outcome;
mod relationship;
mod score;

pub use badge::{BadgeScope, BadgeUnlock};
pub use enums::{
    ActivityType, Archetype, Category, EventImportance, Initiator, InteractionDuration,
    InteractionStatus, Tier, Vibe,
};
pub use interaction::{Interaction, InteractionAttributes, StructuredReflection};
pub use outcome::InteractionOutcome;
pub use relationship::{InitiationCounts, Relationship};
pub use score::{Resilience, VitalityScore};

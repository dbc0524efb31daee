use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{
    ActivityType, Category, EventImportance, Initiator, InteractionDuration, InteractionStatus,
    Vibe,
};
use crate::constants::NOTE_DEPTH_LONG;

/// Guided reflection captured after an interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StructuredReflection {
    /// Selected reflection prompts ("we laughed a lot", "talked about work", ...).
    pub chips: Vec<String>,
    pub custom_notes: Option<String>,
}

/// Everything the caller supplies about an interaction. Optional fields fall
/// back to neutral defaults during scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InteractionAttributes {
    pub date: DateTime<Utc>,
    pub status: InteractionStatus,
    pub category: Option<Category>,
    pub legacy_type: Option<ActivityType>,
    pub duration: Option<InteractionDuration>,
    pub vibe: Option<Vibe>,
    pub note: Option<String>,
    pub reflection: Option<StructuredReflection>,
    /// Number of friends present. Zero is treated as one.
    pub group_size: u32,
    pub event_importance: Option<EventImportance>,
    pub initiator: Option<Initiator>,
}

impl InteractionAttributes {
    /// A completed interaction with every optional attribute unset.
    pub fn completed(date: DateTime<Utc>) -> Self {
        Self {
            date,
            status: InteractionStatus::Completed,
            category: None,
            legacy_type: None,
            duration: None,
            vibe: None,
            note: None,
            reflection: None,
            group_size: 1,
            event_importance: None,
            initiator: None,
        }
    }

    /// A planned interaction with every optional attribute unset.
    pub fn planned(date: DateTime<Utc>) -> Self {
        Self {
            status: InteractionStatus::Planned,
            ..Self::completed(date)
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_vibe(mut self, vibe: Vibe) -> Self {
        self.vibe = Some(vibe);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_group_size(mut self, group_size: u32) -> Self {
        self.group_size = group_size;
        self
    }

    /// Category used for lookups: the explicit category, else the category
    /// the legacy activity type maps onto.
    pub fn effective_category(&self) -> Option<Category> {
        self.category
            .or_else(|| self.legacy_type.map(ActivityType::as_category))
    }

    /// Group size, never below one.
    pub fn participants(&self) -> u32 {
        self.group_size.max(1)
    }

    pub fn note_len(&self) -> usize {
        self.note.as_deref().map(|n| n.chars().count()).unwrap_or(0)
    }

    /// A "deep" weave carries a structured reflection or a long note.
    pub fn is_deep(&self) -> bool {
        self.reflection.is_some() || self.note_len() > NOTE_DEPTH_LONG
    }

    pub fn is_completed(&self) -> bool {
        self.status == InteractionStatus::Completed
    }
}

/// A logged interaction. Immutable apart from the planned → completed
/// status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interaction {
    pub id: String,
    pub attributes: InteractionAttributes,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(attributes: InteractionAttributes, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            attributes,
            created_at: now,
        }
    }
}

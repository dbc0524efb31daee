//! Closed vocabularies. Every lookup table in the engine is a `match` over
//! one of these, so a new variant fails to compile until it is scored.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Coarse closeness class; sets the base decay rate and default tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Tier {
    Inner,
    Close,
    Community,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Inner, Tier::Close, Tier::Community];
}

/// Behavioral archetype of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Archetype {
    Emperor,
    Empress,
    HighPriestess,
    Fool,
    Sun,
    Hermit,
    Magician,
}

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Archetype::Emperor,
        Archetype::Empress,
        Archetype::HighPriestess,
        Archetype::Fool,
        Archetype::Sun,
        Archetype::Hermit,
        Archetype::Magician,
    ];
}

/// What kind of interaction took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Category {
    TextCall,
    VoiceNote,
    MealDrink,
    Hangout,
    DeepTalk,
    EventParty,
    ActivityHobby,
    Support,
    Celebration,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::TextCall,
        Category::VoiceNote,
        Category::MealDrink,
        Category::Hangout,
        Category::DeepTalk,
        Category::EventParty,
        Category::ActivityHobby,
        Category::Support,
        Category::Celebration,
    ];
}

/// Activity types recorded before categories existed. Still accepted on
/// input; each maps onto the category whose affinities it shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ActivityType {
    Call,
    Text,
    Meal,
    Coffee,
    Walk,
    Party,
    Workout,
}

impl ActivityType {
    pub fn as_category(self) -> Category {
        match self {
            ActivityType::Call | ActivityType::Text => Category::TextCall,
            ActivityType::Meal | ActivityType::Coffee => Category::MealDrink,
            ActivityType::Walk | ActivityType::Workout => Category::ActivityHobby,
            ActivityType::Party => Category::EventParty,
        }
    }
}

/// How long the interaction lasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum InteractionDuration {
    Quick,
    #[default]
    Standard,
    Extended,
}

/// Emotional outcome of a completed interaction, least to most positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Vibe {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
}

impl Vibe {
    /// Vibe assumed for scoring when none was recorded.
    pub const NEUTRAL: Vibe = Vibe::WaxingCrescent;

    pub fn is_strongly_positive(self) -> bool {
        self == Vibe::FullMoon
    }

    pub fn is_strongly_negative(self) -> bool {
        self == Vibe::NewMoon
    }
}

/// Importance of the occasion behind an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum EventImportance {
    Low,
    Medium,
    High,
    Critical,
}

/// Who reached out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Initiator {
    /// The account owner.
    #[serde(rename = "self")]
    User,
    /// The friend.
    #[serde(rename = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum InteractionStatus {
    Planned,
    Completed,
}

macro_rules! impl_wire_name {
    ($($ty:ty),* $(,)?) => {$(
        impl $ty {
            /// Wire name as used in serialized form and storage columns.
            pub fn wire_name(&self) -> String {
                serde_json::to_value(self)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default()
            }

            /// Parse a wire name.
            pub fn parse(name: &str) -> Option<Self> {
                serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
            }
        }
    )*};
}

impl_wire_name!(
    Tier,
    Archetype,
    Category,
    ActivityType,
    InteractionDuration,
    Vibe,
    EventImportance,
    Initiator,
    InteractionStatus,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        assert_eq!(Category::DeepTalk.wire_name(), "deep-talk");
        assert_eq!(Archetype::parse("high-priestess"), Some(Archetype::HighPriestess));
        assert_eq!(Initiator::User.wire_name(), "self");
        assert_eq!(Initiator::parse("other"), Some(Initiator::Other));
        assert_eq!(Tier::parse("bogus"), None);
    }

    #[test]
    fn vibes_are_ordered_by_positivity() {
        assert!(Vibe::NewMoon < Vibe::WaxingCrescent);
        assert!(Vibe::WaxingGibbous < Vibe::FullMoon);
        assert!(Vibe::FullMoon.is_strongly_positive());
        assert!(Vibe::NewMoon.is_strongly_negative());
        assert!(!Vibe::NEUTRAL.is_strongly_negative());
    }

    #[test]
    fn legacy_types_map_onto_categories() {
        assert_eq!(ActivityType::Coffee.as_category(), Category::MealDrink);
        assert_eq!(ActivityType::Party.as_category(), Category::EventParty);
    }
}

//! Static lookup tables. Each is an exhaustive `match`.

use vitality_core::models::{
    ActivityType, Archetype, Category, EventImportance, InteractionDuration, Vibe,
};

/// Base points per category.
pub fn category_base_score(category: Category) -> f64 {
    match category {
        Category::TextCall => 10.0,
        Category::VoiceNote => 12.0,
        Category::MealDrink => 22.0,
        Category::Hangout => 20.0,
        Category::DeepTalk => 28.0,
        Category::EventParty => 17.0,
        Category::ActivityHobby => 25.0,
        Category::Support => 24.0,
        Category::Celebration => 26.0,
    }
}

/// Base points for legacy activity types.
pub fn legacy_base_score(activity: ActivityType) -> f64 {
    match activity {
        ActivityType::Call => 12.0,
        ActivityType::Text => 8.0,
        ActivityType::Meal => 22.0,
        ActivityType::Coffee => 18.0,
        ActivityType::Walk => 18.0,
        ActivityType::Party => 16.0,
        ActivityType::Workout => 20.0,
    }
}

/// How strongly an archetype responds to a category.
pub fn archetype_affinity(archetype: Archetype, category: Category) -> f64 {
    use Category::*;
    match archetype {
        Archetype::Emperor => match category {
            TextCall => 0.9,
            VoiceNote => 0.8,
            MealDrink => 1.2,
            Hangout => 1.0,
            DeepTalk => 1.1,
            EventParty => 1.0,
            ActivityHobby => 1.3,
            Support => 1.1,
            Celebration => 1.2,
        },
        Archetype::Empress => match category {
            TextCall => 1.0,
            VoiceNote => 1.1,
            MealDrink => 1.5,
            Hangout => 1.3,
            DeepTalk => 1.2,
            EventParty => 1.1,
            ActivityHobby => 1.0,
            Support => 1.4,
            Celebration => 1.3,
        },
        Archetype::HighPriestess => match category {
            TextCall => 0.9,
            VoiceNote => 1.1,
            MealDrink => 1.1,
            Hangout => 1.0,
            DeepTalk => 1.8,
            EventParty => 0.6,
            ActivityHobby => 0.9,
            Support => 1.3,
            Celebration => 1.0,
        },
        Archetype::Fool => match category {
            TextCall => 1.1,
            VoiceNote => 1.2,
            MealDrink => 1.1,
            Hangout => 1.4,
            DeepTalk => 0.8,
            EventParty => 1.6,
            ActivityHobby => 1.5,
            Support => 0.9,
            Celebration => 1.3,
        },
        Archetype::Sun => match category {
            TextCall => 1.0,
            VoiceNote => 1.0,
            MealDrink => 1.3,
            Hangout => 1.2,
            DeepTalk => 1.0,
            EventParty => 1.8,
            ActivityHobby => 1.2,
            Support => 1.0,
            Celebration => 1.6,
        },
        Archetype::Hermit => match category {
            TextCall => 0.8,
            VoiceNote => 1.2,
            MealDrink => 1.0,
            Hangout => 0.9,
            DeepTalk => 1.7,
            EventParty => 0.5,
            ActivityHobby => 1.1,
            Support => 1.2,
            Celebration => 0.8,
        },
        Archetype::Magician => match category {
            TextCall => 1.0,
            VoiceNote => 1.0,
            MealDrink => 1.1,
            Hangout => 1.1,
            DeepTalk => 1.3,
            EventParty => 1.0,
            ActivityHobby => 1.6,
            Support => 1.1,
            Celebration => 1.2,
        },
    }
}

pub fn duration_modifier(duration: InteractionDuration) -> f64 {
    match duration {
        InteractionDuration::Quick => 0.8,
        InteractionDuration::Standard => 1.0,
        InteractionDuration::Extended => 1.2,
    }
}

pub fn vibe_multiplier(vibe: Vibe) -> f64 {
    match vibe {
        Vibe::NewMoon => 0.9,
        Vibe::WaxingCrescent => 1.0,
        Vibe::FirstQuarter => 1.1,
        Vibe::WaxingGibbous => 1.2,
        Vibe::FullMoon => 1.3,
    }
}

/// Per-person share of the points when `n` friends are present.
/// Non-increasing in `n`.
pub fn group_dilution(n: u32) -> f64 {
    match n {
        0 | 1 => 1.0,
        2 => 0.9,
        3..=4 => 0.7,
        5..=7 => 0.5,
        _ => 0.3,
    }
}

/// Occasion boost for celebrations, support, and important deep talks.
pub fn event_multiplier(category: Option<Category>, importance: Option<EventImportance>) -> f64 {
    use EventImportance::*;
    match (category, importance) {
        (Some(Category::Celebration), Some(Critical)) => 1.5,
        (Some(Category::Celebration), Some(High)) => 1.3,
        (Some(Category::Celebration), Some(Medium)) => 1.2,
        (Some(Category::Celebration), _) => 1.1,
        (Some(Category::Support), Some(Critical)) => 1.4,
        (Some(Category::Support), Some(High)) => 1.3,
        (Some(Category::Support), Some(Medium)) => 1.2,
        (Some(Category::DeepTalk), Some(High | Critical)) => 1.2,
        _ => 1.0,
    }
}

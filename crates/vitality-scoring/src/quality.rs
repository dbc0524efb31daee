//! Depth / energy / overall quality of a single interaction, each 1–5.

use serde::{Deserialize, Serialize};
use vitality_core::constants::{NOTE_DEPTH_LONG, NOTE_DEPTH_SHORT};
use vitality_core::models::{InteractionAttributes, InteractionDuration, Vibe};

const MIN_LEVEL: u8 = 1;
const MAX_LEVEL: u8 = 5;
const NEUTRAL_ENERGY: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub depth: u8,
    pub energy: u8,
    pub overall: u8,
}

/// Energy a vibe starts from before the duration adjustment.
pub fn vibe_energy(vibe: Vibe) -> u8 {
    match vibe {
        Vibe::NewMoon => 2,
        Vibe::WaxingCrescent => 3,
        Vibe::FirstQuarter => 3,
        Vibe::WaxingGibbous => 4,
        Vibe::FullMoon => 5,
    }
}

/// Depth: 1, +1 for a note over 50 chars, +1 more over 150, +2 for a
/// structured reflection; capped at 5.
pub fn depth(attributes: &InteractionAttributes) -> u8 {
    let note_len = attributes.note_len();
    let mut depth = MIN_LEVEL;
    if note_len > NOTE_DEPTH_SHORT {
        depth += 1;
    }
    if note_len > NOTE_DEPTH_LONG {
        depth += 1;
    }
    if attributes.reflection.is_some() {
        depth += 2;
    }
    depth.min(MAX_LEVEL)
}

/// Energy: vibe base (3 when unrated), +1 extended, −1 quick; clamped 1–5.
pub fn energy(attributes: &InteractionAttributes) -> u8 {
    let base = attributes.vibe.map(vibe_energy).unwrap_or(NEUTRAL_ENERGY) as i16;
    let adjusted = match attributes.duration.unwrap_or_default() {
        InteractionDuration::Extended => base + 1,
        InteractionDuration::Quick => base - 1,
        InteractionDuration::Standard => base,
    };
    adjusted.clamp(MIN_LEVEL as i16, MAX_LEVEL as i16) as u8
}

/// Assess an interaction. Never fails; missing attributes use defaults.
pub fn assess(attributes: &InteractionAttributes) -> QualityAssessment {
    let depth = depth(attributes);
    let energy = energy(attributes);
    let overall = ((depth + energy) as f64 / 2.0).round() as u8;
    QualityAssessment {
        depth,
        energy,
        overall,
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitality_core::config::{EffectivenessConfig, ScoringConfig};
use vitality_core::constants::FALLBACK_BASE_SCORE;
use vitality_core::models::{Category, InteractionAttributes, Relationship, Vibe};
use vitality_decay::DecayModel;

use crate::quality::{self, QualityAssessment};
use crate::tables;

/// Evaluation context for scoring.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    pub now: DateTime<Utc>,
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

/// Every factor behind an interaction's points, for debugging/observability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub base: f64,
    pub archetype_multiplier: f64,
    pub duration_modifier: f64,
    pub vibe_multiplier: f64,
    pub event_multiplier: f64,
    pub group_dilution: f64,
    /// `base × archetype × duration × vibe × event × dilution`.
    pub raw: f64,
    pub quality: QualityAssessment,
    pub quality_multiplier: f64,
    /// `adjustedDilution / dilution` for high-quality group weaves, else 1.0.
    pub dilution_restoration: f64,
    pub effectiveness: f64,
    pub momentum_multiplier: f64,
    pub points: f64,
}

/// Base points: category table, else legacy type table, else the fallback.
pub fn base_score(attributes: &InteractionAttributes) -> f64 {
    match (attributes.category, attributes.legacy_type) {
        (Some(category), _) => tables::category_base_score(category),
        (None, Some(legacy)) => tables::legacy_base_score(legacy),
        (None, None) => FALLBACK_BASE_SCORE,
    }
}

/// `0.7 + (overall / 5) × 0.6`, within [0.7, 1.3] for overall in 0..=5.
pub fn quality_multiplier(overall: u8, config: &ScoringConfig) -> f64 {
    config.quality_multiplier_floor + (overall as f64 / 5.0) * config.quality_multiplier_span
}

/// Give back part of the dilution loss: `d + (1 − d) × fraction`.
pub fn restored_dilution(dilution: f64, config: &ScoringConfig) -> f64 {
    dilution + (1.0 - dilution) * config.dilution_restore_fraction
}

/// Confidence-blended learned effectiveness.
///
/// Exactly 1.0 until `outcome_count` reaches the minimum; then
/// `(1 − c) + learned × c` with `c = min(1, outcomes / full_confidence)`.
pub fn effectiveness_multiplier(
    relationship: &Relationship,
    category: Option<Category>,
    config: &EffectivenessConfig,
) -> f64 {
    if relationship.outcome_count < config.min_outcomes {
        return 1.0;
    }
    let confidence = (relationship.outcome_count as f64
        / config.full_confidence_outcomes.max(1) as f64)
        .min(1.0);
    let learned = category
        .map(|c| relationship.learned_ratio(c))
        .unwrap_or(1.0);
    (1.0 - confidence) + learned * confidence
}

/// Compute the point delta for an interaction with a full breakdown.
pub fn compute_breakdown(
    relationship: &Relationship,
    attributes: &InteractionAttributes,
    ctx: &ScoringContext,
    scoring: &ScoringConfig,
    effectiveness: &EffectivenessConfig,
    decay: &DecayModel,
) -> PointsBreakdown {
    let category = attributes.effective_category();

    let base = base_score(attributes);
    let archetype_multiplier = category
        .map(|c| tables::archetype_affinity(relationship.archetype, c))
        .unwrap_or(1.0);
    let duration_modifier = tables::duration_modifier(attributes.duration.unwrap_or_default());
    let vibe_multiplier = tables::vibe_multiplier(attributes.vibe.unwrap_or(Vibe::NEUTRAL));
    let event_multiplier = tables::event_multiplier(category, attributes.event_importance);
    let group_size = attributes.participants();
    let group_dilution = tables::group_dilution(group_size);

    let raw = base
        * archetype_multiplier
        * duration_modifier
        * vibe_multiplier
        * event_multiplier
        * group_dilution;

    let quality = quality::assess(attributes);
    let quality_multiplier = quality_multiplier(quality.overall, scoring);

    let dilution_restoration =
        if group_size > 1 && quality.overall >= scoring.dilution_restore_min_quality {
            restored_dilution(group_dilution, scoring) / group_dilution
        } else {
            1.0
        };

    let mut points = raw * quality_multiplier * dilution_restoration;

    let effectiveness = effectiveness_multiplier(relationship, category, effectiveness);
    points *= effectiveness;

    let momentum_multiplier = if decay.momentum_active(relationship, ctx.now) {
        scoring.momentum_bonus
    } else {
        1.0
    };
    points *= momentum_multiplier;

    PointsBreakdown {
        base,
        archetype_multiplier,
        duration_modifier,
        vibe_multiplier,
        event_multiplier,
        group_dilution,
        raw,
        quality,
        quality_multiplier,
        dilution_restoration,
        effectiveness,
        momentum_multiplier,
        points,
    }
}

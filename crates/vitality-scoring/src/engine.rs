use chrono::{DateTime, Utc};
use vitality_core::config::{EffectivenessConfig, ScoringConfig, VitalityConfig};
use vitality_core::models::{InteractionAttributes, Relationship, VitalityScore};
use vitality_decay::DecayModel;

use crate::formula::{self, PointsBreakdown, ScoringContext};
use crate::quality::{self, QualityAssessment};

/// Interaction scoring model. Pure: reads the relationship, never mutates it.
#[derive(Debug, Clone, Default)]
pub struct ScoringModel {
    scoring: ScoringConfig,
    effectiveness: EffectivenessConfig,
    decay: DecayModel,
}

impl ScoringModel {
    pub fn new(scoring: ScoringConfig, effectiveness: EffectivenessConfig, decay: DecayModel) -> Self {
        Self {
            scoring,
            effectiveness,
            decay,
        }
    }

    pub fn from_config(config: &VitalityConfig) -> Self {
        Self::new(
            config.scoring.clone(),
            config.effectiveness.clone(),
            DecayModel::new(config.decay.clone()),
        )
    }

    pub fn decay(&self) -> &DecayModel {
        &self.decay
    }

    pub fn assess_quality(&self, attributes: &InteractionAttributes) -> QualityAssessment {
        quality::assess(attributes)
    }

    /// Raw point delta for an interaction. The caller adds it to the current
    /// decayed score and clamps (see [`ScoringModel::apply`]).
    pub fn points_for_interaction(
        &self,
        relationship: &Relationship,
        attributes: &InteractionAttributes,
        now: DateTime<Utc>,
    ) -> f64 {
        self.breakdown(relationship, attributes, now).points
    }

    pub fn breakdown(
        &self,
        relationship: &Relationship,
        attributes: &InteractionAttributes,
        now: DateTime<Utc>,
    ) -> PointsBreakdown {
        formula::compute_breakdown(
            relationship,
            attributes,
            &ScoringContext { now },
            &self.scoring,
            &self.effectiveness,
            &self.decay,
        )
    }

    /// Learned effectiveness multiplier the model would apply.
    pub fn effectiveness_multiplier(
        &self,
        relationship: &Relationship,
        attributes: &InteractionAttributes,
    ) -> f64 {
        formula::effectiveness_multiplier(
            relationship,
            attributes.effective_category(),
            &self.effectiveness,
        )
    }

    /// New stored score: `clamp(score_before + delta, 0, 100)`.
    pub fn apply(&self, score_before: f64, delta: f64) -> VitalityScore {
        VitalityScore::new(score_before + delta)
    }
}

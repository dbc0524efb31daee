use vitality_core::models::Relationship;

/// Dormancy eligibility check.
///
/// A relationship goes dormant once its current (decayed) score falls to or
/// below the dormancy threshold. Relationships already dormant are skipped;
/// only a new completed interaction brings them back.
pub fn should_go_dormant(current_score: f64, threshold: f64) -> bool {
    current_score <= threshold
}

/// Dormancy decision with metadata for logging.
#[derive(Debug, Clone)]
pub struct DormancyDecision {
    pub relationship_id: String,
    pub should_go_dormant: bool,
    pub current_score: f64,
    pub threshold: f64,
    pub reason: String,
}

/// Evaluate dormancy for a relationship.
pub fn evaluate(relationship: &Relationship, current_score: f64, threshold: f64) -> DormancyDecision {
    if relationship.dormant {
        return DormancyDecision {
            relationship_id: relationship.id.clone(),
            should_go_dormant: false,
            current_score,
            threshold,
            reason: "already dormant".to_string(),
        };
    }

    let dormant = should_go_dormant(current_score, threshold);
    let reason = if dormant {
        format!(
            "score {:.2} at or below threshold {:.2} for tier {:?}",
            current_score, threshold, relationship.tier
        )
    } else {
        "score above threshold".to_string()
    };

    DormancyDecision {
        relationship_id: relationship.id.clone(),
        should_go_dormant: dormant,
        current_score,
        threshold,
        reason,
    }
}

//! Interaction logging: the only path that moves scores.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vitality_core::errors::{VitalityError, VitalityResult};
use vitality_core::models::{
    BadgeUnlock, Interaction, InteractionAttributes, InteractionStatus, Relationship,
};
use vitality_core::traits::Transaction;
use vitality_milestones::Trigger;

use crate::engine::{load_relationship, VitalityEngine};
use crate::queue::LearningTask;

/// Score change applied to one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub relationship_id: String,
    /// Decayed score just before the interaction.
    pub score_before: f64,
    pub points: f64,
    pub score_after: f64,
    /// The relationship was dormant and this interaction revived it.
    pub revived: bool,
}

/// Receipt for a logged (or completed) interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedInteraction {
    pub interaction_id: String,
    /// Empty for planned interactions.
    pub updates: Vec<ScoreUpdate>,
    /// Badges unlocked by this interaction, relationship and global.
    pub unlocks: Vec<BadgeUnlock>,
}

impl VitalityEngine {
    /// Record an interaction with every participant in one transaction.
    ///
    /// Planned interactions are only linked. Completed ones rescore each
    /// participant, reset momentum, clear dormancy, adapt resilience, and
    /// award badges before the commit; learning work is queued after it.
    pub fn log_interaction(
        &self,
        participant_ids: &[String],
        attributes: InteractionAttributes,
        now: DateTime<Utc>,
    ) -> VitalityResult<LoggedInteraction> {
        let ids = distinct(participant_ids)?;
        let span = crate::weave_span!(ids.len());
        let _enter = span.enter();

        let tx = self.storage.begin_write()?;
        let participants = ids
            .iter()
            .map(|id| load_relationship(&*tx, id))
            .collect::<VitalityResult<Vec<_>>>()?;

        let interaction = Interaction::new(attributes, now);
        tx.insert_interaction(&interaction, &ids)?;

        if !interaction.attributes.is_completed() {
            tx.commit()?;
            debug!(interaction_id = %interaction.id, "planned interaction linked");
            return Ok(LoggedInteraction {
                interaction_id: interaction.id,
                updates: Vec::new(),
                unlocks: Vec::new(),
            });
        }

        let (updates, unlocks) = self.apply_completed(&*tx, &interaction, participants, now)?;
        tx.commit()?;
        self.enqueue_learning(&interaction, &updates, now);

        info!(
            interaction_id = %interaction.id,
            participants = updates.len(),
            unlocks = unlocks.len(),
            "interaction logged"
        );
        Ok(LoggedInteraction {
            interaction_id: interaction.id,
            updates,
            unlocks,
        })
    }

    /// Turn a planned interaction into a completed one and score it exactly
    /// as if it had been logged completed now.
    pub fn complete_planned_interaction(
        &self,
        interaction_id: &str,
        now: DateTime<Utc>,
    ) -> VitalityResult<LoggedInteraction> {
        let tx = self.storage.begin_write()?;
        let mut interaction = tx.get_interaction(interaction_id)?.ok_or_else(|| {
            VitalityError::InteractionNotFound {
                id: interaction_id.to_string(),
            }
        })?;
        if interaction.attributes.is_completed() {
            return Err(VitalityError::ValidationError(format!(
                "interaction {interaction_id} is already completed"
            )));
        }

        tx.set_interaction_status(interaction_id, InteractionStatus::Completed)?;
        interaction.attributes.status = InteractionStatus::Completed;

        let participants = tx
            .participants_of(interaction_id)?
            .iter()
            .map(|id| load_relationship(&*tx, id))
            .collect::<VitalityResult<Vec<_>>>()?;

        let (updates, unlocks) = self.apply_completed(&*tx, &interaction, participants, now)?;
        tx.commit()?;
        self.enqueue_learning(&interaction, &updates, now);

        info!(interaction_id, participants = updates.len(), "planned interaction completed");
        Ok(LoggedInteraction {
            interaction_id: interaction.id,
            updates,
            unlocks,
        })
    }

    /// Score every participant and award badges inside the caller's
    /// transaction.
    fn apply_completed(
        &self,
        tx: &dyn Transaction,
        interaction: &Interaction,
        participants: Vec<Relationship>,
        now: DateTime<Utc>,
    ) -> VitalityResult<(Vec<ScoreUpdate>, Vec<BadgeUnlock>)> {
        let attrs = &interaction.attributes;
        let mut updates = Vec::with_capacity(participants.len());
        let mut unlocks = Vec::new();

        for mut relationship in participants {
            let score_before = self.decay.current_score(&relationship, now);
            let points = self.scoring.points_for_interaction(&relationship, attrs, now);
            let revived = relationship.dormant;

            relationship.score = self.scoring.apply(score_before, points);
            relationship.last_updated = now;
            self.decay.reset_momentum(&mut relationship, now);
            relationship.dormant = false;
            relationship.dormant_since = None;
            if let Some(vibe) = attrs.vibe {
                relationship.rated_interaction_count += 1;
                relationship.resilience = self.decay.adapt_resilience(
                    relationship.resilience,
                    vibe,
                    relationship.rated_interaction_count,
                );
            }
            tx.put_relationship(&relationship)?;

            debug!(
                relationship_id = %relationship.id,
                score_before,
                points,
                score_after = relationship.score.value(),
                revived,
                "participant rescored"
            );

            let trigger = Trigger {
                interaction,
                revived,
            };
            unlocks.extend(self.award_relationship(
                tx,
                &relationship,
                Some(trigger),
                Some(&interaction.id),
                now,
            )?);

            updates.push(ScoreUpdate {
                relationship_id: relationship.id.clone(),
                score_before,
                points,
                score_after: relationship.score.value(),
                revived,
            });
        }

        unlocks.extend(self.award_global(tx, Some(&interaction.id), now)?);
        Ok((updates, unlocks))
    }

    fn enqueue_learning(
        &self,
        interaction: &Interaction,
        updates: &[ScoreUpdate],
        now: DateTime<Utc>,
    ) {
        let attrs = &interaction.attributes;
        for update in updates {
            self.queue.push(LearningTask::CaptureOutcome {
                relationship_id: update.relationship_id.clone(),
                interaction_id: interaction.id.clone(),
                category: attrs.effective_category(),
                score_before: update.score_before,
                expected_impact: update.points,
                captured_at: now,
            });
            self.queue.push(LearningTask::AnalyzePattern {
                relationship_id: update.relationship_id.clone(),
            });
            if let Some(initiator) = attrs.initiator {
                self.queue.push(LearningTask::UpdateReciprocity {
                    relationship_id: update.relationship_id.clone(),
                    initiator,
                });
            }
        }
    }
}

/// Participant ids, deduplicated in first-seen order. At least one is
/// required.
fn distinct(participant_ids: &[String]) -> VitalityResult<Vec<String>> {
    let mut seen = BTreeSet::new();
    let ids: Vec<String> = participant_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();
    if ids.is_empty() {
        return Err(VitalityError::ValidationError(
            "an interaction needs at least one participant".to_string(),
        ));
    }
    Ok(ids)
}

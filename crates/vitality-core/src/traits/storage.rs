use chrono::{DateTime, Utc};

use crate::errors::VitalityResult;
use crate::models::{
    BadgeScope, BadgeUnlock, Interaction, InteractionOutcome, InteractionStatus, Relationship,
};

/// Relationship rows.
pub trait RelationshipRepo {
    fn get_relationship(&self, id: &str) -> VitalityResult<Option<Relationship>>;
    /// Insert or replace.
    fn put_relationship(&self, relationship: &Relationship) -> VitalityResult<()>;
    fn list_relationships(&self) -> VitalityResult<Vec<Relationship>>;
}

/// Interactions and their participant join records.
pub trait InteractionRepo {
    fn insert_interaction(
        &self,
        interaction: &Interaction,
        participant_ids: &[String],
    ) -> VitalityResult<()>;
    fn get_interaction(&self, id: &str) -> VitalityResult<Option<Interaction>>;
    fn set_interaction_status(&self, id: &str, status: InteractionStatus) -> VitalityResult<()>;
    fn participants_of(&self, interaction_id: &str) -> VitalityResult<Vec<String>>;
    /// All interactions linked to a relationship, oldest first.
    fn interactions_for(&self, relationship_id: &str) -> VitalityResult<Vec<Interaction>>;
    /// Account-wide count of completed interactions.
    fn count_completed(&self) -> VitalityResult<usize>;
    /// Account-wide count of completed interactions carrying a reflection.
    fn count_reflections(&self) -> VitalityResult<usize>;
}

/// Effectiveness learning records.
pub trait OutcomeRepo {
    fn insert_outcome(&self, outcome: &InteractionOutcome) -> VitalityResult<()>;
    /// Unmeasured outcomes captured at or before `captured_before`, oldest first.
    fn pending_outcomes(
        &self,
        captured_before: DateTime<Utc>,
    ) -> VitalityResult<Vec<InteractionOutcome>>;
    /// Record a measurement. Returns `false` when the outcome was already
    /// measured (or does not exist); the stored row is then left untouched.
    fn mark_outcome_measured(
        &self,
        id: &str,
        measured_at: DateTime<Utc>,
        actual_impact: f64,
    ) -> VitalityResult<bool>;
    fn outcomes_for(&self, relationship_id: &str) -> VitalityResult<Vec<InteractionOutcome>>;
}

/// Write-once badge unlocks.
pub trait BadgeRepo {
    fn badge_exists(&self, scope: &BadgeScope, badge_id: &str) -> VitalityResult<bool>;
    fn insert_badge(&self, unlock: &BadgeUnlock) -> VitalityResult<()>;
    fn badges_for(&self, scope: &BadgeScope) -> VitalityResult<Vec<BadgeUnlock>>;
}

/// A unit of work against the store. Dropping without [`Transaction::commit`]
/// rolls every write back.
pub trait Transaction: RelationshipRepo + InteractionRepo + OutcomeRepo + BadgeRepo {
    fn commit(self: Box<Self>) -> VitalityResult<()>;
}

/// Durable store handing out transactions. Writers are serialized by the
/// implementation; reads see a consistent snapshot.
pub trait VitalityStorage: Send + Sync {
    fn begin_write(&self) -> VitalityResult<Box<dyn Transaction + '_>>;
    fn begin_read(&self) -> VitalityResult<Box<dyn Transaction + '_>>;
}

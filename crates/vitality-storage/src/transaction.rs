//! Explicit SQLite transaction implementing every repository trait.

use std::sync::MutexGuard;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::warn;

use vitality_core::errors::{StorageError, VitalityResult};
use vitality_core::models::{
    BadgeScope, BadgeUnlock, Interaction, InteractionOutcome, InteractionStatus, Relationship,
};
use vitality_core::traits::{BadgeRepo, InteractionRepo, OutcomeRepo, RelationshipRepo, Transaction};

use crate::queries::{badge_ops, interaction_ops, outcome_ops, relationship_ops};

/// Holds the connection lock for its whole lifetime. Dropped without
/// [`Transaction::commit`], it rolls back.
pub struct SqliteTransaction<'a> {
    conn: MutexGuard<'a, Connection>,
    finished: bool,
}

impl<'a> SqliteTransaction<'a> {
    pub(crate) fn begin(conn: MutexGuard<'a, Connection>, immediate: bool) -> VitalityResult<Self> {
        let sql = if immediate { "BEGIN IMMEDIATE" } else { "BEGIN DEFERRED" };
        conn.execute_batch(sql)
            .map_err(|e| StorageError::TransactionFailed {
                reason: format!("begin: {e}"),
            })?;
        Ok(Self {
            conn,
            finished: false,
        })
    }
}

impl Drop for SqliteTransaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                warn!(error = %e, "rollback failed");
            }
        }
    }
}

impl Transaction for SqliteTransaction<'_> {
    fn commit(mut self: Box<Self>) -> VitalityResult<()> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| StorageError::TransactionFailed {
                reason: format!("commit: {e}"),
            })?;
        self.finished = true;
        Ok(())
    }
}

impl RelationshipRepo for SqliteTransaction<'_> {
    fn get_relationship(&self, id: &str) -> VitalityResult<Option<Relationship>> {
        relationship_ops::get_relationship(&self.conn, id)
    }

    fn put_relationship(&self, relationship: &Relationship) -> VitalityResult<()> {
        relationship_ops::upsert_relationship(&self.conn, relationship)
    }

    fn list_relationships(&self) -> VitalityResult<Vec<Relationship>> {
        relationship_ops::list_relationships(&self.conn)
    }
}

impl InteractionRepo for SqliteTransaction<'_> {
    fn insert_interaction(
        &self,
        interaction: &Interaction,
        participant_ids: &[String],
    ) -> VitalityResult<()> {
        interaction_ops::insert_interaction(&self.conn, interaction, participant_ids)
    }

    fn get_interaction(&self, id: &str) -> VitalityResult<Option<Interaction>> {
        interaction_ops::get_interaction(&self.conn, id)
    }

    fn set_interaction_status(&self, id: &str, status: InteractionStatus) -> VitalityResult<()> {
        interaction_ops::set_status(&self.conn, id, status)
    }

    fn participants_of(&self, interaction_id: &str) -> VitalityResult<Vec<String>> {
        interaction_ops::participants_of(&self.conn, interaction_id)
    }

    fn interactions_for(&self, relationship_id: &str) -> VitalityResult<Vec<Interaction>> {
        interaction_ops::interactions_for(&self.conn, relationship_id)
    }

    fn count_completed(&self) -> VitalityResult<usize> {
        interaction_ops::count_completed(&self.conn)
    }

    fn count_reflections(&self) -> VitalityResult<usize> {
        interaction_ops::count_reflections(&self.conn)
    }
}

impl OutcomeRepo for SqliteTransaction<'_> {
    fn insert_outcome(&self, outcome: &InteractionOutcome) -> VitalityResult<()> {
        outcome_ops::insert_outcome(&self.conn, outcome)
    }

    fn pending_outcomes(
        &self,
        captured_before: DateTime<Utc>,
    ) -> VitalityResult<Vec<InteractionOutcome>> {
        outcome_ops::pending_outcomes(&self.conn, captured_before)
    }

    fn mark_outcome_measured(
        &self,
        id: &str,
        measured_at: DateTime<Utc>,
        actual_impact: f64,
    ) -> VitalityResult<bool> {
        outcome_ops::mark_measured(&self.conn, id, measured_at, actual_impact)
    }

    fn outcomes_for(&self, relationship_id: &str) -> VitalityResult<Vec<InteractionOutcome>> {
        outcome_ops::outcomes_for(&self.conn, relationship_id)
    }
}

impl BadgeRepo for SqliteTransaction<'_> {
    fn badge_exists(&self, scope: &BadgeScope, badge_id: &str) -> VitalityResult<bool> {
        badge_ops::badge_exists(&self.conn, scope, badge_id)
    }

    fn insert_badge(&self, unlock: &BadgeUnlock) -> VitalityResult<()> {
        badge_ops::insert_badge(&self.conn, unlock)
    }

    fn badges_for(&self, scope: &BadgeScope) -> VitalityResult<Vec<BadgeUnlock>> {
        badge_ops::badges_for(&self.conn, scope)
    }
}

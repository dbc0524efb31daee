//! VitalityEngine: configuration, collaborators, and the single-entity
//! operations. Interaction logging lives in [`crate::weave`], background
//! learning in [`crate::learning`].

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use vitality_core::errors::{VitalityError, VitalityResult};
use vitality_core::models::{
    BadgeScope, BadgeUnlock, Initiator, InteractionAttributes, Relationship,
};
use vitality_core::traits::{Transaction, VitalityStorage};
use vitality_core::VitalityConfig;
use vitality_decay::{DecayModel, DormancyDecision};
use vitality_learning::{
    EffectivenessLearner, PatternLearner, ReciprocitySummary, ReciprocityTracker,
};
use vitality_milestones::{
    BadgeCatalog, GlobalEntry, GlobalMetrics, MilestoneEngine, RelationshipMetrics, Trigger,
};
use vitality_scoring::{PointsBreakdown, ScoringModel};
use vitality_storage::StorageEngine;

use crate::locks::{acquire, RelationshipLocks};
use crate::queue::LearningQueue;

pub struct VitalityEngine {
    pub(crate) storage: Arc<dyn VitalityStorage>,
    pub(crate) config: VitalityConfig,
    pub(crate) decay: DecayModel,
    pub(crate) scoring: ScoringModel,
    pub(crate) patterns: PatternLearner,
    pub(crate) effectiveness: EffectivenessLearner,
    pub(crate) reciprocity: ReciprocityTracker,
    pub(crate) milestones: MilestoneEngine,
    pub(crate) queue: LearningQueue,
    pub(crate) locks: RelationshipLocks,
}

impl VitalityEngine {
    pub fn new(storage: Arc<dyn VitalityStorage>, config: VitalityConfig) -> Self {
        let decay = DecayModel::new(config.decay.clone());
        Self {
            scoring: ScoringModel::from_config(&config),
            patterns: PatternLearner::new(config.pattern.clone()),
            effectiveness: EffectivenessLearner::new(config.effectiveness.clone(), decay.clone()),
            reciprocity: ReciprocityTracker::new(config.reciprocity.clone()),
            milestones: MilestoneEngine::default(),
            queue: LearningQueue::new(config.queue.max_attempts),
            locks: RelationshipLocks::new(),
            decay,
            storage,
            config,
        }
    }

    /// Open the SQLite database named by `config.storage.db_path`.
    pub fn open(config: VitalityConfig) -> VitalityResult<Self> {
        let storage =
            StorageEngine::open_with_config(Path::new(&config.storage.db_path), &config.storage)?;
        Ok(Self::new(Arc::new(storage), config))
    }

    /// Engine over an in-memory database (for testing).
    pub fn in_memory(config: VitalityConfig) -> VitalityResult<Self> {
        Ok(Self::new(Arc::new(StorageEngine::open_in_memory()?), config))
    }

    /// Replace the built-in badge catalog.
    pub fn with_catalog(mut self, catalog: BadgeCatalog) -> Self {
        self.milestones = MilestoneEngine::new(catalog);
        self
    }

    pub fn config(&self) -> &VitalityConfig {
        &self.config
    }

    pub fn storage(&self) -> &dyn VitalityStorage {
        self.storage.as_ref()
    }

    pub fn decay(&self) -> &DecayModel {
        &self.decay
    }

    pub fn scoring(&self) -> &ScoringModel {
        &self.scoring
    }

    pub fn queue(&self) -> &LearningQueue {
        &self.queue
    }

    // ── Pure scoring surface ────────────────────────────────────────────

    /// Decayed score in [0, 100]. No side effects.
    pub fn current_score(&self, relationship: &Relationship, now: DateTime<Utc>) -> f64 {
        self.decay.current_score(relationship, now)
    }

    /// Raw point delta an interaction would add. No side effects.
    pub fn points_for_interaction(
        &self,
        relationship: &Relationship,
        attributes: &InteractionAttributes,
        now: DateTime<Utc>,
    ) -> f64 {
        self.scoring.points_for_interaction(relationship, attributes, now)
    }

    pub fn points_breakdown(
        &self,
        relationship: &Relationship,
        attributes: &InteractionAttributes,
        now: DateTime<Utc>,
    ) -> PointsBreakdown {
        self.scoring.breakdown(relationship, attributes, now)
    }

    // ── Relationships ───────────────────────────────────────────────────

    /// Register or overwrite a relationship.
    pub fn upsert_relationship(&self, relationship: &Relationship) -> VitalityResult<()> {
        let tx = self.storage.begin_write()?;
        tx.put_relationship(relationship)?;
        tx.commit()
    }

    pub fn relationship(&self, id: &str) -> VitalityResult<Relationship> {
        let tx = self.storage.begin_read()?;
        load_relationship(&*tx, id)
    }

    pub fn relationships(&self) -> VitalityResult<Vec<Relationship>> {
        self.storage.begin_read()?.list_relationships()
    }

    pub fn badges(&self, scope: &BadgeScope) -> VitalityResult<Vec<BadgeUnlock>> {
        self.storage.begin_read()?.badges_for(scope)
    }

    // ── Reciprocity ─────────────────────────────────────────────────────

    /// Tally an initiation. Fails with `RelationshipNotFound` without
    /// touching the store.
    #[instrument(skip(self))]
    pub fn update_initiation(
        &self,
        relationship_id: &str,
        initiator: Initiator,
    ) -> VitalityResult<ReciprocitySummary> {
        let handle = self.locks.handle(relationship_id);
        let _guard = acquire(&handle);

        let tx = self.storage.begin_write()?;
        let mut relationship = load_relationship(&*tx, relationship_id)?;
        self.reciprocity.record(&mut relationship, initiator);
        tx.put_relationship(&relationship)?;
        tx.commit()?;
        Ok(self.reciprocity.summary(&relationship))
    }

    pub fn reciprocity(&self, relationship_id: &str) -> VitalityResult<ReciprocitySummary> {
        Ok(self.reciprocity.summary(&self.relationship(relationship_id)?))
    }

    // ── Milestones ──────────────────────────────────────────────────────

    /// Evaluate one scope and unlock newly reached badges. Returns only the
    /// new unlocks.
    pub fn check_milestones(
        &self,
        scope: &BadgeScope,
        now: DateTime<Utc>,
    ) -> VitalityResult<Vec<BadgeUnlock>> {
        let span = crate::milestone_span!(scope);
        let _enter = span.enter();

        let tx = self.storage.begin_write()?;
        let unlocks = match scope {
            BadgeScope::Relationship(id) => {
                let relationship = load_relationship(&*tx, id)?;
                self.award_relationship(&*tx, &relationship, None, None, now)?
            }
            BadgeScope::Global => self.award_global(&*tx, None, now)?,
        };
        tx.commit()?;
        Ok(unlocks)
    }

    pub(crate) fn award_relationship(
        &self,
        tx: &dyn Transaction,
        relationship: &Relationship,
        trigger: Option<Trigger<'_>>,
        interaction_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> VitalityResult<Vec<BadgeUnlock>> {
        let history = tx.interactions_for(&relationship.id)?;
        let metrics = RelationshipMetrics::compute(relationship, &history, trigger);
        self.milestones.award(
            tx,
            &BadgeScope::Relationship(relationship.id.clone()),
            &metrics,
            interaction_id,
            now,
        )
    }

    pub(crate) fn award_global(
        &self,
        tx: &dyn Transaction,
        interaction_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> VitalityResult<Vec<BadgeUnlock>> {
        let mut entries = Vec::new();
        for relationship in tx.list_relationships()? {
            let completed = tx
                .interactions_for(&relationship.id)?
                .iter()
                .filter(|i| i.attributes.is_completed())
                .count();
            entries.push(GlobalEntry {
                tier: relationship.tier,
                archetype: relationship.archetype,
                current_score: self.decay.current_score(&relationship, now),
                completed_interactions: completed,
            });
        }
        let metrics =
            GlobalMetrics::compute(&entries, tx.count_completed()?, tx.count_reflections()?);
        self.milestones
            .award(tx, &BadgeScope::Global, &metrics, interaction_id, now)
    }

    // ── Dormancy ────────────────────────────────────────────────────────

    /// Mark every relationship whose decayed score has sunk to the dormancy
    /// threshold. Returns the decisions that were applied.
    pub fn sweep_dormancy(&self, now: DateTime<Utc>) -> VitalityResult<Vec<DormancyDecision>> {
        let tx = self.storage.begin_write()?;
        let relationships = tx.list_relationships()?;
        let span = crate::dormancy_span!(relationships.len());
        let _enter = span.enter();

        let mut applied = Vec::new();
        for (relationship, (_, decision)) in relationships
            .iter()
            .zip(self.decay.process_batch(&relationships, now))
        {
            if !decision.should_go_dormant {
                continue;
            }
            let mut updated = relationship.clone();
            updated.dormant = true;
            updated.dormant_since = Some(now);
            tx.put_relationship(&updated)?;
            info!(relationship_id = %updated.id, reason = %decision.reason, "relationship went dormant");
            applied.push(decision);
        }
        tx.commit()?;
        Ok(applied)
    }
}

pub(crate) fn load_relationship(tx: &dyn Transaction, id: &str) -> VitalityResult<Relationship> {
    tx.get_relationship(id)?
        .ok_or_else(|| VitalityError::RelationshipNotFound { id: id.to_string() })
}

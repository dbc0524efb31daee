use chrono::{DateTime, Utc};
use tracing::{debug, info};
use vitality_core::errors::VitalityResult;
use vitality_core::models::{BadgeScope, BadgeUnlock};
use vitality_core::traits::BadgeRepo;

use crate::catalog::{BadgeCatalog, BadgeDefinition, ScopeKind};
use crate::metrics::MetricSource;

/// Evaluates a catalog against metric snapshots and records new unlocks.
#[derive(Debug, Clone, Default)]
pub struct MilestoneEngine {
    catalog: BadgeCatalog,
}

impl MilestoneEngine {
    pub fn new(catalog: BadgeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    /// Highest tier reached in each category of `kind`. Categories the
    /// source does not measure are skipped.
    pub fn reached(&self, kind: ScopeKind, metrics: &dyn MetricSource) -> Vec<&BadgeDefinition> {
        self.catalog
            .categories(kind)
            .into_iter()
            .filter_map(|category| {
                let value = metrics.metric(category)?;
                self.catalog
                    .tiers(category)
                    .filter(|d| value >= d.threshold)
                    .last()
            })
            .collect()
    }

    /// Unlock every reached tier not yet recorded for `scope`. The existence
    /// check and the insert go through the same repo, so running this inside
    /// a write transaction makes the award exactly-once.
    pub fn award<R: BadgeRepo + ?Sized>(
        &self,
        repo: &R,
        scope: &BadgeScope,
        metrics: &dyn MetricSource,
        interaction_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> VitalityResult<Vec<BadgeUnlock>> {
        let kind = match scope {
            BadgeScope::Relationship(_) => ScopeKind::Relationship,
            BadgeScope::Global => ScopeKind::Global,
        };

        let mut unlocked = Vec::new();
        for def in self.reached(kind, metrics) {
            if repo.badge_exists(scope, &def.id)? {
                debug!(scope = %scope, badge = %def.id, "badge already unlocked");
                continue;
            }
            let unlock = BadgeUnlock::new(
                scope.clone(),
                def.id.clone(),
                interaction_id.map(str::to_string),
                now,
            );
            repo.insert_badge(&unlock)?;
            info!(scope = %scope, badge = %def.id, rarity = ?def.rarity, "badge unlocked");
            unlocked.push(unlock);
        }
        Ok(unlocked)
    }
}

//! # vitality-milestones
//!
//! Badges are pure data (id, threshold, category, rarity). One evaluator
//! turns a metric snapshot into the highest tier reached per category and
//! unlocks it at most once per scope.

pub mod catalog;
pub mod evaluator;
pub mod metrics;

pub use catalog::{BadgeCatalog, BadgeCategory, BadgeDefinition, Rarity, ScopeKind};
pub use evaluator::MilestoneEngine;
pub use metrics::{GlobalEntry, GlobalMetrics, MetricSource, RelationshipMetrics, Trigger};

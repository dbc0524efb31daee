use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::GLOBAL_SCOPE_KEY;

/// Who a badge belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "id")]
#[ts(export)]
pub enum BadgeScope {
    Relationship(String),
    Global,
}

impl BadgeScope {
    /// Storage key: `relationship:<id>` or `global`.
    pub fn key(&self) -> String {
        match self {
            BadgeScope::Relationship(id) => format!("relationship:{id}"),
            BadgeScope::Global => GLOBAL_SCOPE_KEY.to_string(),
        }
    }

    /// Inverse of [`BadgeScope::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        if key == GLOBAL_SCOPE_KEY {
            return Some(BadgeScope::Global);
        }
        key.strip_prefix("relationship:")
            .filter(|id| !id.is_empty())
            .map(|id| BadgeScope::Relationship(id.to_string()))
    }
}

impl fmt::Display for BadgeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Write-once record that a badge was earned. Unique per `(scope, badge_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BadgeUnlock {
    pub id: String,
    pub scope: BadgeScope,
    pub badge_id: String,
    pub unlocked_at: DateTime<Utc>,
    /// Interaction that triggered the unlock, if any.
    pub interaction_id: Option<String>,
}

impl BadgeUnlock {
    pub fn new(
        scope: BadgeScope,
        badge_id: impl Into<String>,
        interaction_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            scope,
            badge_id: badge_id.into(),
            unlocked_at: now,
            interaction_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_keys_round_trip() {
        let scope = BadgeScope::Relationship("r-1".into());
        assert_eq!(scope.key(), "relationship:r-1");
        assert_eq!(BadgeScope::from_key("relationship:r-1"), Some(scope));
        assert_eq!(BadgeScope::from_key("global"), Some(BadgeScope::Global));
        assert_eq!(BadgeScope::from_key("relationship:"), None);
    }
}

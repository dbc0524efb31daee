//! Static badge definitions. The engine evaluates them; it never computes
//! or mutates them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use vitality_core::errors::{VitalityError, VitalityResult};

/// Which scope a badge category is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
    Relationship,
    Global,
}

/// Metric a badge is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeCategory {
    // Progressive, per relationship.
    WeaveCount,
    Depth,
    Consistency,
    // Event-triggered, per relationship.
    FirstWeave,
    Birthday,
    Anniversary,
    FirstFullMoon,
    Phoenix,
    // Account-wide.
    TotalWeaves,
    TotalReflections,
    ActiveInnerCircle,
    ArchetypeDiversity,
    ThrivingInnerCircle,
}

impl BadgeCategory {
    pub fn scope(self) -> ScopeKind {
        match self {
            BadgeCategory::WeaveCount
            | BadgeCategory::Depth
            | BadgeCategory::Consistency
            | BadgeCategory::FirstWeave
            | BadgeCategory::Birthday
            | BadgeCategory::Anniversary
            | BadgeCategory::FirstFullMoon
            | BadgeCategory::Phoenix => ScopeKind::Relationship,
            BadgeCategory::TotalWeaves
            | BadgeCategory::TotalReflections
            | BadgeCategory::ActiveInnerCircle
            | BadgeCategory::ArchetypeDiversity
            | BadgeCategory::ThrivingInnerCircle => ScopeKind::Global,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: BadgeCategory,
    /// Metric value at which the badge unlocks.
    pub threshold: u32,
    pub rarity: Rarity,
}

impl BadgeDefinition {
    pub fn scope(&self) -> ScopeKind {
        self.category.scope()
    }
}

/// A validated set of badge definitions.
#[derive(Debug, Clone)]
pub struct BadgeCatalog {
    definitions: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    /// Build a catalog. Ids must be unique and thresholds positive.
    pub fn new(mut definitions: Vec<BadgeDefinition>) -> VitalityResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for def in &definitions {
            if !seen.insert(def.id.as_str()) {
                return Err(VitalityError::ValidationError(format!(
                    "duplicate badge id {}",
                    def.id
                )));
            }
            if def.threshold == 0 {
                return Err(VitalityError::ValidationError(format!(
                    "badge {} has a zero threshold",
                    def.id
                )));
            }
        }
        sort_tiers(&mut definitions);
        Ok(Self { definitions })
    }

    /// Load definitions from a JSON array.
    pub fn from_json(json: &str) -> VitalityResult<Self> {
        let definitions: Vec<BadgeDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    pub fn definitions(&self) -> &[BadgeDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&BadgeDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Tiers of one category, lowest threshold first.
    pub fn tiers(&self, category: BadgeCategory) -> impl Iterator<Item = &BadgeDefinition> {
        self.definitions.iter().filter(move |d| d.category == category)
    }

    /// Distinct categories evaluated in the given scope.
    pub fn categories(&self, scope: ScopeKind) -> Vec<BadgeCategory> {
        self.definitions
            .iter()
            .map(|d| d.category)
            .filter(|c| c.scope() == scope)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for BadgeCatalog {
    fn default() -> Self {
        let mut definitions = default_definitions();
        sort_tiers(&mut definitions);
        Self { definitions }
    }
}

/// Category order, then ascending threshold within a category.
fn sort_tiers(definitions: &mut [BadgeDefinition]) {
    definitions.sort_by(|a, b| (a.category, a.threshold).cmp(&(b.category, b.threshold)));
}

fn def(
    id: &str,
    name: &str,
    description: &str,
    category: BadgeCategory,
    threshold: u32,
    rarity: Rarity,
) -> BadgeDefinition {
    BadgeDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        threshold,
        rarity,
    }
}

/// Built-in catalog, already sorted by (category, threshold).
fn default_definitions() -> Vec<BadgeDefinition> {
    use BadgeCategory::*;
    use Rarity::*;
    vec![
        def("weave-5", "Thread", "5 weaves together", WeaveCount, 5, Common),
        def("weave-10", "Strand", "10 weaves together", WeaveCount, 10, Common),
        def("weave-25", "Cord", "25 weaves together", WeaveCount, 25, Uncommon),
        def("weave-50", "Rope", "50 weaves together", WeaveCount, 50, Rare),
        def("weave-100", "Tapestry", "100 weaves together", WeaveCount, 100, Epic),
        def("depth-3", "Open Book", "3 deep conversations", Depth, 3, Common),
        def("depth-10", "Kindred", "10 deep conversations", Depth, 10, Uncommon),
        def("depth-25", "Confidant", "25 deep conversations", Depth, 25, Rare),
        def("depth-50", "Soul Reader", "50 deep conversations", Depth, 50, Epic),
        def("streak-4", "Steady", "4 weeks in a row", Consistency, 4, Common),
        def("streak-12", "Rhythm", "12 weeks in a row", Consistency, 12, Uncommon),
        def("streak-26", "Tidekeeper", "26 weeks in a row", Consistency, 26, Rare),
        def("streak-52", "Evergreen", "A full year, every week", Consistency, 52, Legendary),
        def("first-weave", "First Thread", "Your first weave together", FirstWeave, 1, Common),
        def("birthday", "Birthday Keeper", "Connected on their birthday", Birthday, 1, Uncommon),
        def("anniversary", "Anniversary", "Marked your anniversary", Anniversary, 1, Uncommon),
        def("first-full-moon", "Full Moon", "A first truly great time", FirstFullMoon, 1, Common),
        def("phoenix", "Phoenix", "Revived a dormant friendship", Phoenix, 1, Rare),
        def("total-10", "Weaver", "10 weaves logged", TotalWeaves, 10, Common),
        def("total-50", "Loom Hand", "50 weaves logged", TotalWeaves, 50, Uncommon),
        def("total-100", "Master Weaver", "100 weaves logged", TotalWeaves, 100, Rare),
        def("total-500", "Grand Tapestry", "500 weaves logged", TotalWeaves, 500, Legendary),
        def("reflect-5", "Reflective", "5 reflections written", TotalReflections, 5, Common),
        def("reflect-25", "Journaler", "25 reflections written", TotalReflections, 25, Uncommon),
        def("reflect-100", "Chronicler", "100 reflections written", TotalReflections, 100, Epic),
        def("inner-3", "Warm Circle", "3 inner-circle friends going strong", ActiveInnerCircle, 3, Uncommon),
        def("inner-5", "Hearth", "5 inner-circle friends going strong", ActiveInnerCircle, 5, Rare),
        def("diversity-3", "Mixed Company", "Friends of 3 archetypes", ArchetypeDiversity, 3, Common),
        def("diversity-5", "Many Hues", "Friends of 5 archetypes", ArchetypeDiversity, 5, Uncommon),
        def("diversity-7", "Full Deck", "Friends of every archetype", ArchetypeDiversity, 7, Epic),
        def("thriving-inner", "Thriving Circle", "Every inner-circle friend thriving", ThrivingInnerCircle, 1, Epic),
    ]
}

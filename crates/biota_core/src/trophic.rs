//! Trophic level and predator-prey lookup.

use crate::error::{EcologyError, Result};
use biota_data::TrophicLevel;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub const PLANT: &str = "plant";
pub const CREATURE: &str = "creature";
pub const PREDATOR: &str = "predator";
pub const TRIBE: &str = "tribe";
pub const FUNGUS: &str = "fungus";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TypeEntry {
    level: TrophicLevel,
    prey: BTreeSet<String>,
}

/// Element type to trophic level and prey set.
///
/// One registry per simulation instance. Writes are rare, lookups happen on
/// every predation attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrophicRegistry {
    entries: HashMap<String, TypeEntry>,
}

impl TrophicRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in food web: creatures eat plants, predators
    /// eat creatures, tribes eat creatures and plants, fungi decompose.
    #[must_use]
    pub fn seeded() -> Self {
        let mut registry = Self::new();
        registry.insert(PLANT, TrophicLevel::Producer, &[] as &[&str]);
        registry.insert(FUNGUS, TrophicLevel::Decomposer, &[] as &[&str]);
        registry.insert(CREATURE, TrophicLevel::Primary, &[PLANT]);
        registry.insert(PREDATOR, TrophicLevel::Secondary, &[CREATURE]);
        registry.insert(TRIBE, TrophicLevel::Tertiary, &[CREATURE, PLANT]);
        registry
    }

    /// Registers or overwrites `element_type`. Producers and decomposers
    /// cannot declare prey.
    pub fn register_type<S: AsRef<str>>(
        &mut self,
        element_type: &str,
        level: TrophicLevel,
        prey: &[S],
    ) -> Result<()> {
        if level.is_base() && !prey.is_empty() {
            return Err(EcologyError::PreyOnBaseLevel {
                element_type: element_type.to_string(),
                level,
                prey_count: prey.len(),
            });
        }
        if self.entries.contains_key(element_type) {
            tracing::debug!(element_type, %level, "Overwriting trophic registration");
        }
        self.insert(element_type, level, prey);
        Ok(())
    }

    fn insert<S: AsRef<str>>(&mut self, element_type: &str, level: TrophicLevel, prey: &[S]) {
        let prey = prey.iter().map(|p| p.as_ref().to_string()).collect();
        self.entries
            .insert(element_type.to_string(), TypeEntry { level, prey });
    }

    /// `None` for unregistered types.
    #[must_use]
    pub fn trophic_level_of(&self, element_type: &str) -> Option<TrophicLevel> {
        self.entries.get(element_type).map(|e| e.level)
    }

    #[must_use]
    pub fn is_predator_prey_pair(&self, predator: &str, prey: &str) -> bool {
        self.entries
            .get(predator)
            .is_some_and(|e| e.prey.contains(prey))
    }

    #[must_use]
    pub fn prey_types_for(&self, predator: &str) -> BTreeSet<String> {
        self.entries
            .get(predator)
            .map(|e| e.prey.clone())
            .unwrap_or_default()
    }

    /// Reverse lookup by scanning every registration.
    #[must_use]
    pub fn predator_types_for(&self, prey: &str) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.prey.contains(prey))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Registered types at `level`, sorted.
    #[must_use]
    pub fn types_at(&self, level: TrophicLevel) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.level == level)
            .map(|(name, _)| name.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

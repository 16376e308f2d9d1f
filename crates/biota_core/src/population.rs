use crate::error::{EcologyError, Result};
use biota_data::Organism;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Live population count per element type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationLedger {
    counts: HashMap<String, u64>,
}

impl PopulationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_element_created(&mut self, element_type: &str) {
        *self.counts.entry(element_type.to_string()).or_default() += 1;
    }

    /// Decrements, floored at zero. Removing an unknown type is a no-op.
    pub fn on_element_removed(&mut self, element_type: &str) {
        if let Some(count) = self.counts.get_mut(element_type) {
            *count = count.saturating_sub(1);
        } else {
            tracing::trace!(element_type, "Removal for untracked type");
        }
    }

    /// Owned copy of every count.
    #[must_use]
    pub fn counts_snapshot(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    /// Replaces every count with a fresh tally of `elements`.
    pub fn update_population_counts(&mut self, elements: &[&dyn Organism]) {
        self.counts.clear();
        for element in elements {
            self.on_element_created(element.element_type());
        }
    }

    pub fn set_count(&mut self, element_type: &str, count: i64) -> Result<()> {
        let count = u64::try_from(count).map_err(|_| EcologyError::NegativePopulation {
            element_type: element_type.to_string(),
            count,
        })?;
        self.counts.insert(element_type.to_string(), count);
        Ok(())
    }

    #[must_use]
    pub fn count_of(&self, element_type: &str) -> u64 {
        self.counts.get(element_type).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

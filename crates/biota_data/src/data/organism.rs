use super::genome::Genome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Runtime attribute an organism may or may not expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Speed,
    Size,
    /// Health in [0, 100].
    Health,
    Energy,
    /// Age in ticks.
    Age,
}

/// Organism-facing interface consumed by the predation evaluator, the
/// population ledger and reproduction gating.
pub trait Organism {
    fn id(&self) -> Uuid;
    fn element_type(&self) -> &str;
    fn genome(&self) -> Option<&Genome>;
    /// Returns `None` when the organism does not expose `attribute`.
    fn try_get_attribute(&self, attribute: Attribute) -> Option<f64>;
}

/// Plain organism record used by hosts and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specimen {
    pub id: Uuid,
    pub element_type: String,
    pub genome: Option<Genome>,
    pub attributes: BTreeMap<Attribute, f64>,
}

impl Specimen {
    #[must_use]
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            element_type: element_type.into(),
            genome: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Uses a caller-supplied id, for hosts that derive ids from a seeded RNG.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_genome(mut self, genome: Genome) -> Self {
        self.genome = Some(genome);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute, value: f64) -> Self {
        self.attributes.insert(attribute, value);
        self
    }

    pub fn set_attribute(&mut self, attribute: Attribute, value: f64) {
        self.attributes.insert(attribute, value);
    }

    #[must_use]
    pub fn attribute_or(&self, attribute: Attribute, default: f64) -> f64 {
        self.attributes.get(&attribute).copied().unwrap_or(default)
    }
}

impl Organism for Specimen {
    fn id(&self) -> Uuid {
        self.id
    }

    fn element_type(&self) -> &str {
        &self.element_type
    }

    fn genome(&self) -> Option<&Genome> {
        self.genome.as_ref()
    }

    fn try_get_attribute(&self, attribute: Attribute) -> Option<f64> {
        self.attributes.get(&attribute).copied()
    }
}

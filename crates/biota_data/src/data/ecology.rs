use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Feeding-chain rank of an element type.
///
/// Producer < Primary < Secondary < Tertiary. `Decomposer` sits outside that
/// ordering and receives energy from every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrophicLevel {
    Producer,
    Primary,
    Secondary,
    Tertiary,
    Decomposer,
}

impl TrophicLevel {
    pub const ALL: [TrophicLevel; 5] = [
        TrophicLevel::Producer,
        TrophicLevel::Primary,
        TrophicLevel::Secondary,
        TrophicLevel::Tertiary,
        TrophicLevel::Decomposer,
    ];

    /// Position on the feeding chain; `None` for decomposers.
    #[must_use]
    pub fn rank(self) -> Option<u8> {
        match self {
            TrophicLevel::Producer => Some(0),
            TrophicLevel::Primary => Some(1),
            TrophicLevel::Secondary => Some(2),
            TrophicLevel::Tertiary => Some(3),
            TrophicLevel::Decomposer => None,
        }
    }

    /// Producers and decomposers never declare prey.
    #[must_use]
    pub fn is_base(self) -> bool {
        matches!(self, TrophicLevel::Producer | TrophicLevel::Decomposer)
    }
}

impl fmt::Display for TrophicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrophicLevel::Producer => "producer",
            TrophicLevel::Primary => "primary",
            TrophicLevel::Secondary => "secondary",
            TrophicLevel::Tertiary => "tertiary",
            TrophicLevel::Decomposer => "decomposer",
        };
        f.write_str(name)
    }
}

/// Result of one predation attempt. Never applied to the organisms by the
/// engine; the caller deducts and adds energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredationOutcome {
    pub success: bool,
    pub energy_gained: f64,
    pub predator: Uuid,
    pub prey: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    CascadeEffect,
}

/// Why a cascade effect was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeReason {
    /// The target lost part of its food supply.
    FoodSourceDecline,
    /// Fewer predators are hunting the target.
    ReducedPredationPressure,
    /// A tertiary consumer linked to a collapsing predator.
    FoodChainDisruption,
}

/// Transient second-order effect of a population change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeEffect {
    pub source_type: String,
    pub target_type: String,
    pub interaction: InteractionKind,
    /// Positive helps the target, negative hurts it.
    pub magnitude: f64,
    pub reason: CascadeReason,
    pub cause: String,
    pub depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_follow_chain() {
        assert!(TrophicLevel::Producer.rank() < TrophicLevel::Primary.rank());
        assert!(TrophicLevel::Secondary.rank() < TrophicLevel::Tertiary.rank());
        assert_eq!(TrophicLevel::Decomposer.rank(), None);
    }

    #[test]
    fn test_base_levels() {
        assert!(TrophicLevel::Producer.is_base());
        assert!(TrophicLevel::Decomposer.is_base());
        assert!(!TrophicLevel::Tertiary.is_base());
    }

    #[test]
    fn test_interaction_kind_wire_name() {
        let json = serde_json::to_string(&InteractionKind::CascadeEffect).expect("serialize");
        assert_eq!(json, "\"cascade_effect\"");
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named heritable trait.
///
/// Declaration order is the schema order: every genome walk (combination,
/// mutation, expression) iterates traits in this order so that a fixed seed
/// always produces the same child.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    /// Movement speed.
    Speed,
    /// Body size.
    Size,
    /// Physical strength.
    Strength,
    /// Problem solving, read by the predation evaluator.
    Intelligence,
    /// Tendency to attack.
    Aggression,
    /// Base chance of a successful reproduction attempt.
    ReproductionRate,
    /// Expected lifespan in units of [`LIFESPAN_TICKS`].
    Lifespan,
    /// Reliance on water sources.
    WaterDependency,
    /// Tolerance to temperature swings.
    TemperatureTolerance,
    /// Special: blending into surroundings.
    Camouflage,
    /// Special: seeing in the dark.
    NightVision,
    /// Special: healing over time.
    Regeneration,
    /// Categorical special ability.
    SpecialAbility,
}

/// Ticks represented by one unit of the `lifespan` phenotype.
pub const LIFESPAN_TICKS: f64 = 1000.0;

/// Traits that may rest at exactly 0.0 (inactive) instead of being clamped to
/// the allele floor. This list is a fixed convention and is not derived from
/// trait semantics.
pub const SPECIAL_TRAITS: [TraitKind; 3] = [
    TraitKind::Camouflage,
    TraitKind::NightVision,
    TraitKind::Regeneration,
];

impl TraitKind {
    /// Every trait in schema order.
    pub const ALL: [TraitKind; 13] = [
        TraitKind::Speed,
        TraitKind::Size,
        TraitKind::Strength,
        TraitKind::Intelligence,
        TraitKind::Aggression,
        TraitKind::ReproductionRate,
        TraitKind::Lifespan,
        TraitKind::WaterDependency,
        TraitKind::TemperatureTolerance,
        TraitKind::Camouflage,
        TraitKind::NightVision,
        TraitKind::Regeneration,
        TraitKind::SpecialAbility,
    ];

    #[must_use]
    pub fn is_special(self) -> bool {
        SPECIAL_TRAITS.contains(&self)
    }

    #[must_use]
    pub fn is_categorical(self) -> bool {
        matches!(self, TraitKind::SpecialAbility)
    }

    /// Neutral midpoint used by the schema-default genome.
    #[must_use]
    pub fn neutral_value(self) -> f64 {
        match self {
            TraitKind::Speed | TraitKind::Size | TraitKind::Strength | TraitKind::Lifespan => 1.0,
            TraitKind::Intelligence
            | TraitKind::Aggression
            | TraitKind::ReproductionRate
            | TraitKind::WaterDependency
            | TraitKind::TemperatureTolerance => 0.5,
            TraitKind::Camouflage
            | TraitKind::NightVision
            | TraitKind::Regeneration
            | TraitKind::SpecialAbility => 0.0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TraitKind::Speed => "speed",
            TraitKind::Size => "size",
            TraitKind::Strength => "strength",
            TraitKind::Intelligence => "intelligence",
            TraitKind::Aggression => "aggression",
            TraitKind::ReproductionRate => "reproduction_rate",
            TraitKind::Lifespan => "lifespan",
            TraitKind::WaterDependency => "water_dependency",
            TraitKind::TemperatureTolerance => "temperature_tolerance",
            TraitKind::Camouflage => "camouflage",
            TraitKind::NightVision => "night_vision",
            TraitKind::Regeneration => "regeneration",
            TraitKind::SpecialAbility => "special_ability",
        }
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical value carried by the `special_ability` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAbility {
    Venom,
    Burrowing,
    Flight,
    Echolocation,
    Thorns,
}

impl SpecialAbility {
    pub const ALL: [SpecialAbility; 5] = [
        SpecialAbility::Venom,
        SpecialAbility::Burrowing,
        SpecialAbility::Flight,
        SpecialAbility::Echolocation,
        SpecialAbility::Thorns,
    ];
}

/// The two alleles of one trait.
///
/// Both alleles always share a representation, so a numeric/categorical
/// mismatch inside a single trait cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraitPair {
    /// Scalar alleles. Invariant: `dominant >= recessive`.
    Numeric { dominant: f64, recessive: f64 },
    /// Nullable categorical alleles.
    Categorical {
        dominant: Option<SpecialAbility>,
        recessive: Option<SpecialAbility>,
    },
}

impl TraitPair {
    /// Builds a numeric pair, ordering the alleles so the larger is dominant.
    #[must_use]
    pub fn numeric(a: f64, b: f64) -> Self {
        if a >= b {
            Self::Numeric {
                dominant: a,
                recessive: b,
            }
        } else {
            Self::Numeric {
                dominant: b,
                recessive: a,
            }
        }
    }

    #[must_use]
    pub fn categorical(
        dominant: Option<SpecialAbility>,
        recessive: Option<SpecialAbility>,
    ) -> Self {
        Self::Categorical {
            dominant,
            recessive,
        }
    }

    /// Returns `(dominant, recessive)` for numeric pairs.
    #[must_use]
    pub fn as_numeric(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Numeric {
                dominant,
                recessive,
            } => Some((dominant, recessive)),
            Self::Categorical { .. } => None,
        }
    }

    #[must_use]
    pub fn allele(&self, slot: AlleleSlot) -> AlleleValue {
        match (self, slot) {
            (Self::Numeric { dominant, .. }, AlleleSlot::Dominant) => {
                AlleleValue::Numeric(*dominant)
            }
            (Self::Numeric { recessive, .. }, AlleleSlot::Recessive) => {
                AlleleValue::Numeric(*recessive)
            }
            (Self::Categorical { dominant, .. }, AlleleSlot::Dominant) => {
                AlleleValue::Categorical(*dominant)
            }
            (Self::Categorical { recessive, .. }, AlleleSlot::Recessive) => {
                AlleleValue::Categorical(*recessive)
            }
        }
    }
}

/// Which of the two stored alleles an event touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlleleSlot {
    Dominant,
    Recessive,
}

/// A single allele value as recorded in the mutation history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlleleValue {
    Numeric(f64),
    Categorical(Option<SpecialAbility>),
}

/// Closed set of mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// Small uniform nudge scaled by the mutation intensity.
    Point,
    /// A point mutation with a larger magnitude.
    Jump,
    /// Switches an inactive special trait on.
    Activation,
    /// Switches an active special trait off.
    Deactivation,
}

/// What produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "mutation", rename_all = "snake_case")]
pub enum ChangeKind {
    Mutation(MutationKind),
    Crossover,
}

/// One structured entry of a genome's mutation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationEvent {
    pub trait_kind: TraitKind,
    pub allele: AlleleSlot,
    pub old_value: AlleleValue,
    pub new_value: AlleleValue,
    /// Absolute numeric change; the blend fraction for crossovers.
    pub magnitude: f64,
    pub kind: ChangeKind,
    pub generation: u32,
}

/// Trait name to allele pair, iterated in schema order.
pub type TraitSnapshot = BTreeMap<TraitKind, TraitPair>;

/// Expressed value of a single trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Phenotype {
    Value(f64),
    Ability(SpecialAbility),
}

impl Phenotype {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Ability(_) => None,
        }
    }
}

/// Trait name to expressed phenotype. Categorical traits with no active
/// ability are absent rather than zero.
pub type TraitMap = BTreeMap<TraitKind, Phenotype>;

/// Complete heritable blueprint of an organism.
///
/// A genome belongs to exactly one organism. Reproduction always builds a new
/// genome; nothing holds references into another organism's genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub traits: TraitSnapshot,
    /// Per-allele mutation probability in [0, 1].
    pub base_mutation_rate: f64,
    /// Scale of point mutations in [0, 1].
    pub mutation_intensity: f64,
    /// Multiplier applied to every numeric phenotype, >= 0.
    pub expression_strength: f64,
    pub generation: u32,
    /// Append-only log of mutations and crossovers.
    pub mutation_history: Vec<MutationEvent>,
}

impl Default for Genome {
    /// Schema-default genome with every trait at its neutral midpoint.
    fn default() -> Self {
        let traits = TraitKind::ALL
            .iter()
            .map(|&kind| {
                let pair = if kind.is_categorical() {
                    TraitPair::categorical(None, None)
                } else {
                    let v = kind.neutral_value();
                    TraitPair::numeric(v, v)
                };
                (kind, pair)
            })
            .collect();
        Self {
            traits,
            base_mutation_rate: 0.05,
            mutation_intensity: 0.1,
            expression_strength: 1.0,
            generation: 0,
            mutation_history: Vec::new(),
        }
    }
}

impl Genome {
    /// Builds a genome carrying only the given traits, with default scalars.
    #[must_use]
    pub fn from_traits<I>(traits: I) -> Self
    where
        I: IntoIterator<Item = (TraitKind, TraitPair)>,
    {
        Self {
            traits: traits.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn trait_pair(&self, kind: TraitKind) -> Option<&TraitPair> {
        self.traits.get(&kind)
    }

    /// `(dominant, recessive)` of a numeric trait, if present.
    #[must_use]
    pub fn numeric_alleles(&self, kind: TraitKind) -> Option<(f64, f64)> {
        self.traits.get(&kind).and_then(TraitPair::as_numeric)
    }

    #[must_use]
    pub fn snapshot(&self) -> TraitSnapshot {
        self.traits.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_is_declaration_order() {
        let mut sorted = TraitKind::ALL;
        sorted.sort();
        assert_eq!(sorted, TraitKind::ALL);
    }

    #[test]
    fn test_numeric_constructor_orders_alleles() {
        assert_eq!(TraitPair::numeric(0.2, 0.9).as_numeric(), Some((0.9, 0.2)));
    }

    #[test]
    fn test_default_genome_is_neutral() {
        let genome = Genome::default();
        assert_eq!(genome.traits.len(), TraitKind::ALL.len());
        assert_eq!(genome.numeric_alleles(TraitKind::Speed), Some((1.0, 1.0)));
        assert_eq!(genome.numeric_alleles(TraitKind::Camouflage), Some((0.0, 0.0)));
        assert_eq!(
            genome.trait_pair(TraitKind::SpecialAbility),
            Some(&TraitPair::categorical(None, None))
        );
    }

    #[test]
    fn test_genome_json_uses_trait_names() {
        let json = serde_json::to_string(&Genome::default()).expect("serialize");
        assert!(json.contains("\"night_vision\""));
        assert!(json.contains("\"kind\":\"numeric\""));
    }
}

pub mod crossover;
pub mod expression;
pub mod factory;
pub mod mutation;

pub use biota_data::{
    AlleleSlot, AlleleValue, ChangeKind, Genome, MutationEvent, MutationKind, Phenotype,
    SpecialAbility, TraitKind, TraitMap, TraitPair, TraitSnapshot, SPECIAL_TRAITS,
};
pub use factory::{create_genome_for, create_random_genome, SpeciesPreset};

use crate::config::GeneticsConfig;
use crate::notify::NotificationSink;
use rand::Rng;

/// Share of the dominant allele in a numeric phenotype.
pub const DOMINANT_EXPRESSION_WEIGHT: f64 = 0.7;
/// Floor for mutated numeric alleles outside [`SPECIAL_TRAITS`].
pub const MIN_ALLELE_VALUE: f64 = 0.1;
/// Compatibility of two genomes that share no numeric trait.
pub const NEUTRAL_COMPATIBILITY: f64 = 0.5;

/// Everything a genome operation needs besides the genomes themselves.
pub struct GeneticContext<'a, R: Rng> {
    pub config: &'a GeneticsConfig,
    pub rng: &'a mut R,
    pub sink: &'a mut dyn NotificationSink,
}

impl<'a, R: Rng> GeneticContext<'a, R> {
    pub fn new(
        config: &'a GeneticsConfig,
        rng: &'a mut R,
        sink: &'a mut dyn NotificationSink,
    ) -> Self {
        Self { config, rng, sink }
    }
}

/// Trait defining the genetic interface of a [`Genome`].
pub trait GenomeLogic {
    fn random_for_preset<R: Rng>(preset: SpeciesPreset, rng: &mut R) -> Self;

    /// Sexual reproduction: seeds each child allele from one parent, applies
    /// crossover, then lets the child mutate itself before returning it.
    #[must_use]
    fn combine<R: Rng>(&self, other: &Genome, ctx: &mut GeneticContext<'_, R>) -> Genome;

    /// Rolls every allele against the base mutation rate. Returns the events
    /// applied by this call; they are also appended to the history.
    fn mutate<R: Rng>(&mut self, ctx: &mut GeneticContext<'_, R>) -> Vec<MutationEvent>;

    #[must_use]
    fn express_traits(&self) -> TraitMap;

    /// Numeric phenotype of one trait.
    #[must_use]
    fn expressed_value(&self, kind: TraitKind) -> Option<f64>;

    /// Similarity in [0, 1] over shared numeric traits.
    #[must_use]
    fn calculate_compatibility(&self, other: &Genome) -> f64;

    /// Swaps numeric alleles wherever `dominant < recessive`.
    fn enforce_allele_order(&mut self);
}

impl GenomeLogic for Genome {
    fn random_for_preset<R: Rng>(preset: SpeciesPreset, rng: &mut R) -> Self {
        factory::create_random_genome(preset, rng)
    }

    fn combine<R: Rng>(&self, other: &Genome, ctx: &mut GeneticContext<'_, R>) -> Genome {
        crossover::combine_genomes(self, other, ctx)
    }

    fn mutate<R: Rng>(&mut self, ctx: &mut GeneticContext<'_, R>) -> Vec<MutationEvent> {
        mutation::mutate_genome(self, ctx)
    }

    fn express_traits(&self) -> TraitMap {
        expression::express_traits(self)
    }

    fn expressed_value(&self, kind: TraitKind) -> Option<f64> {
        expression::express_trait(self, kind).and_then(Phenotype::value)
    }

    fn calculate_compatibility(&self, other: &Genome) -> f64 {
        expression::compatibility(self, other)
    }

    fn enforce_allele_order(&mut self) {
        for pair in self.traits.values_mut() {
            order_alleles(pair);
        }
    }
}

pub(crate) fn order_alleles(pair: &mut TraitPair) {
    if let TraitPair::Numeric {
        dominant,
        recessive,
    } = pair
    {
        if *dominant < *recessive {
            std::mem::swap(dominant, recessive);
        }
    }
}

/// Clamps a probability-like scalar into [0, 1]; non-finite input becomes 0.
pub(crate) fn unit_interval(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

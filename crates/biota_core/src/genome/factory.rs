//! Preset-driven genome generation.
//!
//! Every call draws each trait independently inside its preset's range, so
//! two genomes from the same preset are never identical.

use super::mutation::random_ability;
use crate::error::EcologyError;
use biota_data::{Genome, SpecialAbility, TraitKind, TraitPair};
use rand::Rng;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeciesPreset {
    Producer,
    PrimaryConsumer,
    SecondaryConsumer,
}

/// Trait ranges and scalar bands of one preset.
struct PresetProfile {
    ranges: [(TraitKind, Range<f64>); 9],
    special_chance: f64,
    ability_chance: f64,
    abilities: &'static [SpecialAbility],
    mutation_rate: Range<f64>,
    mutation_intensity: Range<f64>,
}

impl SpeciesPreset {
    pub const ALL: [SpeciesPreset; 3] = [
        SpeciesPreset::Producer,
        SpeciesPreset::PrimaryConsumer,
        SpeciesPreset::SecondaryConsumer,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Producer => "producer",
            Self::PrimaryConsumer => "primary_consumer",
            Self::SecondaryConsumer => "secondary_consumer",
        }
    }

    fn profile(self) -> PresetProfile {
        match self {
            Self::Producer => PresetProfile {
                ranges: [
                    (TraitKind::Speed, 0.1..0.3),
                    (TraitKind::Size, 0.5..1.5),
                    (TraitKind::Strength, 0.1..0.4),
                    (TraitKind::Intelligence, 0.1..0.2),
                    (TraitKind::Aggression, 0.1..0.15),
                    (TraitKind::ReproductionRate, 0.6..0.9),
                    (TraitKind::Lifespan, 1.0..3.0),
                    (TraitKind::WaterDependency, 0.6..1.0),
                    (TraitKind::TemperatureTolerance, 0.3..0.7),
                ],
                special_chance: 0.05,
                ability_chance: 0.1,
                abilities: &[SpecialAbility::Thorns],
                mutation_rate: 0.02..0.05,
                mutation_intensity: 0.05..0.1,
            },
            Self::PrimaryConsumer => PresetProfile {
                ranges: [
                    (TraitKind::Speed, 0.8..1.6),
                    (TraitKind::Size, 0.6..1.4),
                    (TraitKind::Strength, 0.4..0.9),
                    (TraitKind::Intelligence, 0.3..0.6),
                    (TraitKind::Aggression, 0.1..0.3),
                    (TraitKind::ReproductionRate, 0.4..0.7),
                    (TraitKind::Lifespan, 0.8..1.5),
                    (TraitKind::WaterDependency, 0.4..0.7),
                    (TraitKind::TemperatureTolerance, 0.3..0.7),
                ],
                special_chance: 0.15,
                ability_chance: 0.1,
                abilities: &[
                    SpecialAbility::Burrowing,
                    SpecialAbility::Flight,
                    SpecialAbility::Echolocation,
                ],
                mutation_rate: 0.03..0.07,
                mutation_intensity: 0.08..0.15,
            },
            Self::SecondaryConsumer => PresetProfile {
                ranges: [
                    (TraitKind::Speed, 1.4..2.4),
                    (TraitKind::Size, 1.0..2.0),
                    (TraitKind::Strength, 0.8..1.5),
                    (TraitKind::Intelligence, 0.6..1.0),
                    (TraitKind::Aggression, 0.6..1.0),
                    (TraitKind::ReproductionRate, 0.15..0.35),
                    (TraitKind::Lifespan, 1.0..2.0),
                    (TraitKind::WaterDependency, 0.3..0.6),
                    (TraitKind::TemperatureTolerance, 0.4..0.8),
                ],
                special_chance: 0.35,
                ability_chance: 0.3,
                abilities: &[
                    SpecialAbility::Venom,
                    SpecialAbility::Echolocation,
                    SpecialAbility::Flight,
                ],
                mutation_rate: 0.04..0.08,
                mutation_intensity: 0.1..0.2,
            },
        }
    }
}

impl fmt::Display for SpeciesPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeciesPreset {
    type Err = EcologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plant" | "producer" => Ok(Self::Producer),
            "herbivore" | "creature" | "primary" | "primary_consumer" => {
                Ok(Self::PrimaryConsumer)
            }
            "predator" | "carnivore" | "secondary" | "secondary_consumer" => {
                Ok(Self::SecondaryConsumer)
            }
            other => Err(EcologyError::UnknownPreset(other.to_string())),
        }
    }
}

pub fn create_random_genome<R: Rng + ?Sized>(preset: SpeciesPreset, rng: &mut R) -> Genome {
    let profile = preset.profile();
    let mut genome = Genome::default();

    for (kind, range) in &profile.ranges {
        let pair = TraitPair::numeric(rng.gen_range(range.clone()), rng.gen_range(range.clone()));
        genome.traits.insert(*kind, pair);
    }

    for kind in biota_data::SPECIAL_TRAITS {
        let pair = if rng.gen_bool(profile.special_chance) {
            TraitPair::numeric(rng.gen_range(0.3..1.0), rng.gen_range(0.1..0.5))
        } else {
            TraitPair::numeric(0.0, 0.0)
        };
        genome.traits.insert(kind, pair);
    }

    let dominant = rng
        .gen_bool(profile.ability_chance)
        .then(|| profile.abilities[rng.gen_range(0..profile.abilities.len())]);
    let recessive = rng
        .gen_bool(profile.ability_chance / 2.0)
        .then(|| random_ability(rng));
    genome
        .traits
        .insert(TraitKind::SpecialAbility, TraitPair::categorical(dominant, recessive));

    genome.base_mutation_rate = rng.gen_range(profile.mutation_rate);
    genome.mutation_intensity = rng.gen_range(profile.mutation_intensity);
    genome
}

/// Resolves `name` to a preset and draws a genome for it. Unknown names get
/// the schema-default genome.
pub fn create_genome_for<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Genome {
    match name.parse::<SpeciesPreset>() {
        Ok(preset) => create_random_genome(preset, rng),
        Err(err) => {
            tracing::debug!(%err, "Falling back to default genome");
            Genome::default()
        }
    }
}

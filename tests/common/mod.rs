pub mod macros;

use biota_data::{Attribute, Genome, Specimen, TraitKind, TraitPair, TrophicLevel};
use biota_lib::model::config::AppConfig;
use biota_lib::model::trophic::TrophicRegistry;
use biota_lib::model::world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[allow(dead_code)]
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// plant (producer) <- herbivore (primary) <- wolf (secondary).
#[allow(dead_code)]
pub fn example_registry() -> TrophicRegistry {
    let mut registry = TrophicRegistry::new();
    registry
        .register_type("plant", TrophicLevel::Producer, &[] as &[&str])
        .expect("plant");
    registry
        .register_type("herbivore", TrophicLevel::Primary, &["plant"])
        .expect("herbivore");
    registry
        .register_type("wolf", TrophicLevel::Secondary, &["herbivore"])
        .expect("wolf");
    registry
}

/// Genome with a single `speed` trait that never mutates unless asked to.
#[allow(dead_code)]
pub fn speed_genome(dominant: f64, recessive: f64) -> Genome {
    let mut genome = Genome::from_traits([(TraitKind::Speed, TraitPair::numeric(dominant, recessive))]);
    genome.base_mutation_rate = 0.0;
    genome
}

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    organisms: Vec<Specimen>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        let s = &mut config.simulation;
        s.initial_producers = 0;
        s.initial_primary = 0;
        s.initial_secondary = 0;
        s.initial_tertiary = 0;
        s.initial_decomposers = 0;
        s.seed = Some(0);
        Self {
            config,
            organisms: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_organism(mut self, specimen: Specimen) -> Self {
        self.organisms.push(specimen);
        self
    }

    /// Spawns the configured initial populations, then the extra organisms.
    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        for specimen in self.organisms {
            world.spawn_specimen(specimen);
        }
        world
    }
}

#[allow(dead_code)]
pub struct SpecimenBuilder {
    specimen: Specimen,
}

#[allow(dead_code)]
impl SpecimenBuilder {
    pub fn new(element_type: &str) -> Self {
        Self {
            specimen: Specimen::new(element_type)
                .with_attribute(Attribute::Health, 100.0)
                .with_attribute(Attribute::Energy, 60.0),
        }
    }

    pub fn speed(mut self, value: f64) -> Self {
        self.specimen.set_attribute(Attribute::Speed, value);
        self
    }

    pub fn size(mut self, value: f64) -> Self {
        self.specimen.set_attribute(Attribute::Size, value);
        self
    }

    pub fn health(mut self, value: f64) -> Self {
        self.specimen.set_attribute(Attribute::Health, value);
        self
    }

    pub fn energy(mut self, value: f64) -> Self {
        self.specimen.set_attribute(Attribute::Energy, value);
        self
    }

    pub fn age(mut self, value: f64) -> Self {
        self.specimen.set_attribute(Attribute::Age, value);
        self
    }

    pub fn genome(mut self, genome: Genome) -> Self {
        self.specimen.genome = Some(genome);
        self
    }

    pub fn build(self) -> Specimen {
        self.specimen
    }
}

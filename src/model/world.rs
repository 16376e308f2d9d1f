use crate::model::config::AppConfig;
use crate::model::trophic::{CREATURE, FUNGUS, PLANT, PREDATOR, TRIBE};
use biota_core::genome::{create_genome_for, GeneticContext, GenomeLogic};
use biota_core::notify::{NotificationSink, Tee, TracingSink};
use biota_core::systems::attempt_reproduction;
use biota_core::{FoodWeb, Metrics};
use biota_data::{
    Attribute, Genome, Notification, Specimen, TraitKind, TrophicLevel, LIFESPAN_TICKS,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use uuid::Uuid;

pub const MAX_HEALTH: f64 = 100.0;
pub const MAX_ENERGY: f64 = 100.0;
pub const INITIAL_ENERGY: f64 = 60.0;
pub const CHILD_ENERGY: f64 = 40.0;
/// Energy producers gain per tick.
pub const PHOTOSYNTHESIS_RATE: f64 = 1.5;
/// Energy consumers lose per tick and unit of size.
pub const BASE_METABOLISM: f64 = 0.4;
pub const STARVATION_DAMAGE: f64 = 4.0;
/// Consumers only hunt below this energy.
pub const HUNGER_THRESHOLD: f64 = 70.0;
pub const CHASE_COST: f64 = 1.0;
pub const REPRODUCTION_ENERGY: f64 = 50.0;
pub const REPRODUCTION_COST: f64 = 20.0;
/// Energy a corpse holds per unit of size on top of its stored energy.
pub const BIOMASS_PER_SIZE: f64 = 10.0;
/// Health change per unit of cascade magnitude.
pub const CASCADE_HEALTH_SCALE: f64 = 0.05;

pub const CAUSE_PREDATION: &str = "predation";
pub const CAUSE_HEALTH_DEPLETED: &str = "health_depleted";
pub const CAUSE_OLD_AGE: &str = "old_age";

/// End-of-run report, serialized as JSON by the binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    pub tick: u64,
    pub seed: u64,
    pub total: usize,
    pub counts: BTreeMap<String, u64>,
    pub pyramid: BTreeMap<TrophicLevel, u64>,
    pub max_generation: u32,
    pub births: u64,
    pub mutations: u64,
    pub crossovers: u64,
    pub predation_attempts: u64,
    pub predation_successes: u64,
    pub cascade_effects: u64,
}

/// Headless, tick-driven ecosystem around one [`FoodWeb`].
pub struct World {
    pub tick: u64,
    pub organisms: Vec<Specimen>,
    pub food_web: FoodWeb,
    pub config: AppConfig,
    pub metrics: Metrics,
    seed: u64,
    rng: ChaCha8Rng,
}

impl World {
    /// Builds a world and spawns the initial populations of the seed types.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let mut world = Self::empty(config)?;
        let s = &world.config.simulation;
        let plan = [
            (PLANT, s.initial_producers),
            (CREATURE, s.initial_primary),
            (PREDATOR, s.initial_secondary),
            (TRIBE, s.initial_tertiary),
            (FUNGUS, s.initial_decomposers),
        ];
        for (element_type, count) in plan {
            for _ in 0..count {
                let genome = create_genome_for(element_type, &mut world.rng);
                let age = world.rng.gen_range(0.0..0.5) * lifespan_ticks(Some(&genome));
                world.spawn(element_type, genome, INITIAL_ENERGY, age);
            }
        }
        tracing::info!(
            seed = world.seed,
            population = world.organisms.len(),
            "World created"
        );
        Ok(world)
    }

    /// World with the seed registry but no organisms.
    pub fn empty(config: AppConfig) -> anyhow::Result<Self> {
        let food_web = FoodWeb::with_config(&config)?;
        let seed = config.simulation.seed.unwrap_or_else(rand::random);
        Ok(Self {
            tick: 0,
            organisms: Vec::new(),
            food_web,
            metrics: Metrics::new(config.simulation.log_interval),
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Spawns a fresh organism carrying `genome`.
    pub fn spawn(&mut self, element_type: &str, genome: Genome, energy: f64, age: f64) -> Uuid {
        let id = Uuid::from_u128(self.rng.gen());
        let speed = genome.expressed_value(TraitKind::Speed).unwrap_or(1.0);
        let size = genome.expressed_value(TraitKind::Size).unwrap_or(1.0);
        let specimen = Specimen::new(element_type)
            .with_id(id)
            .with_attribute(Attribute::Speed, speed)
            .with_attribute(Attribute::Size, size)
            .with_attribute(Attribute::Health, MAX_HEALTH)
            .with_attribute(Attribute::Energy, energy)
            .with_attribute(Attribute::Age, age)
            .with_genome(genome);
        self.spawn_specimen(specimen);
        id
    }

    /// Adds a prepared organism and records its creation.
    pub fn spawn_specimen(&mut self, specimen: Specimen) {
        self.food_web.on_element_created(&specimen.element_type);
        self.organisms.push(specimen);
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.organisms.len()
    }

    pub fn organisms_of<'a>(&'a self, element_type: &'a str) -> impl Iterator<Item = &'a Specimen> {
        self.organisms
            .iter()
            .filter(move |o| o.element_type == element_type)
    }

    /// Runs one tick and returns every notification it produced.
    pub fn update(&mut self) -> Vec<Notification> {
        let start = Instant::now();
        self.tick += 1;
        let mut events = Vec::new();
        {
            let mut sink = Tee::new(&mut events, TracingSink);
            self.metabolize();
            let mut dead = self.hunt();
            self.collect_natural_deaths(&mut dead);
            self.remove_dead(&dead, &mut sink);
            self.reproduce(&mut sink);
        }
        for notification in &events {
            self.metrics.observe(notification);
        }
        self.metrics.record_tick(start.elapsed(), self.organisms.len());
        events
    }

    fn metabolize(&mut self) {
        for organism in &mut self.organisms {
            let level = self.food_web.get_trophic_level(&organism.element_type);
            let age = organism.attribute_or(Attribute::Age, 0.0) + 1.0;
            let size = organism.attribute_or(Attribute::Size, 1.0);
            let mut energy = organism.attribute_or(Attribute::Energy, 0.0);
            let mut health = organism.attribute_or(Attribute::Health, MAX_HEALTH);

            if level == Some(TrophicLevel::Producer) {
                energy += PHOTOSYNTHESIS_RATE;
            } else {
                energy -= BASE_METABOLISM * size;
            }
            if energy <= 0.0 {
                energy = 0.0;
                health -= STARVATION_DAMAGE;
            }
            let regeneration = organism
                .genome
                .as_ref()
                .and_then(|g| g.expressed_value(TraitKind::Regeneration))
                .unwrap_or(0.0);
            health = (health + regeneration).min(MAX_HEALTH);

            organism.set_attribute(Attribute::Age, age);
            organism.set_attribute(Attribute::Energy, energy.min(MAX_ENERGY));
            organism.set_attribute(Attribute::Health, health);
        }
    }

    /// One predation attempt per hungry consumer. Returns killed indices.
    fn hunt(&mut self) -> BTreeMap<usize, &'static str> {
        let mut dead = BTreeMap::new();
        let mut by_type: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, organism) in self.organisms.iter().enumerate() {
            by_type
                .entry(organism.element_type.clone())
                .or_default()
                .push(i);
        }

        for i in 0..self.organisms.len() {
            if dead.contains_key(&i) {
                continue;
            }
            let predator = &self.organisms[i];
            if predator.attribute_or(Attribute::Energy, 0.0) >= HUNGER_THRESHOLD {
                continue;
            }
            let candidates: Vec<usize> = self
                .food_web
                .registry()
                .prey_types_for(&predator.element_type)
                .iter()
                .filter_map(|t| by_type.get(t))
                .flatten()
                .copied()
                .filter(|j| *j != i && !dead.contains_key(j))
                .collect();
            let Some(&j) = candidates.choose(&mut self.rng) else {
                continue;
            };

            let outcome = self.food_web.process_predator_prey_interaction(
                &self.organisms[i],
                &self.organisms[j],
                &mut self.rng,
            );
            self.metrics.record_predation(&outcome);

            let predator = &mut self.organisms[i];
            let energy = predator.attribute_or(Attribute::Energy, 0.0);
            if outcome.success {
                predator.set_attribute(
                    Attribute::Energy,
                    (energy + outcome.energy_gained).min(MAX_ENERGY),
                );
                dead.insert(j, CAUSE_PREDATION);
            } else {
                predator.set_attribute(Attribute::Energy, (energy - CHASE_COST).max(0.0));
            }
        }
        dead
    }

    fn collect_natural_deaths(&self, dead: &mut BTreeMap<usize, &'static str>) {
        for (i, organism) in self.organisms.iter().enumerate() {
            if dead.contains_key(&i) {
                continue;
            }
            if organism.attribute_or(Attribute::Health, MAX_HEALTH) <= 0.0 {
                dead.insert(i, CAUSE_HEALTH_DEPLETED);
            } else if organism.attribute_or(Attribute::Age, 0.0)
                >= lifespan_ticks(organism.genome.as_ref())
            {
                dead.insert(i, CAUSE_OLD_AGE);
            }
        }
    }

    /// Removes the dead, feeds their remains to decomposers and applies the
    /// resulting cascade effects to the survivors.
    fn remove_dead(&mut self, dead: &BTreeMap<usize, &'static str>, sink: &mut dyn NotificationSink) {
        if dead.is_empty() {
            return;
        }
        let mut effects = Vec::new();
        let mut biomass = 0.0;
        for (&i, &cause) in dead {
            let organism = &self.organisms[i];
            let level = self
                .food_web
                .get_trophic_level(&organism.element_type)
                .unwrap_or(TrophicLevel::Producer);
            let remains = organism.attribute_or(Attribute::Energy, 0.0).max(0.0)
                + BIOMASS_PER_SIZE * organism.attribute_or(Attribute::Size, 1.0);
            biomass +=
                self.food_web
                    .calculate_energy_transfer(remains, level, TrophicLevel::Decomposer);
            tracing::trace!(
                tick = self.tick,
                element_type = %organism.element_type,
                cause,
                "Organism removed"
            );
            effects.extend(
                self.food_web
                    .on_element_removed(&organism.element_type, cause, sink),
            );
        }

        let mut index = 0;
        self.organisms.retain(|_| {
            let keep = !dead.contains_key(&index);
            index += 1;
            keep
        });

        let decomposers: Vec<usize> = self
            .organisms
            .iter()
            .enumerate()
            .filter(|(_, o)| {
                self.food_web.get_trophic_level(&o.element_type) == Some(TrophicLevel::Decomposer)
            })
            .map(|(i, _)| i)
            .collect();
        if !decomposers.is_empty() {
            let share = biomass / decomposers.len() as f64;
            for i in decomposers {
                let organism = &mut self.organisms[i];
                let energy = organism.attribute_or(Attribute::Energy, 0.0);
                organism.set_attribute(Attribute::Energy, (energy + share).min(MAX_ENERGY));
            }
        }

        for effect in &effects {
            for organism in self
                .organisms
                .iter_mut()
                .filter(|o| o.element_type == effect.target_type)
            {
                let health = organism.attribute_or(Attribute::Health, MAX_HEALTH)
                    + effect.magnitude * CASCADE_HEALTH_SCALE;
                organism.set_attribute(Attribute::Health, health.clamp(0.0, MAX_HEALTH));
            }
        }
    }

    /// Pairs organisms of the same type at random and lets each fed pair try
    /// to reproduce, up to the population cap.
    fn reproduce(&mut self, sink: &mut dyn NotificationSink) {
        let max_population = self.config.simulation.max_population;
        let mut by_type: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, organism) in self.organisms.iter().enumerate() {
            if organism.attribute_or(Attribute::Energy, 0.0) >= REPRODUCTION_ENERGY {
                by_type
                    .entry(organism.element_type.clone())
                    .or_default()
                    .push(i);
            }
        }

        let mut births: Vec<(String, Genome)> = Vec::new();
        'types: for (element_type, mut members) in by_type {
            members.shuffle(&mut self.rng);
            for pair in members.chunks_exact(2) {
                if self.organisms.len() + births.len() >= max_population {
                    break 'types;
                }
                let (a, b) = (pair[0], pair[1]);
                let mut ctx = GeneticContext::new(&self.config.genetics, &mut self.rng, sink);
                let Some(child) =
                    attempt_reproduction(&self.organisms[a], &self.organisms[b], &mut ctx)
                else {
                    continue;
                };
                for parent in [a, b] {
                    let organism = &mut self.organisms[parent];
                    let energy = organism.attribute_or(Attribute::Energy, 0.0);
                    organism.set_attribute(Attribute::Energy, energy - REPRODUCTION_COST);
                }
                births.push((element_type.clone(), child));
            }
        }

        for (element_type, genome) in births {
            self.spawn(&element_type, genome, CHILD_ENERGY, 0.0);
        }
    }

    #[must_use]
    pub fn summary(&self) -> PopulationSummary {
        PopulationSummary {
            tick: self.tick,
            seed: self.seed,
            total: self.organisms.len(),
            counts: self.food_web.get_population_counts(),
            pyramid: self.food_web.trophic_pyramid(),
            max_generation: self
                .organisms
                .iter()
                .filter_map(|o| o.genome.as_ref().map(|g| g.generation))
                .max()
                .unwrap_or(0),
            births: self.metrics.births(),
            mutations: self.metrics.mutations(),
            crossovers: self.metrics.crossovers(),
            predation_attempts: self.metrics.predation_attempts(),
            predation_successes: self.metrics.predation_successes(),
            cascade_effects: self.metrics.cascade_effects(),
        }
    }
}

/// Lifespan in ticks; organisms without a genome get one unit.
#[must_use]
pub fn lifespan_ticks(genome: Option<&Genome>) -> f64 {
    genome
        .and_then(|g| g.expressed_value(TraitKind::Lifespan))
        .unwrap_or(1.0)
        .max(0.1)
        * LIFESPAN_TICKS
}

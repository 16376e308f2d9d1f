//! Configuration management for engine and host parameters.
//!
//! Strongly-typed sections that map onto `config.toml`. Every section has a
//! `Default` carrying the engine's reference constants, so a partial file only
//! overrides what it names.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [genetics]
//! crossover_chance = 0.1
//!
//! [ecology]
//! energy_efficiency = 0.1
//!
//! [cascade]
//! max_depth = 3
//! decay = 0.7
//!
//! [simulation]
//! seed = 42
//! ticks = 500
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relative weights of the four mutation kinds. Need not sum to one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MutationWeights {
    pub point: f64,
    pub jump: f64,
    pub activation: f64,
    pub deactivation: f64,
}

impl Default for MutationWeights {
    fn default() -> Self {
        Self {
            point: 0.85,
            jump: 0.10,
            activation: 0.03,
            deactivation: 0.02,
        }
    }
}

impl MutationWeights {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.point + self.jump + self.activation + self.deactivation
    }
}

/// Inheritance and mutation parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Per-trait chance of blending the two seeded alleles.
    pub crossover_chance: f64,
    /// Blend fraction is drawn from `[0, crossover_max_fraction)`.
    pub crossover_max_fraction: f64,
    /// Magnitude multiplier of a jump over a point mutation.
    pub jump_multiplier: f64,
    pub mutation_weights: MutationWeights,
    /// Minimum genome compatibility for two organisms to mate.
    pub min_reproduction_compatibility: f64,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            crossover_chance: 0.10,
            crossover_max_fraction: 0.3,
            jump_multiplier: 3.0,
            mutation_weights: MutationWeights::default(),
            min_reproduction_compatibility: 0.3,
        }
    }
}

/// Predation and energy-transfer parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EcologyConfig {
    /// Fraction of energy that survives one trophic step.
    pub energy_efficiency: f64,
    pub base_success: f64,
    pub speed_weight: f64,
    pub size_weight: f64,
    pub health_weight: f64,
    pub intelligence_weight: f64,
    pub min_success: f64,
    pub max_success: f64,
    /// Intelligence assumed when a genome lacks the trait.
    pub default_intelligence: f64,
}

impl Default for EcologyConfig {
    fn default() -> Self {
        Self {
            energy_efficiency: 0.1,
            base_success: 0.5,
            speed_weight: 0.4,
            size_weight: 0.3,
            health_weight: 0.2,
            intelligence_weight: 0.1,
            min_success: 0.1,
            max_success: 0.9,
            default_intelligence: 0.5,
        }
    }
}

/// Cascade propagation parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CascadeConfig {
    /// Hard recursion limit of one removal walk.
    pub max_depth: u32,
    /// Strength multiplier per depth step.
    pub decay: f64,
    /// Scale of the effect on tertiary consumers of a removed predator.
    pub tertiary_factor: f64,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            decay: 0.7,
            tertiary_factor: 0.5,
        }
    }
}

/// Host simulation parameters. Not read by the engine itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: Option<u64>,
    pub ticks: u64,
    pub initial_producers: usize,
    pub initial_primary: usize,
    pub initial_secondary: usize,
    pub initial_tertiary: usize,
    pub initial_decomposers: usize,
    pub max_population: usize,
    /// Metrics summary interval in ticks.
    pub log_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ticks: 500,
            initial_producers: 120,
            initial_primary: 40,
            initial_secondary: 10,
            initial_tertiary: 4,
            initial_decomposers: 10,
            max_population: 1000,
            log_interval: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub genetics: GeneticsConfig,
    pub ecology: EcologyConfig,
    pub cascade: CascadeConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Err` describing the first rule that fails.
    pub fn validate(&self) -> anyhow::Result<()> {
        let g = &self.genetics;
        anyhow::ensure!(
            (0.0..=1.0).contains(&g.crossover_chance),
            "Crossover chance must be in [0, 1]"
        );
        anyhow::ensure!(
            (0.0..1.0).contains(&g.crossover_max_fraction),
            "Crossover fraction must be in [0, 1)"
        );
        anyhow::ensure!(g.jump_multiplier > 0.0, "Jump multiplier must be positive");
        let w = &g.mutation_weights;
        anyhow::ensure!(
            w.point >= 0.0 && w.jump >= 0.0 && w.activation >= 0.0 && w.deactivation >= 0.0,
            "Mutation weights must be non-negative"
        );
        anyhow::ensure!(w.total() > 0.0, "Mutation weights must not all be zero");
        anyhow::ensure!(
            (0.0..=1.0).contains(&g.min_reproduction_compatibility),
            "Reproduction compatibility threshold must be in [0, 1]"
        );

        let e = &self.ecology;
        anyhow::ensure!(
            e.energy_efficiency > 0.0 && e.energy_efficiency <= 1.0,
            "Energy efficiency must be in (0, 1]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&e.min_success) && (0.0..=1.0).contains(&e.max_success),
            "Predation bounds must be in [0, 1]"
        );
        anyhow::ensure!(
            e.min_success <= e.max_success,
            "Minimum predation success exceeds maximum"
        );
        anyhow::ensure!(
            e.speed_weight >= 0.0
                && e.size_weight >= 0.0
                && e.health_weight >= 0.0
                && e.intelligence_weight >= 0.0,
            "Predation weights must be non-negative"
        );
        anyhow::ensure!(
            e.default_intelligence > 0.0,
            "Default intelligence must be positive"
        );

        let c = &self.cascade;
        anyhow::ensure!(c.max_depth <= 16, "Cascade depth too large (max 16)");
        anyhow::ensure!(
            c.decay > 0.0 && c.decay <= 1.0,
            "Cascade decay must be in (0, 1]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&c.tertiary_factor),
            "Tertiary factor must be in [0, 1]"
        );

        let s = &self.simulation;
        anyhow::ensure!(s.max_population > 0, "Max population must be positive");
        anyhow::ensure!(
            s.max_population <= 100_000,
            "Max population too large (max 100000)"
        );
        anyhow::ensure!(s.log_interval > 0, "Log interval must be positive");

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// SHA-256 over the engine sections, logged next to the seed so a run can
    /// be replayed with the same parameters.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.genetics).as_bytes());
        hasher.update(format!("{:?}", self.ecology).as_bytes());
        hasher.update(format!("{:?}", self.cascade).as_bytes());
        hex::encode(hasher.finalize())
    }
}

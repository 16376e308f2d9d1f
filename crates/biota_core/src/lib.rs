//! # Biota Core
//!
//! The genetic inheritance and food-web engine of the Biota ecosystem.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Paired-allele genomes with crossover and four mutation kinds
//! - Preset-driven random genome generation
//! - Trophic levels and predator-prey lookup
//! - Predation success and lossy energy transfer
//! - Population counting and cascade propagation of removals
//! - Metrics collection and structured logging
//!
//! All randomness comes from an injected `Rng`; a fixed seed reproduces
//! every child genome and every predation roll.
//!
//! ## Example
//!
//! ```
//! use biota_core::config::GeneticsConfig;
//! use biota_core::genome::{GeneticContext, GenomeLogic, SpeciesPreset};
//! use biota_core::notify::NullSink;
//! use biota_data::Genome;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let a = Genome::random_for_preset(SpeciesPreset::PrimaryConsumer, &mut rng);
//! let b = Genome::random_for_preset(SpeciesPreset::PrimaryConsumer, &mut rng);
//!
//! let config = GeneticsConfig::default();
//! let mut sink = NullSink;
//! let mut ctx = GeneticContext::new(&config, &mut rng, &mut sink);
//! let child = a.combine(&b, &mut ctx);
//! assert_eq!(child.generation, 1);
//! ```

/// Configuration management for engine and host parameters
pub mod config;
/// Error types for ecological programmer errors
pub mod error;
/// Per-simulation registry, ledger and predation facade
pub mod food_web;
/// Genome combination, mutation, expression and presets
pub mod genome;
/// Performance metrics collection and logging
pub mod metrics;
/// Notification sinks standing in for the host's event bus
pub mod notify;
/// Population counts per element type
pub mod population;
/// Predation, reproduction and cascade systems
pub mod systems;
/// Trophic levels and predator-prey relationships
pub mod trophic;

pub use error::{EcologyError, Result};
pub use food_web::FoodWeb;
pub use genome::{GeneticContext, GenomeLogic, SpeciesPreset};
pub use metrics::{init_logging, Metrics};
pub use notify::{NotificationSink, NullSink, Tee, TracingSink};
pub use population::PopulationLedger;
pub use trophic::TrophicRegistry;

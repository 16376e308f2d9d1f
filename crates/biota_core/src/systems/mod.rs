//! Per-tick ecological systems.

pub mod cascade;
pub mod predation;
pub mod reproduction;

pub use cascade::CascadePropagator;
pub use predation::{calculate_energy_transfer, PredationEvaluator};
pub use reproduction::{attempt_reproduction, reproduction_chance};

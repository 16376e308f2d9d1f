//! Error types for biota_core.
//!
//! The engine degrades silently wherever it can (unknown types, missing
//! traits). These variants cover the few requests that are programmer errors.

use biota_data::TrophicLevel;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcologyError {
    /// Producers and decomposers cannot declare prey.
    #[error("{element_type} is a {level} and cannot declare prey ({prey_count} given)")]
    PreyOnBaseLevel {
        element_type: String,
        level: TrophicLevel,
        prey_count: usize,
    },

    #[error("Negative population count {count} requested for {element_type}")]
    NegativePopulation { element_type: String, count: i64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown species preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, EcologyError>;

impl EcologyError {
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

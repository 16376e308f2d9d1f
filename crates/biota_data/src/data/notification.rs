use super::ecology::CascadeEffect;
use super::genome::{MutationEvent, TraitSnapshot};
use serde::{Deserialize, Serialize};

/// Outgoing notification published to the host's event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    Reproduction {
        parent_a: TraitSnapshot,
        parent_b: TraitSnapshot,
        child: TraitSnapshot,
        child_generation: u32,
    },
    Mutation(MutationEvent),
    CascadeEffect(CascadeEffect),
}

/// Incoming population-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ElementEvent {
    Created { element_type: String },
    Removed { element_type: String, cause: String },
}

impl ElementEvent {
    #[must_use]
    pub fn element_type(&self) -> &str {
        match self {
            Self::Created { element_type } | Self::Removed { element_type, .. } => element_type,
        }
    }
}

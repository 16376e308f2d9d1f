//! Cascade propagation of population removals through the food web.
//!
//! A removal walks trophic linkage outward from the removed type. Effects
//! decay by `decay^depth` and the walk is cut off by a hard depth budget, so
//! it terminates on any registry, cyclic ones included. Each type receives at
//! most one effect per walk.

use crate::config::CascadeConfig;
use crate::notify::NotificationSink;
use crate::trophic::TrophicRegistry;
use biota_data::{CascadeEffect, CascadeReason, InteractionKind, Notification, TrophicLevel};
use std::collections::BTreeSet;

/// One pending effect before strength is applied.
struct Link {
    target: String,
    factor: f64,
    reason: CascadeReason,
}

/// Shared state of one removal walk.
struct Walk<'s> {
    cause: &'s str,
    visited: BTreeSet<String>,
    effects: Vec<CascadeEffect>,
    sink: &'s mut dyn NotificationSink,
}

pub struct CascadePropagator<'a> {
    pub registry: &'a TrophicRegistry,
    pub config: &'a CascadeConfig,
}

impl<'a> CascadePropagator<'a> {
    #[must_use]
    pub fn new(registry: &'a TrophicRegistry, config: &'a CascadeConfig) -> Self {
        Self { registry, config }
    }

    /// Propagates the removal of one `element_type` organism. Every effect is
    /// emitted to `sink` as it is produced and also returned in order.
    pub fn propagate(
        &self,
        element_type: &str,
        cause: &str,
        sink: &mut dyn NotificationSink,
    ) -> Vec<CascadeEffect> {
        let mut walk = Walk {
            cause,
            visited: BTreeSet::new(),
            effects: Vec::new(),
            sink,
        };
        self.step(element_type, 0, self.config.max_depth, &mut walk);
        tracing::debug!(
            element_type,
            cause,
            effects = walk.effects.len(),
            "Cascade walk finished"
        );
        walk.effects
    }

    fn step(&self, source: &str, depth: u32, remaining: u32, walk: &mut Walk<'_>) {
        let Some(remaining) = remaining.checked_sub(1) else {
            return;
        };
        let strength = self.config.decay.powi(i32::try_from(depth).unwrap_or(i32::MAX));

        let mut next = Vec::new();
        for link in self.links_from(source) {
            if !walk.visited.insert(link.target.clone()) {
                continue;
            }
            let effect = CascadeEffect {
                source_type: source.to_string(),
                target_type: link.target.clone(),
                interaction: InteractionKind::CascadeEffect,
                magnitude: link.factor * strength,
                reason: link.reason,
                cause: walk.cause.to_string(),
                depth,
            };
            walk.sink.emit(Notification::CascadeEffect(effect.clone()));
            walk.effects.push(effect);
            next.push(link.target);
        }

        for target in next {
            self.step(&target, depth + 1, remaining, walk);
        }
    }

    /// Linked types of `source`, grouped by rule and sorted within a group.
    fn links_from(&self, source: &str) -> Vec<Link> {
        let registry = self.registry;
        let at = |names: BTreeSet<String>, level: TrophicLevel| {
            names
                .into_iter()
                .filter(move |n| registry.trophic_level_of(n) == Some(level))
        };
        let link = |factor: f64, reason: CascadeReason| move |target: String| Link {
            target,
            factor,
            reason,
        };

        match registry.trophic_level_of(source) {
            Some(TrophicLevel::Producer) => at(
                registry.predator_types_for(source),
                TrophicLevel::Primary,
            )
            .map(link(-1.0, CascadeReason::FoodSourceDecline))
            .collect(),
            Some(TrophicLevel::Primary) => at(
                registry.predator_types_for(source),
                TrophicLevel::Secondary,
            )
            .map(link(-1.0, CascadeReason::FoodSourceDecline))
            .chain(
                at(registry.prey_types_for(source), TrophicLevel::Producer)
                    .map(link(1.0, CascadeReason::ReducedPredationPressure)),
            )
            .collect(),
            Some(TrophicLevel::Secondary) => {
                let prey = registry.prey_types_for(source);
                let mut tertiary = registry.predator_types_for(source);
                for p in &prey {
                    tertiary.extend(registry.predator_types_for(p));
                }
                at(prey, TrophicLevel::Primary)
                    .map(link(1.0, CascadeReason::ReducedPredationPressure))
                    .chain(
                        at(tertiary, TrophicLevel::Tertiary).map(link(
                            -self.config.tertiary_factor,
                            CascadeReason::FoodChainDisruption,
                        )),
                    )
                    .collect()
            }
            Some(TrophicLevel::Tertiary | TrophicLevel::Decomposer) | None => Vec::new(),
        }
    }
}

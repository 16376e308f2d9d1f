//! Per-simulation food-web state.
//!
//! `FoodWeb` owns the trophic registry and the population ledger of one
//! simulation instance. Independent simulations hold independent webs.

use crate::config::{AppConfig, CascadeConfig, EcologyConfig};
use crate::error::{EcologyError, Result};
use crate::notify::NotificationSink;
use crate::population::PopulationLedger;
use crate::systems::{calculate_energy_transfer, CascadePropagator, PredationEvaluator};
use crate::trophic::TrophicRegistry;
use biota_data::{CascadeEffect, ElementEvent, Organism, PredationOutcome, TrophicLevel};
use rand::Rng;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct FoodWeb {
    registry: TrophicRegistry,
    ledger: PopulationLedger,
    ecology: EcologyConfig,
    cascade: CascadeConfig,
}

impl Default for FoodWeb {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodWeb {
    /// Web with the built-in seed registry and default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: TrophicRegistry::seeded(),
            ledger: PopulationLedger::new(),
            ecology: EcologyConfig::default(),
            cascade: CascadeConfig::default(),
        }
    }

    /// Web with no registered types.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            registry: TrophicRegistry::new(),
            ..Self::new()
        }
    }

    /// Seeded web using the engine sections of `config`.
    pub fn with_config(config: &AppConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EcologyError::invalid_config(format!("{e:#}")))?;
        Ok(Self {
            ecology: config.ecology.clone(),
            cascade: config.cascade.clone(),
            ..Self::new()
        })
    }

    #[must_use]
    pub fn registry(&self) -> &TrophicRegistry {
        &self.registry
    }

    #[must_use]
    pub fn ledger(&self) -> &PopulationLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut PopulationLedger {
        &mut self.ledger
    }

    #[must_use]
    pub fn ecology_config(&self) -> &EcologyConfig {
        &self.ecology
    }

    pub fn register_element_type<S: AsRef<str>>(
        &mut self,
        element_type: &str,
        level: TrophicLevel,
        prey: &[S],
    ) -> Result<()> {
        self.registry.register_type(element_type, level, prey)
    }

    #[must_use]
    pub fn is_predator_prey_relationship(&self, predator: &str, prey: &str) -> bool {
        self.registry.is_predator_prey_pair(predator, prey)
    }

    #[must_use]
    pub fn get_trophic_level(&self, element_type: &str) -> Option<TrophicLevel> {
        self.registry.trophic_level_of(element_type)
    }

    fn evaluator(&self) -> PredationEvaluator<'_> {
        PredationEvaluator::new(&self.registry, &self.ecology)
    }

    #[must_use]
    pub fn calculate_predation_success(&self, predator: &dyn Organism, prey: &dyn Organism) -> f64 {
        self.evaluator().calculate_predation_success(predator, prey)
    }

    pub fn process_predator_prey_interaction<R: Rng + ?Sized>(
        &self,
        predator: &dyn Organism,
        prey: &dyn Organism,
        rng: &mut R,
    ) -> PredationOutcome {
        self.evaluator()
            .process_predator_prey_interaction(predator, prey, rng)
    }

    #[must_use]
    pub fn calculate_energy_transfer(
        &self,
        energy: f64,
        source: TrophicLevel,
        target: TrophicLevel,
    ) -> f64 {
        calculate_energy_transfer(energy, source, target, self.ecology.energy_efficiency)
    }

    pub fn update_population_counts(&mut self, elements: &[&dyn Organism]) {
        self.ledger.update_population_counts(elements);
    }

    #[must_use]
    pub fn get_population_counts(&self) -> BTreeMap<String, u64> {
        self.ledger.counts_snapshot()
    }

    pub fn on_element_created(&mut self, element_type: &str) {
        self.ledger.on_element_created(element_type);
    }

    /// Decrements the ledger and propagates the removal through the web.
    pub fn on_element_removed(
        &mut self,
        element_type: &str,
        cause: &str,
        sink: &mut dyn NotificationSink,
    ) -> Vec<CascadeEffect> {
        self.ledger.on_element_removed(element_type);
        CascadePropagator::new(&self.registry, &self.cascade).propagate(element_type, cause, sink)
    }

    pub fn handle_event(
        &mut self,
        event: &ElementEvent,
        sink: &mut dyn NotificationSink,
    ) -> Vec<CascadeEffect> {
        match event {
            ElementEvent::Created { element_type } => {
                self.on_element_created(element_type);
                Vec::new()
            }
            ElementEvent::Removed {
                element_type,
                cause,
            } => self.on_element_removed(element_type, cause, sink),
        }
    }

    /// Live counts summed per trophic level. Unregistered types are left out.
    #[must_use]
    pub fn trophic_pyramid(&self) -> BTreeMap<TrophicLevel, u64> {
        let mut pyramid = BTreeMap::new();
        for (element_type, count) in self.ledger.counts_snapshot() {
            if let Some(level) = self.registry.trophic_level_of(&element_type) {
                *pyramid.entry(level).or_insert(0) += count;
            }
        }
        pyramid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NullSink;
    use crate::trophic::{CREATURE, PLANT, PREDATOR};
    use biota_data::Notification;

    #[test]
    fn test_seeded_web_lookups() {
        let web = FoodWeb::new();
        assert!(web.is_predator_prey_relationship(PREDATOR, CREATURE));
        assert_eq!(web.get_trophic_level(PLANT), Some(TrophicLevel::Producer));
        assert_eq!(web.get_trophic_level("kraken"), None);
        assert!(FoodWeb::empty().registry().is_empty());
    }

    #[test]
    fn test_events_feed_ledger_and_cascade() {
        let mut web = FoodWeb::new();
        let mut sink: Vec<Notification> = Vec::new();
        for _ in 0..3 {
            web.handle_event(
                &ElementEvent::Created {
                    element_type: CREATURE.to_string(),
                },
                &mut sink,
            );
        }
        let effects = web.handle_event(
            &ElementEvent::Removed {
                element_type: CREATURE.to_string(),
                cause: "predation".to_string(),
            },
            &mut sink,
        );
        assert_eq!(web.get_population_counts()[CREATURE], 2);
        assert!(!effects.is_empty());
        assert_eq!(sink.len(), effects.len());
    }

    #[test]
    fn test_pyramid_groups_levels() {
        let mut web = FoodWeb::new();
        web.on_element_created(PLANT);
        web.on_element_created(PLANT);
        web.on_element_created(CREATURE);
        web.on_element_created("kraken");
        let pyramid = web.trophic_pyramid();
        assert_eq!(pyramid.get(&TrophicLevel::Producer), Some(&2));
        assert_eq!(pyramid.get(&TrophicLevel::Primary), Some(&1));
        assert_eq!(pyramid.values().sum::<u64>(), 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.cascade.decay = 2.0;
        assert!(matches!(
            FoodWeb::with_config(&config),
            Err(EcologyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_removal_of_untracked_type_is_harmless() {
        let mut web = FoodWeb::new();
        web.on_element_removed(PLANT, "fire", &mut NullSink);
        assert_eq!(web.ledger().count_of(PLANT), 0);
    }
}

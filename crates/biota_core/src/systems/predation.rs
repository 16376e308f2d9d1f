use crate::config::EcologyConfig;
use crate::genome::GenomeLogic;
use crate::trophic::TrophicRegistry;
use biota_data::{Attribute, Organism, PredationOutcome, TraitKind, TrophicLevel};
use rand::Rng;

/// Smallest divisor used for attribute ratios.
const MIN_ATTRIBUTE: f64 = 1e-6;

/// Success probability and energy payoff of predator-prey encounters.
pub struct PredationEvaluator<'a> {
    pub registry: &'a TrophicRegistry,
    pub config: &'a EcologyConfig,
}

impl<'a> PredationEvaluator<'a> {
    #[must_use]
    pub fn new(registry: &'a TrophicRegistry, config: &'a EcologyConfig) -> Self {
        Self { registry, config }
    }

    /// Probability in `[min_success, max_success]` for a registered pair,
    /// exactly 0 otherwise.
    #[must_use]
    pub fn calculate_predation_success(&self, predator: &dyn Organism, prey: &dyn Organism) -> f64 {
        if !self
            .registry
            .is_predator_prey_pair(predator.element_type(), prey.element_type())
        {
            return 0.0;
        }
        let cfg = self.config;
        let mut chance = cfg.base_success;

        for (attribute, weight) in [
            (Attribute::Speed, cfg.speed_weight),
            (Attribute::Size, cfg.size_weight),
            (Attribute::Health, cfg.health_weight),
        ] {
            if let (Some(a), Some(b)) = (
                predator.try_get_attribute(attribute),
                prey.try_get_attribute(attribute),
            ) {
                chance += weight * (sanitize(a) / sanitize(b) - 1.0);
            }
        }

        let predator_int = self.intelligence_of(predator);
        let prey_int = self.intelligence_of(prey);
        chance += cfg.intelligence_weight * (predator_int / prey_int - 1.0);

        if !chance.is_finite() {
            tracing::warn!(
                predator = predator.element_type(),
                prey = prey.element_type(),
                "Non-finite predation chance, using base"
            );
            chance = cfg.base_success;
        }
        chance.clamp(cfg.min_success, cfg.max_success)
    }

    /// Rolls once against the success chance. The organisms are not touched;
    /// the caller applies energy and removal.
    pub fn process_predator_prey_interaction<R: Rng + ?Sized>(
        &self,
        predator: &dyn Organism,
        prey: &dyn Organism,
        rng: &mut R,
    ) -> PredationOutcome {
        let chance = self.calculate_predation_success(predator, prey);
        let success = chance > 0.0 && rng.gen::<f64>() < chance;
        let energy_gained = if success {
            let prey_energy = prey
                .try_get_attribute(Attribute::Energy)
                .filter(|e| e.is_finite())
                .unwrap_or(0.0)
                .max(0.0);
            let prey_level = self
                .registry
                .trophic_level_of(prey.element_type())
                .unwrap_or(TrophicLevel::Producer);
            let predator_level = self
                .registry
                .trophic_level_of(predator.element_type())
                .unwrap_or(TrophicLevel::Primary);
            calculate_energy_transfer(
                prey_energy,
                prey_level,
                predator_level,
                self.config.energy_efficiency,
            )
        } else {
            0.0
        };
        PredationOutcome {
            success,
            energy_gained,
            predator: predator.id(),
            prey: prey.id(),
        }
    }

    fn intelligence_of(&self, organism: &dyn Organism) -> f64 {
        let value = organism
            .genome()
            .and_then(|g| g.expressed_value(TraitKind::Intelligence))
            .unwrap_or(self.config.default_intelligence);
        sanitize(value)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_ATTRIBUTE)
    } else {
        MIN_ATTRIBUTE
    }
}

/// Energy reaching `target` from `energy` held at `source`.
///
/// Flows only up the chain, except that decomposers always receive one
/// step's worth.
#[must_use]
pub fn calculate_energy_transfer(
    energy: f64,
    source: TrophicLevel,
    target: TrophicLevel,
    efficiency: f64,
) -> f64 {
    if !(energy > 0.0) || !energy.is_finite() {
        return 0.0;
    }
    let gap = match (source.rank(), target.rank()) {
        (_, None) => 1,
        (Some(s), Some(t)) if t > s => i32::from(t - s),
        _ => return 0.0,
    };
    let efficiency = if efficiency.is_finite() {
        efficiency.clamp(0.0, 1.0)
    } else {
        0.0
    };
    energy * efficiency.powi(gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use biota_data::{Genome, Specimen, TraitPair};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn registry() -> TrophicRegistry {
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

    fn animal(kind: &str, speed: f64) -> Specimen {
        Specimen::new(kind)
            .with_attribute(Attribute::Speed, speed)
            .with_attribute(Attribute::Size, 1.0)
            .with_attribute(Attribute::Health, 100.0)
            .with_attribute(Attribute::Energy, 50.0)
    }

    #[test]
    fn test_equal_organisms_get_base_chance() {
        let registry = registry();
        let config = EcologyConfig::default();
        let eval = PredationEvaluator::new(&registry, &config);
        let chance = eval.calculate_predation_success(&animal("wolf", 1.0), &animal("herbivore", 1.0));
        assert!((chance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unregistered_pair_is_zero() {
        let registry = registry();
        let config = EcologyConfig::default();
        let eval = PredationEvaluator::new(&registry, &config);
        assert_eq!(
            eval.calculate_predation_success(&animal("herbivore", 9.0), &animal("wolf", 0.1)),
            0.0
        );
    }

    #[test]
    fn test_chance_is_clamped() {
        let registry = registry();
        let config = EcologyConfig::default();
        let eval = PredationEvaluator::new(&registry, &config);
        let fast = eval.calculate_predation_success(&animal("wolf", 50.0), &animal("herbivore", 1.0));
        let big_prey = animal("herbivore", 5.0).with_attribute(Attribute::Size, 10.0);
        let slow = eval.calculate_predation_success(&animal("wolf", 0.01), &big_prey);
        let broken =
            eval.calculate_predation_success(&animal("wolf", -3.0), &animal("herbivore", f64::NAN));
        assert_eq!(fast, 0.9);
        assert_eq!(slow, 0.1);
        assert!((0.1..=0.9).contains(&broken));
    }

    #[test]
    fn test_missing_attributes_are_skipped() {
        let registry = registry();
        let config = EcologyConfig::default();
        let eval = PredationEvaluator::new(&registry, &config);
        let wolf = Specimen::new("wolf").with_attribute(Attribute::Speed, 2.0);
        let prey = Specimen::new("herbivore").with_attribute(Attribute::Size, 2.0);
        assert!((eval.calculate_predation_success(&wolf, &prey) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_intelligence_read_from_genome() {
        let registry = registry();
        let config = EcologyConfig::default();
        let eval = PredationEvaluator::new(&registry, &config);
        let smart = Genome::from_traits([(TraitKind::Intelligence, TraitPair::numeric(1.0, 1.0))]);
        let wolf = Specimen::new("wolf").with_genome(smart);
        let prey = Specimen::new("herbivore");
        // 0.5 + 0.1 * (1.0 / 0.5 - 1)
        assert!((eval.calculate_predation_success(&wolf, &prey) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_interaction_outcome_energy() {
        let registry = registry();
        let config = EcologyConfig::default();
        let eval = PredationEvaluator::new(&registry, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let wolf = animal("wolf", 1.0);
        let prey = animal("herbivore", 1.0);
        let mut successes = 0;
        for _ in 0..200 {
            let outcome = eval.process_predator_prey_interaction(&wolf, &prey, &mut rng);
            assert_eq!(outcome.predator, wolf.id);
            if outcome.success {
                successes += 1;
                assert!((outcome.energy_gained - 5.0).abs() < 1e-9);
            } else {
                assert_eq!(outcome.energy_gained, 0.0);
            }
        }
        assert!(successes > 50 && successes < 150);
    }

    #[test]
    fn test_energy_transfer_rules() {
        use TrophicLevel::*;
        assert_eq!(calculate_energy_transfer(100.0, Primary, Primary, 0.1), 0.0);
        assert_eq!(calculate_energy_transfer(100.0, Secondary, Primary, 0.1), 0.0);
        assert!((calculate_energy_transfer(100.0, Producer, Primary, 0.1) - 10.0).abs() < 1e-9);
        assert!((calculate_energy_transfer(100.0, Producer, Secondary, 0.1) - 1.0).abs() < 1e-9);
        assert!((calculate_energy_transfer(100.0, Tertiary, Decomposer, 0.1) - 10.0).abs() < 1e-9);
        assert!((calculate_energy_transfer(100.0, Decomposer, Decomposer, 0.1) - 10.0).abs() < 1e-9);
        assert_eq!(calculate_energy_transfer(100.0, Decomposer, Tertiary, 0.1), 0.0);
        assert_eq!(calculate_energy_transfer(-5.0, Producer, Primary, 0.1), 0.0);
        assert_eq!(calculate_energy_transfer(f64::NAN, Producer, Primary, 0.1), 0.0);
    }
}

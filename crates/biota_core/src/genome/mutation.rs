use super::{order_alleles, unit_interval, GeneticContext, MIN_ALLELE_VALUE};
use crate::config::{GeneticsConfig, MutationWeights};
use biota_data::{
    AlleleSlot, AlleleValue, ChangeKind, Genome, MutationEvent, MutationKind, Notification,
    SpecialAbility, TraitKind, TraitPair,
};
use rand::Rng;
use std::ops::Range;

/// Activation range for a dominant special allele.
const DOMINANT_ACTIVATION: Range<f64> = 0.3..1.0;
/// Activation range for a recessive special allele.
const RECESSIVE_ACTIVATION: Range<f64> = 0.1..0.5;

pub fn mutate_genome<R: Rng>(
    genome: &mut Genome,
    ctx: &mut GeneticContext<'_, R>,
) -> Vec<MutationEvent> {
    let config = ctx.config;
    let rate = unit_interval(genome.base_mutation_rate);
    let intensity = unit_interval(genome.mutation_intensity);
    let generation = genome.generation;
    let mut applied = Vec::new();

    for (&kind, pair) in genome.traits.iter_mut() {
        for slot in [AlleleSlot::Dominant, AlleleSlot::Recessive] {
            if ctx.rng.gen::<f64>() >= rate {
                continue;
            }
            let drawn = draw_kind(&config.mutation_weights, ctx.rng);
            let old_value = pair.allele(slot);
            let (effective, new_value) = match pair {
                TraitPair::Numeric {
                    dominant,
                    recessive,
                } => {
                    let allele = match slot {
                        AlleleSlot::Dominant => dominant,
                        AlleleSlot::Recessive => recessive,
                    };
                    let (effective, value) =
                        mutate_numeric(kind, slot, *allele, drawn, intensity, config, ctx.rng);
                    *allele = value;
                    (effective, AlleleValue::Numeric(value))
                }
                TraitPair::Categorical {
                    dominant,
                    recessive,
                } => {
                    let allele = match slot {
                        AlleleSlot::Dominant => dominant,
                        AlleleSlot::Recessive => recessive,
                    };
                    let (effective, value) = mutate_ability(*allele, drawn, ctx.rng);
                    if value == *allele {
                        continue;
                    }
                    *allele = value;
                    (effective, AlleleValue::Categorical(value))
                }
            };

            let event = MutationEvent {
                trait_kind: kind,
                allele: slot,
                old_value,
                new_value,
                magnitude: magnitude(old_value, new_value),
                kind: ChangeKind::Mutation(effective),
                generation,
            };
            ctx.sink.emit(Notification::Mutation(event.clone()));
            applied.push(event);
        }
        order_alleles(pair);
    }

    genome.mutation_history.extend(applied.iter().cloned());
    applied
}

/// Weighted draw over the four mutation kinds.
pub fn draw_kind<R: Rng + ?Sized>(weights: &MutationWeights, rng: &mut R) -> MutationKind {
    let table = [
        (MutationKind::Point, weights.point),
        (MutationKind::Jump, weights.jump),
        (MutationKind::Activation, weights.activation),
        (MutationKind::Deactivation, weights.deactivation),
    ];
    let total: f64 = table.iter().map(|(_, w)| w.max(0.0)).sum();
    if !(total > 0.0 && total.is_finite()) {
        return MutationKind::Point;
    }
    let mut roll = rng.gen::<f64>() * total;
    for (kind, weight) in table {
        let weight = weight.max(0.0);
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    MutationKind::Point
}

/// Applies one numeric mutation. Activation and deactivation only take hold
/// on special traits in the matching state; everywhere else they behave as a
/// point mutation, which is what gets recorded.
fn mutate_numeric<R: Rng + ?Sized>(
    kind: TraitKind,
    slot: AlleleSlot,
    current: f64,
    drawn: MutationKind,
    intensity: f64,
    config: &GeneticsConfig,
    rng: &mut R,
) -> (MutationKind, f64) {
    let effective = match drawn {
        MutationKind::Activation if kind.is_special() && current == 0.0 => {
            MutationKind::Activation
        }
        MutationKind::Deactivation if kind.is_special() && current > 0.0 => {
            MutationKind::Deactivation
        }
        MutationKind::Jump => MutationKind::Jump,
        _ => MutationKind::Point,
    };

    let value = match effective {
        MutationKind::Point => {
            let delta = rng.gen_range(-1.0..1.0) * intensity;
            floor_allele(kind, current + delta)
        }
        MutationKind::Jump => {
            let delta = rng.gen_range(-1.0..1.0) * intensity * config.jump_multiplier.max(0.0);
            floor_allele(kind, current + delta)
        }
        MutationKind::Activation => match slot {
            AlleleSlot::Dominant => rng.gen_range(DOMINANT_ACTIVATION),
            AlleleSlot::Recessive => rng.gen_range(RECESSIVE_ACTIVATION),
        },
        MutationKind::Deactivation => 0.0,
    };
    (effective, value)
}

/// Special traits are either inactive (0.0) or at least the allele floor;
/// every other trait is clamped up to the floor.
pub(crate) fn floor_allele(kind: TraitKind, value: f64) -> f64 {
    if kind.is_special() {
        if value >= MIN_ALLELE_VALUE {
            value
        } else {
            0.0
        }
    } else {
        value.max(MIN_ALLELE_VALUE)
    }
}

fn mutate_ability<R: Rng + ?Sized>(
    current: Option<SpecialAbility>,
    drawn: MutationKind,
    rng: &mut R,
) -> (MutationKind, Option<SpecialAbility>) {
    match (drawn, current) {
        (MutationKind::Activation, None) => (MutationKind::Activation, Some(random_ability(rng))),
        (MutationKind::Deactivation, Some(_)) => (MutationKind::Deactivation, None),
        (_, Some(_)) => (MutationKind::Point, Some(random_ability(rng))),
        (_, None) => (MutationKind::Point, None),
    }
}

pub(crate) fn random_ability<R: Rng + ?Sized>(rng: &mut R) -> SpecialAbility {
    SpecialAbility::ALL[rng.gen_range(0..SpecialAbility::ALL.len())]
}

fn magnitude(old: AlleleValue, new: AlleleValue) -> f64 {
    match (old, new) {
        (AlleleValue::Numeric(a), AlleleValue::Numeric(b)) => (b - a).abs(),
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GenomeLogic;
    use crate::notify::NullSink;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn always_mutating(traits: Vec<(TraitKind, TraitPair)>) -> Genome {
        let mut genome = Genome::from_traits(traits);
        genome.base_mutation_rate = 1.0;
        genome.mutation_intensity = 1.0;
        genome
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut sink = NullSink;
        let config = GeneticsConfig::default();
        let mut ctx = GeneticContext::new(&config, &mut rng, &mut sink);
        let mut genome = Genome::default();
        genome.base_mutation_rate = 0.0;

        assert!(genome.mutate(&mut ctx).is_empty());
        assert!(genome.mutation_history.is_empty());
    }

    #[test]
    fn test_full_rate_respects_floor_and_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut sink = NullSink;
        let config = GeneticsConfig::default();
        let mut ctx = GeneticContext::new(&config, &mut rng, &mut sink);
        let mut genome = always_mutating(vec![
            (TraitKind::Speed, TraitPair::numeric(0.15, 0.1)),
            (TraitKind::Camouflage, TraitPair::numeric(0.0, 0.0)),
        ]);

        for _ in 0..200 {
            let events = genome.mutate(&mut ctx);
            assert_eq!(events.len(), 4);
            let (d, r) = genome.numeric_alleles(TraitKind::Speed).expect("speed");
            assert!(d >= r && r >= MIN_ALLELE_VALUE);
            let (d, r) = genome
                .numeric_alleles(TraitKind::Camouflage)
                .expect("camouflage");
            assert!(d >= r);
            assert!(r == 0.0 || r >= MIN_ALLELE_VALUE);
        }
        assert_eq!(genome.mutation_history.len(), 800);
    }

    #[test]
    fn test_activation_falls_back_to_point_on_ordinary_traits() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let config = GeneticsConfig::default();
        let (kind, value) = mutate_numeric(
            TraitKind::Speed,
            AlleleSlot::Dominant,
            1.0,
            MutationKind::Activation,
            0.1,
            &config,
            &mut rng,
        );
        assert_eq!(kind, MutationKind::Point);
        assert!((value - 1.0).abs() <= 0.1);
    }

    #[test]
    fn test_activation_and_deactivation_on_special_traits() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let config = GeneticsConfig::default();
        let (kind, value) = mutate_numeric(
            TraitKind::NightVision,
            AlleleSlot::Recessive,
            0.0,
            MutationKind::Activation,
            0.1,
            &config,
            &mut rng,
        );
        assert_eq!(kind, MutationKind::Activation);
        assert!(RECESSIVE_ACTIVATION.contains(&value));

        let (kind, value) = mutate_numeric(
            TraitKind::Regeneration,
            AlleleSlot::Dominant,
            0.6,
            MutationKind::Deactivation,
            0.1,
            &config,
            &mut rng,
        );
        assert_eq!(kind, MutationKind::Deactivation);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_draw_kind_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let weights = MutationWeights::default();
        let mut counts = [0usize; 4];
        for _ in 0..20_000 {
            let idx = match draw_kind(&weights, &mut rng) {
                MutationKind::Point => 0,
                MutationKind::Jump => 1,
                MutationKind::Activation => 2,
                MutationKind::Deactivation => 3,
            };
            counts[idx] += 1;
        }
        let share = |n: usize| n as f64 / 20_000.0;
        assert!((share(counts[0]) - 0.85).abs() < 0.02);
        assert!((share(counts[1]) - 0.10).abs() < 0.02);
        assert!(counts[2] > 0 && counts[3] > 0);
    }

    #[test]
    fn test_categorical_mutations_only_record_changes() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut sink: Vec<Notification> = Vec::new();
        let config = GeneticsConfig {
            mutation_weights: MutationWeights {
                point: 0.0,
                jump: 0.0,
                activation: 1.0,
                deactivation: 0.0,
            },
            ..Default::default()
        };
        let mut ctx = GeneticContext::new(&config, &mut rng, &mut sink);
        let mut genome = always_mutating(vec![(
            TraitKind::SpecialAbility,
            TraitPair::categorical(None, None),
        )]);

        let first = genome.mutate(&mut ctx);
        assert_eq!(first.len(), 2);
        assert!(matches!(
            genome.trait_pair(TraitKind::SpecialAbility),
            Some(TraitPair::Categorical {
                dominant: Some(_),
                recessive: Some(_)
            })
        ));
        // Activation on an active ability degrades to a drift that may pick
        // the same ability again, so at most two further events.
        assert!(genome.mutate(&mut ctx).len() <= 2);
        drop(ctx);
        assert_eq!(
            sink.iter()
                .filter(|n| matches!(n, Notification::Mutation(_)))
                .count(),
            genome.mutation_history.len()
        );
    }
}

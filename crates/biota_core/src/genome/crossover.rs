use super::mutation::{floor_allele, mutate_genome};
use super::{unit_interval, GeneticContext};
use biota_data::{
    AlleleSlot, AlleleValue, ChangeKind, Genome, MutationEvent, Notification, TraitPair,
    TraitSnapshot,
};
use rand::Rng;

pub fn combine_genomes<R: Rng>(
    first: &Genome,
    second: &Genome,
    ctx: &mut GeneticContext<'_, R>,
) -> Genome {
    let config = ctx.config;
    let generation = first.generation.max(second.generation).saturating_add(1);
    let mut history = first.mutation_history.clone();
    let mut crossovers = Vec::new();
    let mut traits = TraitSnapshot::new();

    for (&kind, pair_a) in &first.traits {
        let Some(pair_b) = second.traits.get(&kind) else {
            continue;
        };
        // One coin per parent: dominant-or-recessive from `first` seeds the
        // child's dominant allele, the draw from `second` its recessive one.
        let from_first_dominant = ctx.rng.gen_bool(0.5);
        let from_second_dominant = ctx.rng.gen_bool(0.5);

        let child_pair = match (pair_a, pair_b) {
            (
                TraitPair::Numeric {
                    dominant: da,
                    recessive: ra,
                },
                TraitPair::Numeric {
                    dominant: db,
                    recessive: rb,
                },
            ) => {
                let mut dominant = if from_first_dominant { *da } else { *ra };
                let mut recessive = if from_second_dominant { *db } else { *rb };

                if ctx.rng.gen::<f64>() < unit_interval(config.crossover_chance) {
                    let max_fraction = unit_interval(config.crossover_max_fraction);
                    let fraction = if max_fraction > 0.0 {
                        ctx.rng.gen_range(0.0..max_fraction)
                    } else {
                        0.0
                    };
                    let blended_dominant =
                        floor_allele(kind, dominant * (1.0 - fraction) + recessive * fraction);
                    let blended_recessive =
                        floor_allele(kind, recessive * (1.0 - fraction) + dominant * fraction);
                    for (allele, old, new) in [
                        (AlleleSlot::Dominant, dominant, blended_dominant),
                        (AlleleSlot::Recessive, recessive, blended_recessive),
                    ] {
                        crossovers.push(MutationEvent {
                            trait_kind: kind,
                            allele,
                            old_value: AlleleValue::Numeric(old),
                            new_value: AlleleValue::Numeric(new),
                            magnitude: fraction,
                            kind: ChangeKind::Crossover,
                            generation,
                        });
                    }
                    dominant = blended_dominant;
                    recessive = blended_recessive;
                }
                TraitPair::numeric(dominant, recessive)
            }
            (
                TraitPair::Categorical {
                    dominant: da,
                    recessive: ra,
                },
                TraitPair::Categorical {
                    dominant: db,
                    recessive: rb,
                },
            ) => TraitPair::categorical(
                if from_first_dominant { *da } else { *ra },
                if from_second_dominant { *db } else { *rb },
            ),
            _ => {
                tracing::trace!(trait_kind = %kind, "Skipping trait with mismatched representation");
                continue;
            }
        };
        traits.insert(kind, child_pair);
    }

    for event in &crossovers {
        ctx.sink.emit(Notification::Mutation(event.clone()));
    }
    history.extend(crossovers);

    let mut child = Genome {
        traits,
        base_mutation_rate: (first.base_mutation_rate + second.base_mutation_rate) / 2.0,
        mutation_intensity: (first.mutation_intensity + second.mutation_intensity) / 2.0,
        expression_strength: (first.expression_strength + second.expression_strength) / 2.0,
        generation,
        mutation_history: history,
    };
    mutate_genome(&mut child, ctx);

    ctx.sink.emit(Notification::Reproduction {
        parent_a: first.snapshot(),
        parent_b: second.snapshot(),
        child: child.snapshot(),
        child_generation: child.generation,
    });
    child
}

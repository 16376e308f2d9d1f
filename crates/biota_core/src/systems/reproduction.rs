use crate::genome::{unit_interval, GeneticContext, GenomeLogic};
use biota_data::{Attribute, Genome, Organism, TraitKind, LIFESPAN_TICKS};
use rand::Rng;

/// Reproduction rate assumed when a genome lacks the trait.
const DEFAULT_REPRODUCTION_RATE: f64 = 0.5;
/// Share of the lifespan spent immature.
const MATURITY_FRACTION: f64 = 0.15;
/// Share of the lifespan after which fertility declines.
const DECLINE_FRACTION: f64 = 0.85;

/// Chance in [0, 1] that `organism` succeeds at one reproduction attempt.
#[must_use]
pub fn reproduction_chance(genome: &Genome, organism: &dyn Organism) -> f64 {
    let base = genome
        .expressed_value(TraitKind::ReproductionRate)
        .map_or(DEFAULT_REPRODUCTION_RATE, unit_interval);

    let health = organism
        .try_get_attribute(Attribute::Health)
        .map_or(1.0, |h| unit_interval(h / 100.0));

    let age = match organism.try_get_attribute(Attribute::Age) {
        Some(age) => {
            let lifespan = genome
                .expressed_value(TraitKind::Lifespan)
                .unwrap_or(1.0)
                * LIFESPAN_TICKS;
            age_factor(age, lifespan)
        }
        None => 1.0,
    };

    unit_interval(base * health * age)
}

fn age_factor(age: f64, lifespan: f64) -> f64 {
    if !(lifespan > 0.0) || !age.is_finite() {
        return 0.0;
    }
    let fraction = age / lifespan;
    if fraction < MATURITY_FRACTION {
        0.0
    } else if fraction <= DECLINE_FRACTION {
        1.0
    } else {
        unit_interval((1.0 - fraction) / (1.0 - DECLINE_FRACTION))
    }
}

/// Tries to mate `a` with `b`. Returns the child genome on success.
pub fn attempt_reproduction<R: Rng>(
    a: &dyn Organism,
    b: &dyn Organism,
    ctx: &mut GeneticContext<'_, R>,
) -> Option<Genome> {
    if a.element_type() != b.element_type() || a.id() == b.id() {
        return None;
    }
    let (ga, gb) = (a.genome()?, b.genome()?);
    let compatibility = ga.calculate_compatibility(gb);
    if compatibility < ctx.config.min_reproduction_compatibility {
        tracing::trace!(
            element_type = a.element_type(),
            compatibility,
            "Mates incompatible"
        );
        return None;
    }
    let chance = reproduction_chance(ga, a).min(reproduction_chance(gb, b)) * compatibility;
    if ctx.rng.gen::<f64>() < chance {
        Some(ga.combine(gb, ctx))
    } else {
        None
    }
}

use super::{DOMINANT_EXPRESSION_WEIGHT, NEUTRAL_COMPATIBILITY};
use biota_data::{Genome, Phenotype, TraitKind, TraitMap, TraitPair};

pub fn express_traits(genome: &Genome) -> TraitMap {
    let strength = effective_strength(genome.expression_strength);
    genome
        .traits
        .iter()
        .filter_map(|(&kind, pair)| express_pair(pair, strength).map(|p| (kind, p)))
        .collect()
}

/// Phenotype of a single trait without building the whole map.
pub fn express_trait(genome: &Genome, kind: TraitKind) -> Option<Phenotype> {
    let strength = effective_strength(genome.expression_strength);
    genome
        .trait_pair(kind)
        .and_then(|pair| express_pair(pair, strength))
}

fn express_pair(pair: &TraitPair, strength: f64) -> Option<Phenotype> {
    match *pair {
        TraitPair::Numeric {
            dominant,
            recessive,
        } => {
            let blended = dominant * DOMINANT_EXPRESSION_WEIGHT
                + recessive * (1.0 - DOMINANT_EXPRESSION_WEIGHT);
            Some(Phenotype::Value(blended * strength))
        }
        TraitPair::Categorical { dominant, .. } => dominant.map(Phenotype::Ability),
    }
}

fn effective_strength(strength: f64) -> f64 {
    if strength.is_finite() {
        strength.max(0.0)
    } else {
        1.0
    }
}

pub fn compatibility(a: &Genome, b: &Genome) -> f64 {
    let mut total = 0.0;
    let mut shared = 0usize;
    for (kind, pair_a) in &a.traits {
        let (Some((da, ra)), Some((db, rb))) = (
            pair_a.as_numeric(),
            b.traits.get(kind).and_then(TraitPair::as_numeric),
        ) else {
            continue;
        };
        let dominant_term = (1.0 - (da - db).abs()).max(0.0);
        let recessive_term = (1.0 - (ra - rb).abs()).max(0.0);
        total += (dominant_term + recessive_term) / 2.0;
        shared += 1;
    }

    if shared == 0 {
        return NEUTRAL_COMPATIBILITY;
    }
    let score = total / shared as f64;
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biota_data::SpecialAbility;

    #[test]
    fn test_numeric_expression_weights_dominant() {
        let mut genome = Genome::from_traits([(TraitKind::Speed, TraitPair::numeric(2.0, 1.0))]);
        genome.expression_strength = 2.0;
        let map = express_traits(&genome);
        let speed = map[&TraitKind::Speed].value().expect("numeric");
        assert!((speed - 3.4).abs() < 1e-12);
    }

    #[test]
    fn test_inactive_ability_is_absent() {
        let genome = Genome::from_traits([
            (
                TraitKind::SpecialAbility,
                TraitPair::categorical(None, Some(SpecialAbility::Flight)),
            ),
            (TraitKind::Size, TraitPair::numeric(1.0, 1.0)),
        ]);
        let map = express_traits(&genome);
        assert!(!map.contains_key(&TraitKind::SpecialAbility));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_active_ability_is_expressed() {
        let genome = Genome::from_traits([(
            TraitKind::SpecialAbility,
            TraitPair::categorical(Some(SpecialAbility::Venom), None),
        )]);
        assert_eq!(
            express_trait(&genome, TraitKind::SpecialAbility),
            Some(Phenotype::Ability(SpecialAbility::Venom))
        );
    }

    #[test]
    fn test_nan_strength_falls_back_to_unit() {
        let mut genome = Genome::from_traits([(TraitKind::Size, TraitPair::numeric(1.0, 1.0))]);
        genome.expression_strength = f64::NAN;
        assert_eq!(
            express_trait(&genome, TraitKind::Size),
            Some(Phenotype::Value(1.0))
        );
    }

    #[test]
    fn test_identical_genomes_are_fully_compatible() {
        let genome = Genome::default();
        assert!((compatibility(&genome, &genome) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compatibility_terms_floor_at_zero() {
        let a = Genome::from_traits([(TraitKind::Speed, TraitPair::numeric(5.0, 0.5))]);
        let b = Genome::from_traits([(TraitKind::Speed, TraitPair::numeric(1.0, 0.5))]);
        assert!((compatibility(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_shared_numeric_trait_is_neutral() {
        let a = Genome::from_traits([(TraitKind::Speed, TraitPair::numeric(1.0, 1.0))]);
        let b = Genome::from_traits([(
            TraitKind::SpecialAbility,
            TraitPair::categorical(None, None),
        )]);
        assert_eq!(compatibility(&a, &b), NEUTRAL_COMPATIBILITY);
    }
}

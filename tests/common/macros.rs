/// Asserts that a value lies in the closed interval `[lo, hi]`.
#[macro_export]
macro_rules! assert_in_range {
    ($value:expr, $lo:expr, $hi:expr) => {
        let value = $value;
        assert!(
            value >= $lo && value <= $hi,
            "{} = {} is outside [{}, {}]",
            stringify!($value),
            value,
            $lo,
            $hi
        );
    };
}

/// Asserts that the world's ledger agrees with the organisms it holds.
#[macro_export]
macro_rules! assert_ledger_matches {
    ($world:expr) => {
        let counts = $world.food_web.get_population_counts();
        for (element_type, count) in &counts {
            assert_eq!(
                $world.organisms_of(element_type).count() as u64,
                *count,
                "Ledger mismatch for {}",
                element_type
            );
        }
        assert_eq!(
            counts.values().sum::<u64>() as usize,
            $world.population(),
            "Ledger total mismatch"
        );
    };
}

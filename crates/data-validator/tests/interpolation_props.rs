//! Property tests for gap interpolation

use data_validator::interpolate_linear;
use proptest::prelude::*;

fn column() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of(-50.0f64..50.0), 0..64)
}

proptest! {
    #[test]
    fn prop_known_values_untouched(original in column()) {
        let mut values = original.clone();
        interpolate_linear(&mut values);
        for (before, after) in original.iter().zip(values.iter()) {
            if before.is_some() {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn prop_only_leading_gap_remains(original in column()) {
        let mut values = original.clone();
        interpolate_linear(&mut values);
        let first_known = original.iter().position(Option::is_some).unwrap_or(original.len());
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(v.is_none(), i < first_known);
        }
    }

    #[test]
    fn prop_filled_values_bounded_by_neighbours(original in column()) {
        let mut values = original.clone();
        interpolate_linear(&mut values);
        let known: Vec<f64> = original.iter().flatten().copied().collect();
        if let (Some(lo), Some(hi)) = (
            known.iter().copied().reduce(f64::min),
            known.iter().copied().reduce(f64::max),
        ) {
            for v in values.iter().flatten() {
                prop_assert!(*v >= lo - 1e-9 && *v <= hi + 1e-9);
            }
        }
    }
}

use proptest::prelude::*;
use tracheck::TransitionRelation;
use tracheck::compare::{ComparisonOutcome, compare};

fn build(records: &[(usize, usize, f64)]) -> TransitionRelation {
    let mut relation = TransitionRelation::new();
    for (line, &(source, destination, rate)) in records.iter().enumerate() {
        relation.push(source, destination, rate, line + 1);
    }
    relation
}

fn records() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    // Rates drawn from multiples of 1/8 so they are exactly representable;
    // the comparator uses exact equality on parsed values.
    proptest::collection::vec(
        (
            0usize..24,
            0usize..24,
            (1u32..64).prop_map(|n| f64::from(n) / 8.0),
        ),
        0..48,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn comparison_is_reflexive(records in records()) {
        let relation = build(&records);
        prop_assert_eq!(compare(&relation, &relation), ComparisonOutcome::Equal);
    }

    #[test]
    fn comparison_is_symmetric(first in records(), second in records()) {
        let a = build(&first);
        let b = build(&second);
        match (compare(&a, &b), compare(&b, &a)) {
            (ComparisonOutcome::Equal, ComparisonOutcome::Equal) => {}
            (
                ComparisonOutcome::Different { only_in_first: forward_first, only_in_second: forward_second },
                ComparisonOutcome::Different { only_in_first: backward_first, only_in_second: backward_second },
            ) => {
                prop_assert_eq!(forward_first, backward_second);
                prop_assert_eq!(forward_second, backward_first);
            }
            (forward, backward) => {
                prop_assert!(false, "asymmetric outcomes: {:?} vs {:?}", forward, backward);
            }
        }
    }

    #[test]
    fn state_count_is_highest_observed_index_plus_one(records in records()) {
        let relation = build(&records);
        let expected = records
            .iter()
            .map(|&(source, destination, _)| source.max(destination) + 1)
            .max()
            .unwrap_or(0);
        prop_assert_eq!(relation.state_count(), expected);
    }
}

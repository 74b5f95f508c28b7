//! Property tests for the distance and edit script invariants.

use libeditdist::{
    Cost, Matrix, distance,
    operations::{Deletion, Insertion, Match, Operation, Substitution},
    presets::Preset,
    sequence::Runes,
};
use proptest::prelude::*;

/// A small alphabet so that random strings share plenty of elements.
const SEQUENCE: &str = "[abcd]{0,10}";

fn any_preset() -> impl Strategy<Value = Preset> {
    prop_oneof![
        Just(Preset::Levenshtein),
        Just(Preset::DamerauLevenshtein),
        Just(Preset::Lcs),
    ]
}

fn symmetric_preset() -> impl Strategy<Value = Preset> {
    prop_oneof![Just(Preset::Levenshtein), Just(Preset::DamerauLevenshtein)]
}

fn dist(source: &str, target: &str, preset: Preset) -> Cost {
    distance(&Runes::new(source, target), preset.operations()).unwrap()
}

proptest! {
    #[test]
    fn identity(s in SEQUENCE, preset in any_preset()) {
        prop_assert_eq!(dist(&s, &s, preset), 0);
    }

    #[test]
    fn symmetry(a in SEQUENCE, b in SEQUENCE, preset in symmetric_preset()) {
        prop_assert_eq!(dist(&a, &b, preset), dist(&b, &a, preset));
    }

    #[test]
    fn appending_changes_distance_by_at_most_one(
        a in SEQUENCE,
        b in SEQUENCE,
        c in "[abcd]",
        preset in any_preset(),
    ) {
        let base = dist(&a, &b, preset);
        let longer_source = dist(&format!("{a}{c}"), &b, preset);
        let longer_target = dist(&a, &format!("{b}{c}"), preset);
        prop_assert!(base.abs_diff(longer_source) <= 1);
        prop_assert!(base.abs_diff(longer_target) <= 1);
    }

    #[test]
    fn script_replays_to_target(a in SEQUENCE, b in SEQUENCE, preset in any_preset()) {
        let pair = Runes::new(&a, &b);
        let ops = preset.operations();
        let matrix = Matrix::build(&pair, ops).unwrap();
        let script = matrix.edit_script(&pair, ops).unwrap();

        prop_assert_eq!(script.cost(), matrix.distance());
        prop_assert_eq!(script.replay(&pair.source, &pair.target), pair.target.clone());
    }

    #[test]
    fn empty_boundaries(s in SEQUENCE, insertion in 1..5u32, deletion in 1..5u32) {
        let ops: Vec<Operation> = vec![
            Match::default().into(),
            Insertion { cost: insertion }.into(),
            Deletion { cost: deletion }.into(),
            Substitution { cost: 1 }.into(),
        ];
        let len = s.chars().count() as Cost;
        prop_assert_eq!(distance(&Runes::new("", &s), &ops).unwrap(), len * insertion);
        prop_assert_eq!(distance(&Runes::new(&s, ""), &ops).unwrap(), len * deletion);
    }
}

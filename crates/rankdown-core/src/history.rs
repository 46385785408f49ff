//! Elimination history ordering.

use std::cmp::Reverse;

use crate::models::EliminationRecord;

/// Order elimination records for display: most recent round first.
///
/// Records with an unknown round compare as round 0 and therefore sink to
/// the bottom; the stored `round` is left untouched. The sort is stable, so
/// records from the same round keep their relative input order. Nothing is
/// deduplicated.
pub fn aggregate(records: &[EliminationRecord]) -> Vec<EliminationRecord> {
    let mut ordered = records.to_vec();
    ordered.sort_by_key(|record| Reverse(record.sort_round()));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EliminationMethod;
    use proptest::prelude::*;

    fn voted(name: &str, round: i64) -> EliminationRecord {
        EliminationRecord::new(name, round, EliminationMethod::Voted)
    }

    fn names(records: &[EliminationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn newest_round_first_ties_keep_order() {
        let records = vec![voted("X", 1), voted("Y", 3), voted("Z", 3)];
        assert_eq!(names(&aggregate(&records)), vec!["Y", "Z", "X"]);
    }

    #[test]
    fn unknown_round_sorts_last() {
        let records = vec![
            EliminationRecord::unknown_round("X", EliminationMethod::Voted),
            voted("Y", 2),
        ];
        let ordered = aggregate(&records);
        assert_eq!(names(&ordered), vec!["Y", "X"]);
        assert_eq!(ordered[1].round, None);
    }

    #[test]
    fn unknown_rounds_keep_input_order() {
        let records = vec![
            EliminationRecord::unknown_round("P", EliminationMethod::Leftover),
            voted("Q", 1),
            EliminationRecord::unknown_round("R", EliminationMethod::Voted),
        ];
        assert_eq!(names(&aggregate(&records)), vec!["Q", "P", "R"]);
    }

    #[test]
    fn repeated_names_are_kept() {
        let records = vec![voted("X", 1), voted("X", 2)];
        assert_eq!(aggregate(&records).len(), 2);
    }

    #[test]
    fn empty_history() {
        assert!(aggregate(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn equal_rounds_keep_relative_order(
            rounds in prop::collection::vec(prop::option::of(1i64..4), 0..20)
        ) {
            let records: Vec<_> = rounds
                .iter()
                .enumerate()
                .map(|(i, round)| EliminationRecord {
                    name: i.to_string(),
                    round: *round,
                    method: EliminationMethod::Voted,
                })
                .collect();

            let ordered = aggregate(&records);
            prop_assert_eq!(ordered.len(), records.len());

            for pair in ordered.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.sort_round() >= b.sort_round());
                if a.sort_round() == b.sort_round() {
                    let ia: usize = a.name.parse().unwrap();
                    let ib: usize = b.name.parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }
    }
}

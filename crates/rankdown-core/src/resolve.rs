//! Round status resolution.
//!
//! Turns the raw per-voter records of a [`Round`] into exactly one status per
//! nominee. A nominee can collect several signals at once (saved by one
//! voter, eliminated by another, swept up by the leftover rule), so the
//! status is picked by a fixed precedence:
//!
//! ```text
//! Leftover > Eliminated > Saved > Pending
//! ```
//!
//! Resolution is total: it never fails and never deduplicates. Data-quality
//! problems are reported separately by [`validate`](crate::validate).

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::Round;

/// Resolved status of a nominee in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NomineeStatus {
    /// At least one voter saved the nominee and nothing stronger applies
    Saved,
    /// At least one voter voted to eliminate the nominee
    Eliminated,
    /// Eliminated by the leftover rule; overrides any vote
    Leftover,
    /// No signal yet
    Pending,
}

impl NomineeStatus {
    /// Every status, strongest first.
    pub const ALL: [NomineeStatus; 4] = [
        NomineeStatus::Leftover,
        NomineeStatus::Eliminated,
        NomineeStatus::Saved,
        NomineeStatus::Pending,
    ];

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            NomineeStatus::Saved => "saved",
            NomineeStatus::Eliminated => "eliminated",
            NomineeStatus::Leftover => "leftover",
            NomineeStatus::Pending => "pending",
        }
    }
}

/// One nominee paired with its resolved status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNominee {
    pub name: String,
    pub status: NomineeStatus,
}

/// Membership sets built once per round.
struct Signals<'a> {
    saved: HashSet<&'a str>,
    eliminated: HashSet<&'a str>,
    leftover: &'a BTreeSet<String>,
}

impl<'a> Signals<'a> {
    fn of(round: &'a Round) -> Self {
        Self {
            saved: round.saves.values().map(String::as_str).collect(),
            eliminated: round.elims.values().map(String::as_str).collect(),
            leftover: &round.leftovers_eliminated,
        }
    }

    fn classify(&self, nominee: &str) -> NomineeStatus {
        if self.leftover.contains(nominee) {
            NomineeStatus::Leftover
        } else if self.eliminated.contains(nominee) {
            NomineeStatus::Eliminated
        } else if self.saved.contains(nominee) {
            NomineeStatus::Saved
        } else {
            NomineeStatus::Pending
        }
    }
}

/// Resolve every nominee of `round`, in `round.nominees` order.
///
/// Duplicate nominees produce one entry per occurrence.
pub fn resolve(round: &Round) -> Vec<ResolvedNominee> {
    let signals = Signals::of(round);
    round
        .nominees
        .iter()
        .map(|name| ResolvedNominee {
            name: name.clone(),
            status: signals.classify(name),
        })
        .collect()
}

/// Headline numbers for a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTally {
    /// Entries in `nominees`, duplicates included
    pub nominees: usize,
    /// Voters who cast a save
    pub saves_in: usize,
    /// Voters who cast an elimination
    pub elims_in: usize,
    /// Names in `leftoversEliminated`
    pub leftovers_eliminated: usize,
    pub saved: usize,
    pub eliminated: usize,
    pub leftover: usize,
    pub pending: usize,
}

impl RoundTally {
    /// Count a round's votes and its resolved statuses.
    pub fn of(round: &Round) -> Self {
        Self::from_resolution(round, &resolve(round))
    }

    /// Count using an already computed resolution of `round`.
    pub fn from_resolution(round: &Round, resolved: &[ResolvedNominee]) -> Self {
        let mut tally = Self {
            nominees: round.nominees.len(),
            saves_in: round.saves.len(),
            elims_in: round.elims.len(),
            leftovers_eliminated: round.leftovers_eliminated.len(),
            ..Self::default()
        };
        for entry in resolved {
            match entry.status {
                NomineeStatus::Saved => tally.saved += 1,
                NomineeStatus::Eliminated => tally.eliminated += 1,
                NomineeStatus::Leftover => tally.leftover += 1,
                NomineeStatus::Pending => tally.pending += 1,
            }
        }
        tally
    }

    /// Whether every nominee has a final status.
    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(resolved: &[ResolvedNominee]) -> Vec<(&str, NomineeStatus)> {
        resolved.iter().map(|r| (r.name.as_str(), r.status)).collect()
    }

    #[test]
    fn saves_elims_and_pending() {
        let round = Round::new(1, ["A", "B", "C"])
            .with_save("v1", "A")
            .with_elim("v2", "B");

        assert_eq!(
            pairs(&resolve(&round)),
            vec![
                ("A", NomineeStatus::Saved),
                ("B", NomineeStatus::Eliminated),
                ("C", NomineeStatus::Pending),
            ]
        );
    }

    #[test]
    fn leftover_beats_elim() {
        let round = Round::new(1, ["A"]).with_elim("v1", "A").with_leftover("A");
        assert_eq!(pairs(&resolve(&round)), vec![("A", NomineeStatus::Leftover)]);
    }

    #[test]
    fn elim_beats_save() {
        let round = Round::new(1, ["A"]).with_save("v1", "A").with_elim("v2", "A");
        assert_eq!(pairs(&resolve(&round)), vec![("A", NomineeStatus::Eliminated)]);
    }

    #[test]
    fn empty_nominees_resolve_to_nothing() {
        let round = Round::new(1, Vec::<String>::new()).with_save("v1", "A");
        assert!(resolve(&round).is_empty());
    }

    #[test]
    fn duplicate_nominees_pass_through() {
        let round = Round::new(1, ["A", "A"]).with_save("v1", "A");
        assert_eq!(
            pairs(&resolve(&round)),
            vec![("A", NomineeStatus::Saved), ("A", NomineeStatus::Saved)]
        );
    }

    #[test]
    fn votes_for_non_nominees_are_ignored() {
        let round = Round::new(1, ["A"]).with_elim("v1", "Z");
        assert_eq!(pairs(&resolve(&round)), vec![("A", NomineeStatus::Pending)]);
    }

    #[test]
    fn tally_counts_votes_and_statuses() {
        let round = Round::new(2, ["A", "B", "C", "D"])
            .with_save("v1", "A")
            .with_save("v2", "A")
            .with_elim("v3", "B")
            .with_leftover("C");

        let tally = RoundTally::of(&round);
        assert_eq!(tally.nominees, 4);
        assert_eq!(tally.saves_in, 2);
        assert_eq!(tally.elims_in, 1);
        assert_eq!(tally.leftovers_eliminated, 1);
        assert_eq!(
            (tally.saved, tally.eliminated, tally.leftover, tally.pending),
            (1, 1, 1, 1)
        );
        assert!(!tally.is_settled());
    }

    #[test]
    fn status_wire_names() {
        for status in NomineeStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    fn name() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["A", "B", "C", "D", "E"]).prop_map(String::from)
    }

    fn voter() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["v1", "v2", "v3", "v4"]).prop_map(String::from)
    }

    fn arb_round() -> impl Strategy<Value = Round> {
        (
            prop::collection::vec(name(), 0..8),
            prop::collection::btree_map(voter(), name(), 0..4),
            prop::collection::btree_map(voter(), name(), 0..4),
            prop::collection::btree_set(name(), 0..3),
        )
            .prop_map(|(nominees, saves, elims, leftovers)| Round {
                round_number: Some(1),
                nominator: None,
                nominees,
                saves,
                elims,
                leftovers_eliminated: leftovers,
            })
    }

    proptest! {
        #[test]
        fn one_entry_per_nominee_in_order(round in arb_round()) {
            let resolved = resolve(&round);
            let names: Vec<_> = resolved.iter().map(|r| r.name.clone()).collect();
            prop_assert_eq!(names, round.nominees.clone());
        }

        #[test]
        fn leftover_always_wins(round in arb_round()) {
            for entry in resolve(&round) {
                if round.leftovers_eliminated.contains(&entry.name) {
                    prop_assert_eq!(entry.status, NomineeStatus::Leftover);
                }
            }
        }

        #[test]
        fn status_follows_precedence(round in arb_round()) {
            for entry in resolve(&round) {
                let name = &entry.name;
                let expected = if round.leftovers_eliminated.contains(name) {
                    NomineeStatus::Leftover
                } else if round.elims.values().any(|t| t == name) {
                    NomineeStatus::Eliminated
                } else if round.saves.values().any(|t| t == name) {
                    NomineeStatus::Saved
                } else {
                    NomineeStatus::Pending
                };
                prop_assert_eq!(entry.status, expected);
            }
        }

        #[test]
        fn no_votes_means_all_pending(nominees in prop::collection::vec(name(), 0..8)) {
            let round = Round::new(1, nominees);
            prop_assert!(resolve(&round).iter().all(|r| r.status == NomineeStatus::Pending));
        }

        #[test]
        fn tally_statuses_cover_every_nominee(round in arb_round()) {
            let tally = RoundTally::of(&round);
            prop_assert_eq!(
                tally.saved + tally.eliminated + tally.leftover + tally.pending,
                round.nominees.len()
            );
        }
    }
}

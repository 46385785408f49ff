//! Rankdown Core
//!
//! Rules for reading the state of a Rankdown game: who is still in, who the
//! current round's nominees are, and how each of them stands.
//!
//! # Components
//!
//! - **Models**: the snapshot document ([`Snapshot`], [`Round`], [`EliminationRecord`])
//! - **Resolve**: raw votes → one [`NomineeStatus`] per nominee
//! - **History**: elimination records → display order
//! - **Validity**: advisory data-quality checks
//!
//! Everything here is pure and synchronous. A snapshot goes in, fresh values
//! come out; nothing is cached and nothing is mutated.
//!
//! # Example
//!
//! ```
//! use rankdown_core::{aggregate, resolve, validate, NomineeStatus, Snapshot};
//!
//! let snapshot = Snapshot::from_json(r#"{
//!     "players": ["Ana", "Ben", "Cal"],
//!     "currentRound": {
//!         "roundNumber": 2,
//!         "nominator": "Ana",
//!         "nominees": ["Ben", "Cal"],
//!         "saves": { "Ana": "Ben" }
//!     },
//!     "eliminated": [{ "name": "Dee", "round": 1, "method": "voted" }]
//! }"#).unwrap();
//!
//! let round = snapshot.current_round.as_ref().unwrap();
//! let board = resolve(round);
//! assert_eq!(board[0].status, NomineeStatus::Saved);
//! assert_eq!(board[1].status, NomineeStatus::Pending);
//!
//! assert_eq!(aggregate(&snapshot.eliminated)[0].name, "Dee");
//! assert!(validate(&snapshot).iter().all(|issue| !issue.is_error()));
//! ```

pub mod error;
mod history;
pub mod models;
mod resolve;
mod validity;

pub use error::{Error, Result};
pub use history::aggregate;
pub use models::{EliminationMethod, EliminationRecord, Round, Snapshot, Timestamp};
pub use resolve::{resolve, NomineeStatus, ResolvedNominee, RoundTally};
pub use validity::{has_errors, validate, Issue, IssueKind, Severity};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_to_board() {
        let snapshot = Snapshot::from_json(
            r#"{
                "players": ["A", "B", "C", "v1", "v2"],
                "currentRound": {
                    "roundNumber": 3,
                    "nominees": ["A", "B", "C"],
                    "saves": { "v1": "A" },
                    "elims": { "v2": "B" },
                    "leftoversEliminated": []
                },
                "eliminated": [
                    { "name": "X", "round": 1 },
                    { "name": "Y", "round": 3, "method": "leftover" },
                    { "name": "Z", "round": 3 },
                    { "name": "W", "round": null }
                ]
            }"#,
        )
        .unwrap();

        let resolved: Vec<_> = resolve(snapshot.current_round.as_ref().unwrap())
            .into_iter()
            .map(|r| (r.name, r.status))
            .collect();
        assert_eq!(
            resolved,
            vec![
                ("A".to_string(), NomineeStatus::Saved),
                ("B".to_string(), NomineeStatus::Eliminated),
                ("C".to_string(), NomineeStatus::Pending),
            ]
        );

        let history: Vec<_> = aggregate(&snapshot.eliminated)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(history, vec!["Y", "Z", "X", "W"]);

        assert!(validate(&snapshot).is_empty());
    }
}

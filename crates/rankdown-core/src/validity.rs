//! Snapshot consistency checks.
//!
//! The validator is advisory. It reports data-quality problems in a snapshot
//! as a list of [`Issue`]s and never blocks resolution or rendering: a
//! snapshot with issues still resolves exactly as it would without them.
//!
//! Issues come out in a fixed order: snapshot-level checks, then checks on
//! the current round, then checks on the elimination history. Within a check
//! they follow input order.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Round, Snapshot};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// What kind of problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    DuplicatePlayer,
    DuplicateNominee,
    UnknownSaveTarget,
    UnknownElimTarget,
    UnknownLeftover,
    /// Same voter in both `saves` and `elims`
    ContradictoryVoter,
    /// Elimination dated after the current round
    FutureElimination,
    MissingRoundNumber,
    InvalidEliminationRound,
    NomineeNotAPlayer,
    NominatorNotAPlayer,
    RepeatedElimination,
    NomineeAlreadyEliminated,
}

/// A single data-quality finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    fn error(kind: IssueKind, message: String) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message,
        }
    }

    fn warning(kind: IssueKind, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message,
        }
    }

    /// Whether this issue is error-severity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Check a snapshot for data-quality problems.
pub fn validate(snapshot: &Snapshot) -> Vec<Issue> {
    let mut issues = Vec::new();

    for name in duplicates(&snapshot.players) {
        issues.push(Issue::error(
            IssueKind::DuplicatePlayer,
            format!("player {name:?} is listed more than once"),
        ));
    }

    if let Some(round) = &snapshot.current_round {
        check_round(snapshot, round, &mut issues);
    }

    check_history(snapshot, &mut issues);

    issues
}

/// Whether any issue in `issues` is error-severity.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_error)
}

fn check_round(snapshot: &Snapshot, round: &Round, issues: &mut Vec<Issue>) {
    let label = round_label(round);

    match round.round_number {
        None => issues.push(Issue::warning(
            IssueKind::MissingRoundNumber,
            "current round has no round number".to_string(),
        )),
        Some(n) if n <= 0 => issues.push(Issue::warning(
            IssueKind::MissingRoundNumber,
            format!("current round number {n} is not positive"),
        )),
        Some(_) => {}
    }

    for name in duplicates(&round.nominees) {
        issues.push(Issue::error(
            IssueKind::DuplicateNominee,
            format!("{label}: nominee {name:?} is listed more than once"),
        ));
    }

    let nominees: HashSet<&str> = round.nominees.iter().map(String::as_str).collect();

    for (voter, target) in &round.saves {
        if !nominees.contains(target.as_str()) {
            issues.push(Issue::error(
                IssueKind::UnknownSaveTarget,
                format!("{label}: {voter:?} saved {target:?}, who is not a nominee"),
            ));
        }
    }

    for (voter, target) in &round.elims {
        if !nominees.contains(target.as_str()) {
            issues.push(Issue::error(
                IssueKind::UnknownElimTarget,
                format!("{label}: {voter:?} eliminated {target:?}, who is not a nominee"),
            ));
        }
    }

    for name in &round.leftovers_eliminated {
        if !nominees.contains(name.as_str()) {
            issues.push(Issue::error(
                IssueKind::UnknownLeftover,
                format!("{label}: leftover elimination {name:?} is not a nominee"),
            ));
        }
    }

    for voter in round.contradictory_voters() {
        issues.push(Issue::warning(
            IssueKind::ContradictoryVoter,
            format!(
                "{label}: {voter:?} both saved {:?} and eliminated {:?}",
                round.saves[voter], round.elims[voter]
            ),
        ));
    }

    // Membership checks are meaningless without a roster.
    if snapshot.players.is_empty() {
        return;
    }
    let players: HashSet<&str> = snapshot.players.iter().map(String::as_str).collect();

    if let Some(nominator) = &round.nominator {
        if !players.contains(nominator.as_str()) {
            issues.push(Issue::warning(
                IssueKind::NominatorNotAPlayer,
                format!("{label}: nominator {nominator:?} is not a player"),
            ));
        }
    }

    let mut reported = HashSet::new();
    for name in &round.nominees {
        if !players.contains(name.as_str()) && reported.insert(name.as_str()) {
            issues.push(Issue::warning(
                IssueKind::NomineeNotAPlayer,
                format!("{label}: nominee {name:?} is not a player"),
            ));
        }
    }
}

fn check_history(snapshot: &Snapshot, issues: &mut Vec<Issue>) {
    let current = snapshot
        .current_round
        .as_ref()
        .and_then(|round| round.round_number);

    for record in &snapshot.eliminated {
        match (record.round, current) {
            (Some(r), _) if r <= 0 => issues.push(Issue::warning(
                IssueKind::InvalidEliminationRound,
                format!("{:?} was eliminated in round {r}, which is not positive", record.name),
            )),
            (Some(r), Some(now)) if r > now => issues.push(Issue::error(
                IssueKind::FutureElimination,
                format!(
                    "{:?} was eliminated in round {r}, after the current round {now}",
                    record.name
                ),
            )),
            _ => {}
        }
    }

    let names: Vec<String> = snapshot.eliminated.iter().map(|r| r.name.clone()).collect();
    for name in duplicates(&names) {
        issues.push(Issue::warning(
            IssueKind::RepeatedElimination,
            format!("{name:?} is recorded as eliminated more than once"),
        ));
    }

    let (Some(round), Some(now)) = (&snapshot.current_round, current) else {
        return;
    };
    let mut reported = HashSet::new();
    for nominee in &round.nominees {
        let earlier = snapshot
            .eliminated
            .iter()
            .filter(|record| record.name == *nominee)
            .filter_map(|record| record.round)
            .find(|r| *r < now);
        if let Some(r) = earlier {
            if reported.insert(nominee.as_str()) {
                issues.push(Issue::warning(
                    IssueKind::NomineeAlreadyEliminated,
                    format!("nominee {nominee:?} was already eliminated in round {r}"),
                ));
            }
        }
    }
}

fn round_label(round: &Round) -> String {
    match round.round_number {
        Some(n) => format!("round {n}"),
        None => "current round".to_string(),
    }
}

/// Names that occur more than once, each reported once, in order of first repeat.
fn duplicates(names: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
            out.push(name.as_str());
        }
    }
    out
}

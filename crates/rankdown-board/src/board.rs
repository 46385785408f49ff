//! Display-ready projection of a snapshot.
//!
//! A [`Board`] is what the presentation layer renders: resolved nominee
//! tiles, vote listings, the ordered elimination history and the validator's
//! findings. It is computed once per applied snapshot and shared from then on.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rankdown_core::{
    aggregate, resolve, validate, EliminationMethod, Issue, NomineeStatus, Round, RoundTally,
    Snapshot, Timestamp,
};
use serde::Serialize;

/// Shown when the snapshot carries no `updatedAt`.
pub const NO_TIMESTAMP: &str = "—";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Everything the presentation layer needs for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub title: String,
    pub updated_at: String,
    pub refresh_secs: u64,
    pub players: Vec<String>,
    pub round: Option<RoundBoard>,
    pub eliminated: Vec<EliminatedEntry>,
    pub issues: Vec<Issue>,
}

/// The current round as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundBoard {
    pub number: Option<i64>,
    pub nominator: Option<String>,
    /// In `nominees` order, duplicates included
    pub nominees: Vec<NomineeTile>,
    /// Sorted by voter
    pub saves: Vec<VoteLine>,
    /// Sorted by voter
    pub elims: Vec<VoteLine>,
    pub tally: RoundTally,
}

/// One nominee and its resolved status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NomineeTile {
    pub name: String,
    pub status: NomineeStatus,
    pub label: &'static str,
}

/// A single `voter -> target` vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteLine {
    pub voter: String,
    pub target: String,
}

/// One row of the elimination history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EliminatedEntry {
    pub name: String,
    pub round: Option<i64>,
    pub method: EliminationMethod,
    pub label: &'static str,
}

impl Board {
    /// Build the board for `snapshot`.
    pub fn from_snapshot(snapshot: &Snapshot, refresh: Duration) -> Self {
        let eliminated = aggregate(&snapshot.eliminated)
            .into_iter()
            .map(|record| EliminatedEntry {
                label: method_label(record.method),
                name: record.name,
                round: record.round,
                method: record.method,
            })
            .collect();

        Self {
            title: snapshot.title().to_string(),
            updated_at: format_updated_at(snapshot.updated_at.as_ref()),
            refresh_secs: refresh.as_secs(),
            players: snapshot.players.clone(),
            round: snapshot.current_round.as_ref().map(RoundBoard::from_round),
            eliminated,
            issues: validate(snapshot),
        }
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|issue| issue.is_error()).count()
    }
}

impl RoundBoard {
    fn from_round(round: &Round) -> Self {
        let resolved = resolve(round);
        let tally = RoundTally::from_resolution(round, &resolved);

        Self {
            number: round.round_number,
            nominator: round.nominator.clone(),
            nominees: resolved
                .into_iter()
                .map(|entry| NomineeTile {
                    label: status_label(entry.status),
                    name: entry.name,
                    status: entry.status,
                })
                .collect(),
            saves: vote_lines(&round.saves),
            elims: vote_lines(&round.elims),
            tally,
        }
    }
}

fn vote_lines(votes: &std::collections::BTreeMap<String, String>) -> Vec<VoteLine> {
    votes
        .iter()
        .map(|(voter, target)| VoteLine {
            voter: voter.clone(),
            target: target.clone(),
        })
        .collect()
}

/// Tile label for a nominee status.
pub fn status_label(status: NomineeStatus) -> &'static str {
    match status {
        NomineeStatus::Saved => "Saved",
        NomineeStatus::Eliminated => "Elim",
        NomineeStatus::Leftover => "Leftover",
        NomineeStatus::Pending => "Unresolved",
    }
}

/// History label for an elimination method.
pub fn method_label(method: EliminationMethod) -> &'static str {
    match method {
        EliminationMethod::Voted => "Voted Elim",
        EliminationMethod::Leftover => "Leftover",
    }
}

/// Render `updatedAt` for display.
///
/// RFC 3339 strings and epoch milliseconds become `YYYY-MM-DD HH:MM:SS UTC`;
/// anything else is shown verbatim.
pub fn format_updated_at(updated_at: Option<&Timestamp>) -> String {
    match updated_at {
        None => NO_TIMESTAMP.to_string(),
        Some(Timestamp::EpochMillis(ms)) => ms
            .is_finite()
            .then(|| DateTime::<Utc>::from_timestamp_millis(*ms as i64))
            .flatten()
            .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| ms.to_string()),
        Some(Timestamp::Text(text)) => DateTime::parse_from_rfc3339(text.trim())
            .map(|dt| dt.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|_| text.clone()),
    }
}

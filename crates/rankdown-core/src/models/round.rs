//! The active voting round.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Raw per-voter records for the round currently being played.
///
/// `saves` and `elims` map a voter to the nominee they picked. Their
/// iteration order is by voter name and carries no display meaning; only
/// `nominees` defines the order in which nominees are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Round number, expected positive and increasing across rounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_number: Option<i64>,

    /// Contestant who picked the nominees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominator: Option<String>,

    /// Nominees in display order, passed through verbatim
    #[serde(default, deserialize_with = "null_as_default")]
    pub nominees: Vec<String>,

    /// Voter -> nominee they chose to save
    #[serde(default, deserialize_with = "null_as_default")]
    pub saves: BTreeMap<String, String>,

    /// Voter -> nominee they chose to eliminate
    #[serde(default, deserialize_with = "null_as_default")]
    pub elims: BTreeMap<String, String>,

    /// Nominees eliminated by the leftover rule
    #[serde(default, deserialize_with = "null_as_default")]
    pub leftovers_eliminated: BTreeSet<String>,
}

impl Round {
    /// Create a round with the given number and nominees and no votes yet.
    pub fn new<I, S>(round_number: i64, nominees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            round_number: Some(round_number),
            nominees: nominees.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the nominator.
    pub fn with_nominator(mut self, nominator: impl Into<String>) -> Self {
        self.nominator = Some(nominator.into());
        self
    }

    /// Record a save vote.
    pub fn with_save(mut self, voter: impl Into<String>, target: impl Into<String>) -> Self {
        self.saves.insert(voter.into(), target.into());
        self
    }

    /// Record an elimination vote.
    pub fn with_elim(mut self, voter: impl Into<String>, target: impl Into<String>) -> Self {
        self.elims.insert(voter.into(), target.into());
        self
    }

    /// Mark a nominee as eliminated by the leftover rule.
    pub fn with_leftover(mut self, nominee: impl Into<String>) -> Self {
        self.leftovers_eliminated.insert(nominee.into());
        self
    }

    /// Voters who appear in both `saves` and `elims`.
    pub fn contradictory_voters(&self) -> impl Iterator<Item = &str> {
        self.saves
            .keys()
            .filter(|voter| self.elims.contains_key(*voter))
            .map(String::as_str)
    }
}

//! Permanent elimination history entries.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// How a contestant was eliminated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EliminationMethod {
    /// Eliminated by direct elimination votes
    #[default]
    Voted,
    /// Eliminated by the leftover rule
    Leftover,
}

impl EliminationMethod {
    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            EliminationMethod::Voted => "voted",
            EliminationMethod::Leftover => "leftover",
        }
    }
}

impl From<String> for EliminationMethod {
    /// `"leftover"` in any case selects [`EliminationMethod::Leftover`];
    /// every other value is a voted elimination.
    fn from(method: String) -> Self {
        if method.trim().eq_ignore_ascii_case("leftover") {
            EliminationMethod::Leftover
        } else {
            EliminationMethod::Voted
        }
    }
}

/// One contestant's elimination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationRecord {
    /// Contestant name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Round of the elimination; `None` when the document did not say
    #[serde(default)]
    pub round: Option<i64>,

    /// How the contestant went out
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: EliminationMethod,
}

impl EliminationRecord {
    /// Create a record for a known round.
    pub fn new(name: impl Into<String>, round: i64, method: EliminationMethod) -> Self {
        Self {
            name: name.into(),
            round: Some(round),
            method,
        }
    }

    /// Create a record whose round is unknown.
    pub fn unknown_round(name: impl Into<String>, method: EliminationMethod) -> Self {
        Self {
            name: name.into(),
            round: None,
            method,
        }
    }

    /// Round used for ordering; an unknown round compares as 0.
    pub fn sort_round(&self) -> i64 {
        self.round.unwrap_or(0)
    }
}

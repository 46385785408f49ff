//! The game-state document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{null_as_default, EliminationRecord, Round};
use crate::error::{Error, Result};

/// One immutable, self-contained view of the game.
///
/// A snapshot is never patched: each refresh decodes a brand-new value that
/// replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Display title of the game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_title: Option<String>,

    /// When the operator last published the document (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,

    /// Contestants, in display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<String>,

    /// The active round, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_round: Option<Round>,

    /// Elimination history across all completed rounds
    #[serde(default, deserialize_with = "null_as_default")]
    pub eliminated: Vec<EliminationRecord>,
}

impl Snapshot {
    /// Title used when the document does not carry one.
    pub const DEFAULT_TITLE: &'static str = "Rankdown";

    /// Decode a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Decode a snapshot from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// Decode a snapshot from an already-parsed JSON value.
    ///
    /// The top level must be an object; everything inside it is optional.
    pub fn from_value(value: Value) -> Result<Self> {
        let kind = match &value {
            Value::Object(_) => return Ok(serde_json::from_value(value)?),
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
        };
        Err(Error::NotAnObject(kind))
    }

    /// The title to display, falling back to [`Self::DEFAULT_TITLE`].
    pub fn title(&self) -> &str {
        self.game_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(Self::DEFAULT_TITLE)
    }
}

/// The `updatedAt` value, either epoch milliseconds or free-form text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch
    EpochMillis(f64),
    /// An ISO-8601 string or anything else the operator wrote
    Text(String),
}

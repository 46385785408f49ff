//! Snapshot document model.
//!
//! The types here mirror the game-state document published by the operator.
//! Every field is optional on the wire: missing or `null` collections decode
//! as empty, missing scalars decode as `None`.
//!
//! # Types
//!
//! - [`Snapshot`] - the whole document
//! - [`Round`] - the active voting round
//! - [`EliminationRecord`] - one permanent history entry
//! - [`Timestamp`] - the display-only `updatedAt` value

mod elimination;
mod round;
mod snapshot;

pub use elimination::{EliminationMethod, EliminationRecord};
pub use round::Round;
pub use snapshot::{Snapshot, Timestamp};

use serde::{Deserialize, Deserializer};

/// Decode a field that may be absent or `null` as its default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Checkpoint and restore for calculator sessions.
//!
//! A [`Checkpoint`] captures a [`CalculatorState`] (current snapshot plus both
//! history buffers) as plain data that can be encoded to JSON or a compact
//! binary form. Where the bytes go is up to the host; this module never
//! touches the filesystem.
//!
//! Restoring rebuilds a state that is value-equal to the captured one.
//! Structural sharing between history entries is not preserved.

use crate::core::{CalculatorState, History, Snapshot, Stack};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

pub mod error;

pub use error::{CheckpointError, CheckpointViolation};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable capture of a calculator session.
///
/// Both history buffers are stored oldest entry first.
///
/// # Example
///
/// ```rust
/// use rpn_core::checkpoint::Checkpoint;
/// use rpn_core::core::{CalculatorState, Command};
///
/// let state = CalculatorState::new()
///     .dispatch(&Command::enter("1"))
///     .dispatch(&Command::enter("2"));
///
/// let json = Checkpoint::capture(&state).to_json().unwrap();
/// let restored = Checkpoint::from_json(&json).unwrap().restore().unwrap();
///
/// assert_eq!(restored, state);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// The snapshot that was current
    pub snapshot: Snapshot,

    /// Undo buffer, oldest first
    pub undo: Vec<Snapshot>,

    /// Redo buffer, oldest first
    pub redo: Vec<Snapshot>,
}

impl Checkpoint {
    /// Capture `state` under a fresh id.
    pub fn capture(state: &CalculatorState) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            snapshot: state.snapshot().clone(),
            undo: state.undo_buffer().to_vec(),
            redo: state.redo_buffer().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Check the checkpoint's contents, accumulating ALL violations.
    ///
    /// Every value on every stored stack must be finite, and the id must be
    /// present.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<CheckpointViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<CheckpointViolation>>> = Vec::new();

        checks.push(if self.id.trim().is_empty() {
            Validation::fail(CheckpointViolation::MissingId)
        } else {
            Validation::success(())
        });

        checks.extend(finite_checks("current snapshot", &self.snapshot));
        for (position, snapshot) in self.undo.iter().enumerate() {
            checks.extend(finite_checks(&format!("undo entry {position}"), snapshot));
        }
        for (position, snapshot) in self.redo.iter().enumerate() {
            checks.extend(finite_checks(&format!("redo entry {position}"), snapshot));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Rebuild the captured state.
    ///
    /// Fails if the format version is not supported or validation finds
    /// any violation.
    pub fn restore(self) -> Result<CalculatorState, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            warn!(found = self.version, "unsupported checkpoint version");
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if let Validation::Failure(violations) = self.validate() {
            let message = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            warn!(id = %self.id, count = violations.len(), "checkpoint failed validation");
            return Err(CheckpointError::ValidationFailed(message));
        }

        debug!(
            id = %self.id,
            undo = self.undo.len(),
            redo = self.redo.len(),
            "restoring checkpoint"
        );
        let history = History::from_buffers(
            self.undo.into_iter().collect::<Stack<_>>(),
            self.redo.into_iter().collect::<Stack<_>>(),
        );
        Ok(CalculatorState::from_parts(self.snapshot, history))
    }
}

fn finite_checks(
    location: &str,
    snapshot: &Snapshot,
) -> Vec<Validation<(), NonEmptyVec<CheckpointViolation>>> {
    snapshot
        .values()
        .into_iter()
        .enumerate()
        .filter(|(_, value)| !value.is_finite())
        .map(|(index, value)| {
            Validation::fail(CheckpointViolation::NonFiniteValue {
                location: location.to_string(),
                index,
                value,
            })
        })
        .collect()
}

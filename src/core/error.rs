//! Calculator error conditions.
//!
//! These are expected, recoverable outcomes carried on a snapshot as data,
//! never returned as faults from `dispatch`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed command, as recorded on the resulting snapshot.
///
/// The `Display` text is what the display model shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CalcError {
    /// Entry text could not be parsed as a finite number.
    #[error("Invalid number entry")]
    InvalidEntry,

    /// The operator needed more operands than the stack holds.
    #[error("Need {need} value(s) on the stack")]
    StackUnderflow { need: usize },

    /// The operator produced NaN or an infinity.
    #[error("Calculation error")]
    CalculationError,
}

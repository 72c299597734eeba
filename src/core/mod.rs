//! Core calculator types and logic.
//!
//! This module contains the pure functional core of the calculator:
//! - A persistent, structurally shared stack
//! - The operator registry
//! - Snapshots and the snapshot reducer
//! - Undo/redo history and the state transition function
//!
//! All logic in this module is pure (no side effects, no logging): state goes
//! in, state comes out. The mutable shell lives in [`crate::facade`].

mod command;
mod error;
mod history;
mod operator;
mod snapshot;
mod stack;
mod state;

pub use command::Command;
pub use error::CalcError;
pub use history::History;
pub use operator::{apply, CalcValue, OperatorKey, ParseOperatorError};
pub use snapshot::{parse_entry, Snapshot};
pub use stack::{Iter, Stack};
pub use state::{dispatch, CalculatorState};

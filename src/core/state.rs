//! Calculator state and the history manager.
//!
//! [`CalculatorState`] pairs the current [`Snapshot`] with its undo/redo
//! [`History`]. [`CalculatorState::dispatch`] is the single transition
//! function of the whole calculator: it either moves through history or
//! runs the snapshot reducer and records the result.

use super::command::Command;
use super::history::History;
use super::snapshot::Snapshot;
use super::stack::Stack;
use serde::{Deserialize, Serialize};

/// Everything the calculator knows at one instant.
///
/// Values of this type are immutable and cheap to clone; every old state
/// stays valid after newer ones are produced.
///
/// # Example
///
/// ```rust
/// use rpn_core::core::{CalculatorState, Command, OperatorKey};
///
/// let state = CalculatorState::new()
///     .dispatch(&Command::enter("2"))
///     .dispatch(&Command::enter("3"))
///     .dispatch(&Command::operator(OperatorKey::Subtract));
/// assert_eq!(state.snapshot().values(), vec![-1.0]);
///
/// let state = state.dispatch(&Command::Undo);
/// assert_eq!(state.snapshot().values(), vec![2.0, 3.0]);
///
/// let state = state.dispatch(&Command::Redo);
/// assert_eq!(state.snapshot().values(), vec![-1.0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    snapshot: Snapshot,
    history: History<Snapshot>,
}

impl CalculatorState {
    /// Empty stack, no error, no history.
    pub const fn new() -> Self {
        Self {
            snapshot: Snapshot::new(),
            history: History::new(),
        }
    }

    /// Assemble a state from its parts.
    pub fn from_parts(snapshot: Snapshot, history: History<Snapshot>) -> Self {
        Self { snapshot, history }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    /// Snapshots that existed before each recorded command, newest on top.
    pub fn undo_buffer(&self) -> &Stack<Snapshot> {
        self.history.undo_buffer()
    }

    /// Undone snapshots waiting to be re-applied, newest on top.
    pub fn redo_buffer(&self) -> &Stack<Snapshot> {
        self.history.redo_buffer()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Compute the state that follows `command`.
    ///
    /// Total: every command yields a well-formed state, with failures
    /// reported through the snapshot's error.
    ///
    /// - `Undo`/`Redo` swap snapshots between the buffers, or do nothing
    ///   when the relevant buffer is empty.
    /// - Any other command runs the snapshot reducer. If the stack changed,
    ///   the previous snapshot is recorded for undo and the redo buffer is
    ///   discarded. If only the error changed, the new snapshot replaces the
    ///   current one without touching either buffer. If nothing changed,
    ///   the state is returned as is.
    #[must_use]
    pub fn dispatch(&self, command: &Command) -> CalculatorState {
        match command {
            Command::Undo => self
                .history
                .undo(self.snapshot.clone())
                .map_or_else(|| self.clone(), |(previous, history)| {
                    Self::from_parts(previous, history)
                }),
            Command::Redo => self
                .history
                .redo(self.snapshot.clone())
                .map_or_else(|| self.clone(), |(next, history)| {
                    Self::from_parts(next, history)
                }),
            Command::Enter { .. } | Command::Operator { .. } | Command::Clear => {
                self.apply_edit(command)
            }
        }
    }

    fn apply_edit(&self, command: &Command) -> CalculatorState {
        let before = &self.snapshot;
        let after = before.reduce(command);

        if after == *before {
            return self.clone();
        }
        if after.same_stack(before) {
            return Self::from_parts(after, self.history.clone());
        }
        Self::from_parts(after, self.history.record(before.clone()))
    }
}

/// Free-function form of [`CalculatorState::dispatch`].
pub fn dispatch(state: &CalculatorState, command: &Command) -> CalculatorState {
    state.dispatch(command)
}

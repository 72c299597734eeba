//! Snapshots and the snapshot reducer.
//!
//! A [`Snapshot`] is one displayable instant of the calculator: the value
//! stack plus the error left by the last command, if it failed. The reducer
//! ([`Snapshot::reduce`]) is a pure function from a snapshot and an editing
//! command to the next snapshot. History is layered on top in
//! [`CalculatorState`](super::CalculatorState).

use super::command::Command;
use super::error::CalcError;
use super::operator::{self, CalcValue};
use super::stack::Stack;
use serde::{Deserialize, Serialize};

/// Immutable calculator stack plus error state.
///
/// # Example
///
/// ```rust
/// use rpn_core::core::{Command, OperatorKey, Snapshot};
///
/// let snapshot = Snapshot::new()
///     .reduce(&Command::enter("3"))
///     .reduce(&Command::enter("4"))
///     .reduce(&Command::operator(OperatorKey::Add));
///
/// assert_eq!(snapshot.values(), vec![7.0]);
/// assert!(snapshot.error().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    stack: Stack<CalcValue>,
    error: Option<CalcError>,
}

impl Snapshot {
    /// The initial snapshot: empty stack, no error.
    pub const fn new() -> Self {
        Self {
            stack: Stack::new(),
            error: None,
        }
    }

    /// A snapshot holding `stack` with no error.
    pub fn with_stack(stack: Stack<CalcValue>) -> Self {
        Self { stack, error: None }
    }

    pub fn stack(&self) -> &Stack<CalcValue> {
        &self.stack
    }

    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Stack values, bottom-to-top.
    pub fn values(&self) -> Vec<CalcValue> {
        self.stack.to_vec()
    }

    /// True when `other` holds the same stack, regardless of error.
    pub fn same_stack(&self, other: &Snapshot) -> bool {
        self.stack == other.stack
    }

    /// Compute the snapshot that follows `command`.
    ///
    /// `Undo` and `Redo` are history operations; on a bare snapshot they
    /// change nothing.
    pub fn reduce(&self, command: &Command) -> Snapshot {
        match command {
            Command::Enter { value } => self.enter(value),
            Command::Operator { key } => match operator::apply(*key, &self.stack) {
                Ok(stack) => Snapshot::with_stack(stack),
                Err(error) => self.fail(error),
            },
            Command::Clear => Snapshot::new(),
            Command::Undo | Command::Redo => self.clone(),
        }
    }

    fn enter(&self, text: &str) -> Snapshot {
        if text.trim().is_empty() {
            return self.clone();
        }
        match parse_entry(text) {
            Some(value) => Snapshot::with_stack(self.stack.push(value)),
            None => self.fail(CalcError::InvalidEntry),
        }
    }

    /// Same stack, new error. Failed commands never touch the stack.
    fn fail(&self, error: CalcError) -> Snapshot {
        Snapshot {
            stack: self.stack.clone(),
            error: Some(error),
        }
    }
}

/// Parse entry text as a finite decimal number.
///
/// Surrounding whitespace is ignored. Returns `None` for empty text, a lone
/// sign or point (`-`, `.`, `-.`), anything that is not a number, and numbers
/// that are not finite (`inf`, `NaN`, `1e999`).
///
/// ```rust
/// use rpn_core::core::parse_entry;
///
/// assert_eq!(parse_entry(" -2.5 "), Some(-2.5));
/// assert_eq!(parse_entry("1e3"), Some(1000.0));
/// assert_eq!(parse_entry("-."), None);
/// assert_eq!(parse_entry("inf"), None);
/// ```
pub fn parse_entry(text: &str) -> Option<CalcValue> {
    let text = text.trim();
    if matches!(text, "" | "-" | "." | "-.") {
        return None;
    }
    text.parse::<CalcValue>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OperatorKey;

    fn run(commands: &[Command]) -> Snapshot {
        commands
            .iter()
            .fold(Snapshot::new(), |snapshot, command| snapshot.reduce(command))
    }

    #[test]
    fn enter_pushes_parsed_values() {
        let snapshot = run(&[Command::enter("3"), Command::enter(" .5 ")]);
        assert_eq!(snapshot.values(), vec![3.0, 0.5]);
        assert!(!snapshot.is_error());
    }

    #[test]
    fn blank_entry_is_a_no_op() {
        let before = run(&[Command::enter("1")]);
        for text in ["", "   ", "\t"] {
            let after = before.reduce(&Command::enter(text));
            assert_eq!(after, before);
            assert!(after.stack().ptr_eq(before.stack()));
        }
    }

    #[test]
    fn blank_entry_keeps_a_pending_error() {
        let failed = run(&[Command::operator(OperatorKey::Add)]);
        let after = failed.reduce(&Command::enter(""));
        assert_eq!(after.error(), Some(&CalcError::StackUnderflow { need: 2 }));
    }

    #[test]
    fn malformed_entries_are_rejected() {
        let before = run(&[Command::enter("9")]);
        for text in ["-", ".", "-.", "abc", "1.2.3", "inf", "-infinity", "NaN", "1e999", "0x10"] {
            let after = before.reduce(&Command::enter(text));
            assert_eq!(after.error(), Some(&CalcError::InvalidEntry), "entry {text:?}");
            assert!(after.stack().ptr_eq(before.stack()));
        }
    }

    #[test]
    fn parse_entry_edge_cases() {
        assert_eq!(parse_entry(""), None);
        assert_eq!(parse_entry("-"), None);
        assert_eq!(parse_entry("."), None);
        assert_eq!(parse_entry("-."), None);
        assert_eq!(parse_entry("0"), Some(0.0));
        assert_eq!(parse_entry("-7"), Some(-7.0));
        assert_eq!(parse_entry("+7"), Some(7.0));
        assert_eq!(parse_entry("2.5e-3"), Some(0.0025));
    }

    #[test]
    fn successful_entry_clears_error() {
        let snapshot = run(&[Command::enter("x"), Command::enter("2")]);
        assert!(snapshot.error().is_none());
        assert_eq!(snapshot.values(), vec![2.0]);
    }

    #[test]
    fn operator_computes_and_clears_error() {
        let snapshot = run(&[
            Command::enter("3"),
            Command::operator(OperatorKey::Add),
            Command::enter("4"),
            Command::operator(OperatorKey::Add),
        ]);
        assert_eq!(snapshot.values(), vec![7.0]);
        assert!(snapshot.error().is_none());
    }

    #[test]
    fn failed_operator_leaves_stack_and_sets_error() {
        let before = run(&[Command::enter("-1")]);
        let after = before.reduce(&Command::operator(OperatorKey::Sqrt));

        assert_eq!(after.error(), Some(&CalcError::CalculationError));
        assert_eq!(after.values(), vec![-1.0]);
        assert!(after.same_stack(&before));
    }

    #[test]
    fn failed_operator_replaces_previous_error() {
        let snapshot = run(&[
            Command::enter("nope"),
            Command::operator(OperatorKey::Drop),
        ]);
        assert_eq!(snapshot.error(), Some(&CalcError::StackUnderflow { need: 1 }));
    }

    #[test]
    fn clear_resets_everything() {
        let snapshot = run(&[
            Command::enter("1"),
            Command::enter("2"),
            Command::enter("bad"),
            Command::Clear,
        ]);
        assert_eq!(snapshot, Snapshot::new());
        assert_eq!(snapshot.reduce(&Command::Clear), snapshot);
    }

    #[test]
    fn history_commands_leave_snapshot_alone() {
        let before = run(&[Command::enter("5")]);
        assert_eq!(before.reduce(&Command::Undo), before);
        assert_eq!(before.reduce(&Command::Redo), before);
    }

    #[test]
    fn reduce_is_deterministic() {
        let before = run(&[Command::enter("2"), Command::enter("8")]);
        let command = Command::operator(OperatorKey::Divide);
        assert_eq!(before.reduce(&command), before.reduce(&command));
    }

    #[test]
    fn snapshot_serializes_correctly() {
        let snapshot = run(&[Command::enter("1.5"), Command::operator(OperatorKey::Swap)]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"stack":[1.5],"error":{"StackUnderflow":{"need":2}}}"#);

        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}

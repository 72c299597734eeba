//! Calculator commands.

use super::operator::OperatorKey;
use serde::{Deserialize, Serialize};

/// A discrete instruction for the calculator.
///
/// Commands are inert data. The UI layer builds them (see
/// [`Keypad`](crate::facade::Keypad)) and hands them to `dispatch`.
///
/// On the wire a command is a JSON object tagged by `type`:
///
/// ```rust
/// use rpn_core::core::{Command, OperatorKey};
///
/// let command: Command = serde_json::from_str(r#"{"type":"operator","key":"+"}"#).unwrap();
/// assert_eq!(command, Command::Operator { key: OperatorKey::Add });
///
/// let command: Command = serde_json::from_str(r#"{"type":"enter","value":"3.5"}"#).unwrap();
/// assert_eq!(command, Command::enter("3.5"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    /// Parse `value` as a number and push it.
    Enter { value: String },
    /// Apply a registered operator to the stack.
    Operator { key: OperatorKey },
    /// Reset to an empty stack with no error.
    Clear,
    /// Step back one recorded snapshot.
    Undo,
    /// Re-apply the most recently undone snapshot.
    Redo,
}

impl Command {
    pub fn enter(value: impl Into<String>) -> Self {
        Self::Enter {
            value: value.into(),
        }
    }

    pub fn operator(key: OperatorKey) -> Self {
        Self::Operator { key }
    }

    /// True for `Undo` and `Redo`, which move through history instead of
    /// editing the snapshot.
    pub fn is_history(&self) -> bool {
        matches!(self, Self::Undo | Self::Redo)
    }
}

impl From<OperatorKey> for Command {
    fn from(key: OperatorKey) -> Self {
        Self::Operator { key }
    }
}

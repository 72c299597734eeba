//! Keypad input: turns discrete key presses into calculator commands.
//!
//! The keypad owns the entry line being typed. Digits and the decimal point
//! only edit that line; the line becomes an `Enter` command when the user
//! presses ENTER or an operator.

use crate::core::{Command, OperatorKey};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading key presses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeypadError {
    #[error("Unknown key '{0}'")]
    UnknownKey(String),

    #[error("Invalid digit {0}")]
    InvalidDigit(u8),
}

/// One key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    /// A decimal digit, `0..=9`.
    Digit(u8),
    Dot,
    Back,
    Enter,
    Operator(OperatorKey),
    Clear,
    Undo,
    Redo,
}

impl FromStr for KeyIntent {
    type Err = KeypadError;

    /// Parses keypad tokens: `0`-`9`, `.`, `BACK`, `ENTER`, `CLR`, `UNDO`,
    /// `REDO`, and any operator symbol or name (`+`, `SWAP`, `sqrt`, ...).
    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let [digit @ b'0'..=b'9'] = token.as_bytes() {
            return Ok(Self::Digit(digit - b'0'));
        }
        match token.to_ascii_uppercase().as_str() {
            "." => Ok(Self::Dot),
            "BACK" | "BACKSPACE" => Ok(Self::Back),
            "ENTER" => Ok(Self::Enter),
            "CLR" | "CLEAR" => Ok(Self::Clear),
            "UNDO" => Ok(Self::Undo),
            "REDO" => Ok(Self::Redo),
            _ => token
                .parse::<OperatorKey>()
                .map(Self::Operator)
                .map_err(|_| KeypadError::UnknownKey(s.to_string())),
        }
    }
}

/// Entry-line editor.
///
/// # Example
///
/// ```rust
/// use rpn_core::core::{Command, OperatorKey};
/// use rpn_core::facade::{KeyIntent, Keypad};
///
/// let mut keypad = Keypad::new();
/// keypad.press(KeyIntent::Digit(1)).unwrap();
/// keypad.press(KeyIntent::Dot).unwrap();
/// keypad.press(KeyIntent::Digit(5)).unwrap();
/// assert_eq!(keypad.entry(), "1.5");
///
/// let commands = keypad.press(KeyIntent::Operator(OperatorKey::Add)).unwrap();
/// assert_eq!(
///     commands,
///     vec![Command::enter("1.5"), Command::operator(OperatorKey::Add)]
/// );
/// assert_eq!(keypad.entry(), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    entry: String,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text typed so far.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Apply one key press and return the commands it produces, in order.
    ///
    /// Editing keys return no commands.
    pub fn press(&mut self, intent: KeyIntent) -> Result<Vec<Command>, KeypadError> {
        let commands = match intent {
            KeyIntent::Digit(digit) => {
                if digit > 9 {
                    return Err(KeypadError::InvalidDigit(digit));
                }
                self.entry.push(char::from(b'0' + digit));
                Vec::new()
            }
            KeyIntent::Dot => {
                if self.entry.is_empty() {
                    self.entry.push_str("0.");
                } else if !self.entry.contains('.') {
                    self.entry.push('.');
                }
                Vec::new()
            }
            KeyIntent::Back => {
                self.entry.pop();
                Vec::new()
            }
            KeyIntent::Enter => self.commit().into_iter().collect(),
            KeyIntent::Operator(key) => {
                let mut commands: Vec<Command> = self.commit().into_iter().collect();
                commands.push(Command::operator(key));
                commands
            }
            KeyIntent::Clear => {
                self.entry.clear();
                vec![Command::Clear]
            }
            KeyIntent::Undo => vec![Command::Undo],
            KeyIntent::Redo => vec![Command::Redo],
        };
        Ok(commands)
    }

    /// Discard the entry line.
    pub fn clear_entry(&mut self) {
        self.entry.clear();
    }

    fn commit(&mut self) -> Option<Command> {
        if self.entry.is_empty() {
            return None;
        }
        Some(Command::enter(std::mem::take(&mut self.entry)))
    }
}

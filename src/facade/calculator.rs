//! The calculator facade: the one place that holds mutable state.

use crate::builder::CalculatorBuilder;
use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{CalculatorState, Command};
use crate::facade::display::{DisplayFormat, DisplayModel};
use crate::facade::keypad::{KeyIntent, Keypad, KeypadError};
use tracing::{debug, trace};

/// Holds the current [`CalculatorState`] and applies commands to it.
///
/// Dispatch takes `&mut self`, so commands are applied strictly one after
/// another. Hosts that dispatch from several threads wrap the calculator in
/// a mutex; readers can instead clone a [`CalculatorState`] and keep it, since
/// states are immutable and `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use rpn_core::core::{Command, OperatorKey};
/// use rpn_core::facade::Calculator;
///
/// let mut calculator = Calculator::new();
/// calculator.dispatch(&Command::enter("3"));
/// calculator.dispatch(&Command::enter("4"));
/// calculator.dispatch(&Command::operator(OperatorKey::Add));
///
/// let display = calculator.display_model();
/// assert_eq!(display.stack_lines, vec!["7"]);
/// assert_eq!(display.error, None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
    keypad: Keypad,
    format: DisplayFormat,
}

impl Calculator {
    /// A calculator with an empty stack and the default display format.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CalculatorBuilder {
        CalculatorBuilder::new()
    }

    pub(crate) fn from_parts(state: CalculatorState, format: DisplayFormat) -> Self {
        Self {
            state,
            keypad: Keypad::new(),
            format,
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    /// The keypad entry line being typed.
    pub fn entry(&self) -> &str {
        self.keypad.entry()
    }

    /// Apply `command` and return the new current state.
    pub fn dispatch(&mut self, command: &Command) -> &CalculatorState {
        let next = self.state.dispatch(command);

        let unchanged = next.snapshot() == self.state.snapshot()
            && next.undo_buffer().ptr_eq(self.state.undo_buffer())
            && next.redo_buffer().ptr_eq(self.state.redo_buffer());
        if unchanged {
            trace!(?command, "command left the state unchanged");
        } else if let Some(error) = next.snapshot().error() {
            debug!(?command, %error, "command rejected");
        } else {
            debug!(
                ?command,
                depth = next.snapshot().stack().len(),
                undo = next.history().undo_depth(),
                redo = next.history().redo_depth(),
                "command applied"
            );
        }

        self.state = next;
        &self.state
    }

    /// Feed one key press through the keypad and dispatch whatever commands
    /// it produces.
    pub fn press(&mut self, intent: KeyIntent) -> Result<&CalculatorState, KeypadError> {
        let commands = self.keypad.press(intent).map_err(|error| {
            debug!(?intent, %error, "key press rejected");
            error
        })?;
        for command in &commands {
            self.dispatch(command);
        }
        Ok(&self.state)
    }

    /// Parse a keypad token (`"7"`, `"ENTER"`, `"+"`, ...) and press it.
    pub fn press_key(&mut self, token: &str) -> Result<&CalculatorState, KeypadError> {
        let intent = token.parse::<KeyIntent>().map_err(|error| {
            debug!(token, %error, "unknown key token");
            error
        })?;
        self.press(intent)
    }

    /// Project the current state and entry line for display.
    pub fn display_model(&self) -> DisplayModel {
        DisplayModel::project(&self.state, self.keypad.entry(), &self.format)
    }

    /// Capture the current state, history included.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(&self.state)
    }

    /// Replace the current state with one restored from `checkpoint`.
    ///
    /// The pending keypad entry is discarded. On error the calculator is
    /// left as it was.
    pub fn restore(
        &mut self,
        checkpoint: Checkpoint,
    ) -> Result<&CalculatorState, CheckpointError> {
        self.state = checkpoint.restore()?;
        self.keypad.clear_entry();
        Ok(&self.state)
    }

    /// Drop all state and history.
    pub fn reset(&mut self) {
        debug!("calculator reset");
        self.state = CalculatorState::new();
        self.keypad.clear_entry();
    }
}

//! The imperative shell around the pure core.
//!
//! - [`Calculator`]: owns the current state and serialises dispatch
//! - [`DisplayModel`] / [`DisplayFormat`]: read-only projection for a UI
//! - [`Keypad`]: turns key presses into commands

mod calculator;
mod display;
mod keypad;

pub use calculator::Calculator;
pub use display::{to_display_model, DisplayFormat, DisplayModel, MAX_FRACTION_DIGITS};
pub use keypad::{KeyIntent, Keypad, KeypadError};

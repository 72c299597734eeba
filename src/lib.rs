//! rpn-core: the computational core of a reverse-Polish-notation calculator
//!
//! The calculator is a pure state machine. A [`core::CalculatorState`] plus a
//! [`core::Command`] always yields a new state; nothing is mutated in place.
//! Stacks are persistent linked lists, so every past state stays valid for
//! free and undo/redo is just moving snapshots between two stacks.
//!
//! # Core Concepts
//!
//! - **Stack**: immutable, structurally shared linked stack
//! - **Operators**: a closed registry of pure stack transforms
//! - **Snapshot**: one instant of stack plus error; errors are data, not faults
//! - **History**: unbounded undo/redo built from persistent stacks
//!
//! The [`facade`] module is the thin imperative shell: it owns the single
//! mutable "current state" cell, turns key presses into commands, and
//! projects state into display text.
//!
//! # Example
//!
//! ```rust
//! use rpn_core::core::{CalcError, CalculatorState, Command, OperatorKey};
//!
//! let state = CalculatorState::new()
//!     .dispatch(&Command::enter("2"))
//!     .dispatch(&Command::enter("3"))
//!     .dispatch(&Command::operator(OperatorKey::Subtract));
//! assert_eq!(state.snapshot().values(), vec![-1.0]);
//!
//! let state = state.dispatch(&Command::operator(OperatorKey::Sqrt));
//! assert_eq!(state.snapshot().error(), Some(&CalcError::CalculationError));
//! assert_eq!(state.snapshot().values(), vec![-1.0]);
//!
//! let state = state.dispatch(&Command::Undo);
//! assert_eq!(state.snapshot().values(), vec![2.0, 3.0]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod facade;

// Re-export commonly used types
pub use crate::core::{CalcError, CalculatorState, Command, OperatorKey, Snapshot, Stack};
pub use facade::{Calculator, DisplayModel};

//! Builder API for configuring a calculator.
//!
//! The builder collects the display format and an optional starting state,
//! then validates everything in one place on [`CalculatorBuilder::build`].

pub mod calculator;
pub mod error;

pub use calculator::CalculatorBuilder;
pub use error::BuildError;

//! Builder for constructing calculators.

use crate::builder::error::BuildError;
use crate::core::CalculatorState;
use crate::facade::{Calculator, DisplayFormat};

/// Builder for constructing a [`Calculator`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use rpn_core::core::Command;
/// use rpn_core::facade::Calculator;
///
/// let mut calculator = Calculator::builder()
///     .max_fraction_digits(2)
///     .group_thousands(true)
///     .build()
///     .unwrap();
///
/// calculator.dispatch(&Command::enter("12345.678"));
/// assert_eq!(calculator.display_model().stack_lines, vec!["12,345.68"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CalculatorBuilder {
    initial: Option<CalculatorState>,
    format: DisplayFormat,
}

impl CalculatorBuilder {
    /// Create a new builder with the default display format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state instead of an empty one.
    pub fn initial(mut self, state: CalculatorState) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the whole display format.
    pub fn format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn exponential_above(mut self, threshold: f64) -> Self {
        self.format.exponential_above = threshold;
        self
    }

    pub fn exponential_below(mut self, threshold: f64) -> Self {
        self.format.exponential_below = threshold;
        self
    }

    pub fn max_fraction_digits(mut self, digits: usize) -> Self {
        self.format.max_fraction_digits = Some(digits);
        self
    }

    pub fn group_thousands(mut self, enabled: bool) -> Self {
        self.format.group_thousands = enabled;
        self
    }

    /// Build the calculator.
    /// Returns an error if the display format is invalid.
    pub fn build(self) -> Result<Calculator, BuildError> {
        self.format.validate()?;
        let state = self.initial.unwrap_or_default();
        Ok(Calculator::from_parts(state, self.format))
    }
}

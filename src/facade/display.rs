//! Display projection and number formatting policy.

use crate::builder::BuildError;
use crate::core::{CalcValue, CalculatorState};
use serde::{Deserialize, Serialize};

/// Most fraction digits a double can meaningfully show.
pub const MAX_FRACTION_DIGITS: usize = 17;

/// What a UI needs to draw the calculator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    /// Stack values formatted as text, bottom-to-top.
    pub stack_lines: Vec<String>,
    /// The keypad entry being typed, or `_` when empty.
    pub entry_line: String,
    /// The error left by the last command, if it failed.
    pub error: Option<String>,
}

impl DisplayModel {
    /// Project `state` (plus the pending keypad entry) into display text.
    pub fn project(state: &CalculatorState, entry: &str, format: &DisplayFormat) -> Self {
        let snapshot = state.snapshot();
        let mut stack_lines: Vec<String> = snapshot
            .stack()
            .iter()
            .map(|value| format.format_value(*value))
            .collect();
        stack_lines.reverse();

        Self {
            stack_lines,
            entry_line: if entry.is_empty() {
                "_".to_string()
            } else {
                entry.to_string()
            },
            error: snapshot.error().map(ToString::to_string),
        }
    }
}

/// Pure projection of a state with no pending entry.
///
/// ```rust
/// use rpn_core::core::{CalculatorState, Command};
/// use rpn_core::facade::{to_display_model, DisplayFormat};
///
/// let state = CalculatorState::new()
///     .dispatch(&Command::enter("1.5"))
///     .dispatch(&Command::enter("-"));
/// let model = to_display_model(&state, &DisplayFormat::default());
///
/// assert_eq!(model.stack_lines, vec!["1.5"]);
/// assert_eq!(model.error.as_deref(), Some("Invalid number entry"));
/// ```
pub fn to_display_model(state: &CalculatorState, format: &DisplayFormat) -> DisplayModel {
    DisplayModel::project(state, "", format)
}

/// Number formatting policy.
///
/// Loaded from JSON with [`DisplayFormat::from_json`]; missing fields take
/// their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    /// Magnitudes at or above this use exponential notation.
    pub exponential_above: f64,
    /// Non-zero magnitudes below this use exponential notation.
    pub exponential_below: f64,
    /// Round to this many fraction digits; `None` prints the shortest text
    /// that reads back as the same double.
    pub max_fraction_digits: Option<usize>,
    /// Separate thousands in the integer part with commas.
    pub group_thousands: bool,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            exponential_above: 1e15,
            exponential_below: 1e-7,
            max_fraction_digits: None,
            group_thousands: false,
        }
    }
}

impl DisplayFormat {
    /// Parse and validate a format from JSON.
    ///
    /// ```rust
    /// use rpn_core::facade::DisplayFormat;
    ///
    /// let format = DisplayFormat::from_json(r#"{"group_thousands": true}"#).unwrap();
    /// assert_eq!(format.format_value(1234567.5), "1,234,567.5");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let format: DisplayFormat = serde_json::from_str(json)?;
        format.validate()?;
        Ok(format)
    }

    /// Check that the thresholds and digit count make sense.
    pub fn validate(&self) -> Result<(), BuildError> {
        let above = self.exponential_above;
        let below = self.exponential_below;
        let usable = |threshold: f64| threshold.is_finite() && threshold > 0.0;
        if !usable(above) || !usable(below) {
            return Err(BuildError::InvalidThreshold { above, below });
        }
        if below >= above {
            return Err(BuildError::ThresholdOrder { above, below });
        }
        if let Some(found) = self.max_fraction_digits {
            if found > MAX_FRACTION_DIGITS {
                return Err(BuildError::TooManyFractionDigits {
                    found,
                    max: MAX_FRACTION_DIGITS,
                });
            }
        }
        Ok(())
    }

    /// Format one value as display text.
    pub fn format_value(&self, value: CalcValue) -> String {
        if value == 0.0 {
            return "0".to_string();
        }
        if !value.is_finite() {
            return value.to_string();
        }

        let magnitude = value.abs();
        if magnitude >= self.exponential_above || magnitude < self.exponential_below {
            return self.exponential(value);
        }

        let text = match self.max_fraction_digits {
            Some(digits) => trim_fraction(&format!("{value:.digits$}")),
            None => value.to_string(),
        };
        let text = if text == "-0" { "0".to_string() } else { text };
        if self.group_thousands {
            group_thousands(&text)
        } else {
            text
        }
    }

    fn exponential(&self, value: CalcValue) -> String {
        match self.max_fraction_digits {
            Some(digits) => {
                let text = format!("{value:.digits$e}");
                match text.split_once('e') {
                    Some((mantissa, exponent)) => {
                        format!("{}e{exponent}", trim_fraction(mantissa))
                    }
                    None => text,
                }
            }
            None => format!("{value:e}"),
        }
    }
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Command, OperatorKey};

    #[test]
    fn default_format_prints_shortest_text() {
        let format = DisplayFormat::default();
        assert_eq!(format.format_value(7.0), "7");
        assert_eq!(format.format_value(-1.0), "-1");
        assert_eq!(format.format_value(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format.format_value(123456.789), "123456.789");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        let format = DisplayFormat::default();
        assert_eq!(format.format_value(-0.0), "0");

        let rounded = DisplayFormat {
            max_fraction_digits: Some(2),
            ..DisplayFormat::default()
        };
        assert_eq!(rounded.format_value(-0.001), "0");
    }

    #[test]
    fn large_and_tiny_values_use_exponent() {
        let format = DisplayFormat::default();
        assert_eq!(format.format_value(1e15), "1e15");
        assert_eq!(format.format_value(-2.5e20), "-2.5e20");
        assert_eq!(format.format_value(1.5e-8), "1.5e-8");
        assert_eq!(format.format_value(1e14), "100000000000000");
    }

    #[test]
    fn fraction_digits_round_and_trim() {
        let format = DisplayFormat {
            max_fraction_digits: Some(4),
            ..DisplayFormat::default()
        };
        assert_eq!(format.format_value(2.0 / 3.0), "0.6667");
        assert_eq!(format.format_value(1.5), "1.5");
        assert_eq!(format.format_value(3.0), "3");
        assert_eq!(format.format_value(1.234567e20), "1.2346e20");
    }

    #[test]
    fn thousands_grouping() {
        let format = DisplayFormat {
            group_thousands: true,
            ..DisplayFormat::default()
        };
        assert_eq!(format.format_value(999.0), "999");
        assert_eq!(format.format_value(1000.0), "1,000");
        assert_eq!(format.format_value(-1234567.25), "-1,234,567.25");
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        let format = DisplayFormat {
            exponential_above: f64::INFINITY,
            ..DisplayFormat::default()
        };
        assert!(matches!(format.validate(), Err(BuildError::InvalidThreshold { .. })));

        let format = DisplayFormat {
            exponential_above: 1e-9,
            ..DisplayFormat::default()
        };
        assert!(matches!(format.validate(), Err(BuildError::ThresholdOrder { .. })));
    }

    #[test]
    fn validate_rejects_too_many_digits() {
        let format = DisplayFormat {
            max_fraction_digits: Some(18),
            ..DisplayFormat::default()
        };
        assert!(matches!(
            format.validate(),
            Err(BuildError::TooManyFractionDigits { found: 18, max: 17 })
        ));
    }

    #[test]
    fn from_json_fills_defaults() {
        let format = DisplayFormat::from_json(r#"{"max_fraction_digits": 3}"#).unwrap();
        assert_eq!(format.max_fraction_digits, Some(3));
        assert_eq!(format.exponential_above, 1e15);

        assert!(matches!(
            DisplayFormat::from_json("not json"),
            Err(BuildError::Config(_))
        ));
        assert!(DisplayFormat::from_json(r#"{"exponential_below": 0}"#).is_err());
    }

    #[test]
    fn projection_lists_bottom_to_top() {
        let state = CalculatorState::new()
            .dispatch(&Command::enter("1"))
            .dispatch(&Command::enter("2"))
            .dispatch(&Command::operator(OperatorKey::Swap));
        let model = DisplayModel::project(&state, "3.", &DisplayFormat::default());

        assert_eq!(model.stack_lines, vec!["2", "1"]);
        assert_eq!(model.entry_line, "3.");
        assert_eq!(model.error, None);
    }

    #[test]
    fn projection_shows_placeholder_and_error() {
        let state = CalculatorState::new().dispatch(&Command::operator(OperatorKey::Add));
        let model = to_display_model(&state, &DisplayFormat::default());

        assert!(model.stack_lines.is_empty());
        assert_eq!(model.entry_line, "_");
        assert_eq!(model.error.as_deref(), Some("Need 2 value(s) on the stack"));
    }
}

//! Operator registry.
//!
//! Every operator is a pure function from a value stack to a new value stack
//! or a [`CalcError`]. The registry is a closed enumeration ([`OperatorKey`])
//! matched exhaustively in [`apply`], so adding a key without an
//! implementation is a compile error.

use super::error::CalcError;
use super::stack::Stack;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calculator value: an IEEE-754 double.
pub type CalcValue = f64;

/// Identifier of a stack operator.
///
/// Serialized using the operator's symbol (`"+"`, `"sqrt"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKey {
    #[serde(rename = "drop")]
    Drop,
    #[serde(rename = "swap")]
    Swap,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "square")]
    Square,
    #[serde(rename = "sqrt")]
    Sqrt,
    #[serde(rename = "sin")]
    Sin,
    #[serde(rename = "cos")]
    Cos,
    #[serde(rename = "tan")]
    Tan,
    #[serde(rename = "exp")]
    Exp,
    #[serde(rename = "ln")]
    Ln,
    #[serde(rename = "log10")]
    Log10,
}

impl OperatorKey {
    /// Every registered operator, in keypad order.
    pub const ALL: [OperatorKey; 14] = [
        Self::Drop,
        Self::Swap,
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Square,
        Self::Sqrt,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Exp,
        Self::Ln,
        Self::Log10,
    ];

    /// The symbol used on keypads and in the wire format.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Swap => "swap",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Square => "square",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
        }
    }

    /// How many values the operator consumes.
    pub fn arity(self) -> usize {
        match self {
            Self::Drop => 1,
            Self::Swap => 2,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide => 2,
            Self::Square
            | Self::Sqrt
            | Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::Exp
            | Self::Ln
            | Self::Log10 => 1,
        }
    }
}

impl fmt::Display for OperatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returned when text names no registered operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operator '{0}'")]
pub struct ParseOperatorError(pub String);

impl FromStr for OperatorKey {
    type Err = ParseOperatorError;

    /// Accepts symbols case-insensitively, plus the spelled-out arithmetic
    /// names (`add`, `sub`, `mul`, `div`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "add" => Some(Self::Add),
            "sub" => Some(Self::Subtract),
            "mul" => Some(Self::Multiply),
            "div" => Some(Self::Divide),
            _ => None,
        };
        alias
            .or_else(|| Self::ALL.into_iter().find(|key| key.symbol() == wanted))
            .ok_or_else(|| ParseOperatorError(s.to_string()))
    }
}

/// Apply the operator registered under `key` to `stack`.
///
/// On success the consumed operands are replaced by the result. On failure
/// the input stack is untouched and the caller keeps it.
///
/// # Example
///
/// ```rust
/// use rpn_core::core::{apply, CalcError, OperatorKey, Stack};
///
/// let stack: Stack<f64> = vec![2.0, 3.0].into_iter().collect();
/// let result = apply(OperatorKey::Subtract, &stack).unwrap();
/// assert_eq!(result.to_vec(), vec![-1.0]);
///
/// let empty = Stack::new();
/// assert_eq!(
///     apply(OperatorKey::Sqrt, &empty),
///     Err(CalcError::StackUnderflow { need: 1 })
/// );
/// ```
pub fn apply(key: OperatorKey, stack: &Stack<CalcValue>) -> Result<Stack<CalcValue>, CalcError> {
    match key {
        OperatorKey::Drop => drop_top(stack),
        OperatorKey::Swap => swap(stack),
        OperatorKey::Add => binary(stack, |a, b| a + b),
        OperatorKey::Subtract => binary(stack, |a, b| a - b),
        OperatorKey::Multiply => binary(stack, |a, b| a * b),
        OperatorKey::Divide => binary(stack, |a, b| a / b),
        OperatorKey::Square => unary(stack, |x| x * x),
        OperatorKey::Sqrt => unary(stack, f64::sqrt),
        OperatorKey::Sin => unary(stack, f64::sin),
        OperatorKey::Cos => unary(stack, f64::cos),
        OperatorKey::Tan => unary(stack, f64::tan),
        OperatorKey::Exp => unary(stack, f64::exp),
        OperatorKey::Ln => unary(stack, f64::ln),
        OperatorKey::Log10 => unary(stack, f64::log10),
    }
}

fn drop_top(stack: &Stack<CalcValue>) -> Result<Stack<CalcValue>, CalcError> {
    let (_, rest) = stack.pop().ok_or(CalcError::StackUnderflow { need: 1 })?;
    Ok(rest)
}

fn swap(stack: &Stack<CalcValue>) -> Result<Stack<CalcValue>, CalcError> {
    let (b, a, rest) = pop_two(stack)?;
    Ok(rest.push(b).push(a))
}

/// Pops `b` (top) and `a` (below it) and pushes `op(a, b)`.
fn binary<F>(stack: &Stack<CalcValue>, op: F) -> Result<Stack<CalcValue>, CalcError>
where
    F: Fn(CalcValue, CalcValue) -> CalcValue,
{
    let (b, a, rest) = pop_two(stack)?;
    let result = finite(op(a, b))?;
    Ok(rest.push(result))
}

fn unary<F>(stack: &Stack<CalcValue>, op: F) -> Result<Stack<CalcValue>, CalcError>
where
    F: Fn(CalcValue) -> CalcValue,
{
    let (x, rest) = stack.pop().ok_or(CalcError::StackUnderflow { need: 1 })?;
    let result = finite(op(*x))?;
    Ok(rest.push(result))
}

fn pop_two(
    stack: &Stack<CalcValue>,
) -> Result<(CalcValue, CalcValue, Stack<CalcValue>), CalcError> {
    let underflow = || CalcError::StackUnderflow { need: 2 };
    let (top, rest) = stack.pop().ok_or_else(underflow)?;
    let (second, rest) = rest.pop().ok_or_else(underflow)?;
    Ok((*top, *second, rest))
}

fn finite(value: CalcValue) -> Result<CalcValue, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::CalculationError)
    }
}

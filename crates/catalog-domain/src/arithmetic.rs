//! Binary arithmetic over integers keyed by an operator symbol.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("invalid operator: {0:?}")]
    InvalidOperator(String),
    #[error("arithmetic overflow")]
    Overflow,
}

/// Supported operators: `+`, `-`, `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub fn apply(self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        let result = match self {
            Self::Add => a.checked_add(b),
            Self::Subtract => a.checked_sub(b),
            Self::Multiply => a.checked_mul(b),
        };
        result.ok_or(ArithmeticError::Overflow)
    }
}

impl FromStr for Operator {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            other => Err(ArithmeticError::InvalidOperator(other.to_owned())),
        }
    }
}

/// Apply `op` to `a` and `b`.
///
/// Fails with [`ArithmeticError::InvalidOperator`] for anything other than
/// `+`, `-` or `*`.
pub fn operations(a: i64, b: i64, op: &str) -> Result<i64, ArithmeticError> {
    op.parse::<Operator>()?.apply(a, b)
}

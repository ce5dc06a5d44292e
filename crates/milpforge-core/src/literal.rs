//! Numeric literals that can be materialized as model constants.

use std::fmt;

use num_traits::ToPrimitive;

use crate::domain::Domain;

/// A numeric literal operand.
///
/// Literals never reach [`ModelVariable::operation`](crate::ModelVariable::operation)
/// directly; they are first turned into constant variables through
/// [`MilpModel::from_constant`](crate::MilpModel::from_constant).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Integer(i64),
    Real(f64),
}

impl Literal {
    /// The literal as a floating-point value.
    pub fn as_f64(self) -> f64 {
        match self {
            Literal::Integer(value) => value as f64,
            Literal::Real(value) => value,
        }
    }

    /// The literal as an integer, if it is integral and in range.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Literal::Integer(value) => Some(value),
            Literal::Real(value) if value.fract() == 0.0 => value.to_i64(),
            Literal::Real(_) => None,
        }
    }

    /// Returns true for integer literals.
    pub fn is_integer(self) -> bool {
        matches!(self, Literal::Integer(_))
    }

    /// The constant domain a model should assign to this literal.
    pub fn domain(self) -> Domain {
        match self {
            Literal::Integer(0 | 1) => Domain::BinaryConstantInteger,
            Literal::Integer(value) if value > 0 => Domain::PositiveOrZeroConstantInteger,
            Literal::Integer(_) => Domain::AnyConstantInteger,
            Literal::Real(value) if value >= 0.0 => Domain::PositiveOrZeroConstantReal,
            Literal::Real(_) => Domain::AnyConstantReal,
        }
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(i64::from(value))
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Literal::Real(f64::from(value))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Real(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Real(value) => write!(f, "{}", value),
        }
    }
}

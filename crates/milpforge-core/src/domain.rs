//! Domain tags for model variables.

use std::fmt;

/// The domain of a model variable.
///
/// Mirrors the tags of MILP model builders: integer or real, signed or
/// non-negative, binary, and whether the value is a known constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    #[default]
    AnyInteger,
    AnyReal,
    PositiveOrZeroInteger,
    PositiveOrZeroReal,
    BinaryInteger,
    AnyConstantInteger,
    AnyConstantReal,
    PositiveOrZeroConstantInteger,
    PositiveOrZeroConstantReal,
    BinaryConstantInteger,
}

impl Domain {
    /// Returns true if the variable holds a known constant.
    pub fn is_constant(self) -> bool {
        matches!(
            self,
            Domain::AnyConstantInteger
                | Domain::AnyConstantReal
                | Domain::PositiveOrZeroConstantInteger
                | Domain::PositiveOrZeroConstantReal
                | Domain::BinaryConstantInteger
        )
    }

    /// Returns true for integer-valued domains (binary included).
    pub fn is_integer(self) -> bool {
        !matches!(
            self,
            Domain::AnyReal
                | Domain::PositiveOrZeroReal
                | Domain::AnyConstantReal
                | Domain::PositiveOrZeroConstantReal
        )
    }

    /// Returns true for 0/1 domains.
    pub fn is_binary(self) -> bool {
        matches!(self, Domain::BinaryInteger | Domain::BinaryConstantInteger)
    }

    /// Returns true if every value in the domain is non-negative.
    pub fn is_non_negative(self) -> bool {
        !matches!(
            self,
            Domain::AnyInteger | Domain::AnyReal | Domain::AnyConstantInteger | Domain::AnyConstantReal
        )
    }

    /// The constant counterpart of this domain.
    pub fn to_constant(self) -> Domain {
        match self {
            Domain::AnyInteger => Domain::AnyConstantInteger,
            Domain::AnyReal => Domain::AnyConstantReal,
            Domain::PositiveOrZeroInteger => Domain::PositiveOrZeroConstantInteger,
            Domain::PositiveOrZeroReal => Domain::PositiveOrZeroConstantReal,
            Domain::BinaryInteger => Domain::BinaryConstantInteger,
            constant => constant,
        }
    }

    /// The non-constant counterpart of this domain.
    pub fn to_variable(self) -> Domain {
        match self {
            Domain::AnyConstantInteger => Domain::AnyInteger,
            Domain::AnyConstantReal => Domain::AnyReal,
            Domain::PositiveOrZeroConstantInteger => Domain::PositiveOrZeroInteger,
            Domain::PositiveOrZeroConstantReal => Domain::PositiveOrZeroReal,
            Domain::BinaryConstantInteger => Domain::BinaryInteger,
            variable => variable,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_round_trip() {
        for domain in [
            Domain::AnyInteger,
            Domain::AnyReal,
            Domain::PositiveOrZeroInteger,
            Domain::PositiveOrZeroReal,
            Domain::BinaryInteger,
        ] {
            assert!(!domain.is_constant());
            assert!(domain.to_constant().is_constant());
            assert_eq!(domain.to_constant().to_variable(), domain);
        }
    }

    #[test]
    fn test_classification() {
        assert!(Domain::BinaryInteger.is_integer());
        assert!(Domain::BinaryInteger.is_binary());
        assert!(Domain::BinaryInteger.is_non_negative());
        assert!(!Domain::AnyReal.is_integer());
        assert!(!Domain::AnyConstantInteger.is_non_negative());
        assert!(Domain::PositiveOrZeroConstantReal.is_non_negative());
    }
}

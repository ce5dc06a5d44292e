//! Operation kinds and the operator dispatch table.
//!
//! Every infix operator exposed by the facade resolves to exactly one
//! [`OperationKind`] through [`BinaryOperator::kind`] (or
//! [`UnaryOperator::kind`] for prefix operators). The table is pure data.

use std::fmt;

/// An operation the model builder knows how to apply to variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum OperationKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
    ExclusiveDisjunction,
    Disjunction,
    Conjunction,
    IsLessThan,
    IsGreaterThan,
    IsLessOrEqual,
    IsGreaterOrEqual,
    IsEqual,
    IsNotEqual,
    /// Arithmetic negation (`-x`).
    Negation,
    /// Logical negation of a binary variable (`!x`).
    BinaryNegation,
}

impl OperationKind {
    /// All operation kinds, in declaration order.
    pub const ALL: [OperationKind; 16] = [
        OperationKind::Addition,
        OperationKind::Subtraction,
        OperationKind::Multiplication,
        OperationKind::Division,
        OperationKind::Remainder,
        OperationKind::ExclusiveDisjunction,
        OperationKind::Disjunction,
        OperationKind::Conjunction,
        OperationKind::IsLessThan,
        OperationKind::IsGreaterThan,
        OperationKind::IsLessOrEqual,
        OperationKind::IsGreaterOrEqual,
        OperationKind::IsEqual,
        OperationKind::IsNotEqual,
        OperationKind::Negation,
        OperationKind::BinaryNegation,
    ];

    /// Returns the canonical name of this operation kind.
    pub const fn name(self) -> &'static str {
        match self {
            OperationKind::Addition => "Addition",
            OperationKind::Subtraction => "Subtraction",
            OperationKind::Multiplication => "Multiplication",
            OperationKind::Division => "Division",
            OperationKind::Remainder => "Remainder",
            OperationKind::ExclusiveDisjunction => "ExclusiveDisjunction",
            OperationKind::Disjunction => "Disjunction",
            OperationKind::Conjunction => "Conjunction",
            OperationKind::IsLessThan => "IsLessThan",
            OperationKind::IsGreaterThan => "IsGreaterThan",
            OperationKind::IsLessOrEqual => "IsLessOrEqual",
            OperationKind::IsGreaterOrEqual => "IsGreaterOrEqual",
            OperationKind::IsEqual => "IsEqual",
            OperationKind::IsNotEqual => "IsNotEqual",
            OperationKind::Negation => "Negation",
            OperationKind::BinaryNegation => "BinaryNegation",
        }
    }

    /// Number of operands expected besides the receiving variable.
    pub const fn operand_count(self) -> usize {
        match self {
            OperationKind::Negation | OperationKind::BinaryNegation => 0,
            _ => 1,
        }
    }

    /// Returns true for the six relational kinds.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            OperationKind::IsLessThan
                | OperationKind::IsGreaterThan
                | OperationKind::IsLessOrEqual
                | OperationKind::IsGreaterOrEqual
                | OperationKind::IsEqual
                | OperationKind::IsNotEqual
        )
    }

    /// Returns true for the boolean connectives over binary variables.
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            OperationKind::ExclusiveDisjunction
                | OperationKind::Disjunction
                | OperationKind::Conjunction
                | OperationKind::BinaryNegation
        )
    }

    /// Returns true for the arithmetic kinds.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            OperationKind::Addition
                | OperationKind::Subtraction
                | OperationKind::Multiplication
                | OperationKind::Division
                | OperationKind::Remainder
                | OperationKind::Negation
        )
    }

    /// The binary operator mapped to this kind, if any.
    pub fn binary_operator(self) -> Option<BinaryOperator> {
        BinaryOperator::ALL.into_iter().find(|op| op.kind() == self)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A binary infix operator of the facade surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitXor,
    BitOr,
    BitAnd,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl BinaryOperator {
    /// All binary operators, in table order.
    pub const ALL: [BinaryOperator; 14] = [
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Mul,
        BinaryOperator::Div,
        BinaryOperator::Rem,
        BinaryOperator::BitXor,
        BinaryOperator::BitOr,
        BinaryOperator::BitAnd,
        BinaryOperator::Lt,
        BinaryOperator::Gt,
        BinaryOperator::Le,
        BinaryOperator::Ge,
        BinaryOperator::Eq,
        BinaryOperator::Ne,
    ];

    /// The operation kind this operator dispatches to.
    pub const fn kind(self) -> OperationKind {
        match self {
            BinaryOperator::Add => OperationKind::Addition,
            BinaryOperator::Sub => OperationKind::Subtraction,
            BinaryOperator::Mul => OperationKind::Multiplication,
            BinaryOperator::Div => OperationKind::Division,
            BinaryOperator::Rem => OperationKind::Remainder,
            BinaryOperator::BitXor => OperationKind::ExclusiveDisjunction,
            BinaryOperator::BitOr => OperationKind::Disjunction,
            BinaryOperator::BitAnd => OperationKind::Conjunction,
            BinaryOperator::Lt => OperationKind::IsLessThan,
            BinaryOperator::Gt => OperationKind::IsGreaterThan,
            BinaryOperator::Le => OperationKind::IsLessOrEqual,
            BinaryOperator::Ge => OperationKind::IsGreaterOrEqual,
            BinaryOperator::Eq => OperationKind::IsEqual,
            BinaryOperator::Ne => OperationKind::IsNotEqual,
        }
    }

    /// The source symbol of this operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Rem => "%",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Le => "<=",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
        }
    }

    /// Looks up an operator by its source symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Equality operators reject an absent left-hand operand.
    pub const fn requires_left_operand(self) -> bool {
        matches!(self, BinaryOperator::Eq | BinaryOperator::Ne)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A prefix operator of the facade surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    Neg,
    Not,
}

impl UnaryOperator {
    /// The operation kind this operator dispatches to.
    pub const fn kind(self) -> OperationKind {
        match self {
            UnaryOperator::Neg => OperationKind::Negation,
            UnaryOperator::Not => OperationKind::BinaryNegation,
        }
    }

    /// The source symbol of this operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Neg => "-",
            UnaryOperator::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

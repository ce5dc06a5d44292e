//! The operator surface.
//!
//! Every operator is a thin layer over [`VariableWrapper::apply`] (or
//! [`VariableWrapper::apply_unary`]), which issues exactly one
//! `operation` call on the underlying variable, preceded by one
//! `from_constant` call when the operand is a literal.
//!
//! Arithmetic and logical operators use `std::ops`:
//!
//! | Operator | Kind |
//! |---|---|
//! | `a + b` | `Addition` |
//! | `a - b` | `Subtraction` |
//! | `a * b` | `Multiplication` |
//! | `a / b` | `Division` |
//! | `a % b` | `Remainder` |
//! | `a ^ b` | `ExclusiveDisjunction` |
//! | `a \| b` | `Disjunction` |
//! | `a & b` | `Conjunction` |
//! | `-a` | `Negation` |
//! | `!a` | `BinaryNegation` |
//!
//! Relational operators are named methods, since `PartialOrd` and
//! `PartialEq` must return `bool`: [`VariableWrapper::is_less_than`],
//! [`VariableWrapper::is_greater_than`], [`VariableWrapper::is_less_or_equal`],
//! [`VariableWrapper::is_greater_or_equal`], [`VariableWrapper::is_equal`] and
//! [`VariableWrapper::is_not_equal`].

use tracing::trace;

use milpforge_core::{
    BinaryOperator, Literal, MilpForgeError, OperationKind, Result, UnaryOperator, VariableRef,
};

use crate::operand::Operand;
use crate::proxy::{CapabilityProxy, Wrapped};
use crate::wrapper::VariableWrapper;

impl VariableWrapper {
    /// Applies `op` with `self` on the left.
    ///
    /// # Errors
    ///
    /// Propagates any error of `from_constant` or `operation` unchanged.
    pub fn apply(&self, op: BinaryOperator, rhs: impl Into<Operand>) -> Result<VariableWrapper> {
        let operand = rhs.into();
        let operand_kind = operand.kind_name();
        let operand = operand.into_variable(self.variable.model().as_ref())?;
        self.trace_dispatch(op.symbol(), op.kind(), operand_kind);
        self.dispatch(&self.variable, op.kind(), &[operand])
    }

    /// Applies `op` with `lhs` on the left and `self` on the right.
    ///
    /// The literal is materialized through this variable's model.
    pub fn apply_reversed(&self, op: BinaryOperator, lhs: impl Into<Literal>) -> Result<VariableWrapper> {
        let lhs = lhs.into();
        let constant = self.variable.model().from_constant(lhs)?;
        let operand_kind = Operand::Literal(lhs).kind_name();
        self.trace_dispatch(op.symbol(), op.kind(), operand_kind);
        self.dispatch(&constant, op.kind(), &[self.variable.clone()])
    }

    /// Applies a prefix operator.
    pub fn apply_unary(&self, op: UnaryOperator) -> Result<VariableWrapper> {
        self.trace_dispatch(op.symbol(), op.kind(), "none");
        self.dispatch(&self.variable, op.kind(), &[])
    }

    fn dispatch(
        &self,
        receiver: &VariableRef,
        kind: OperationKind,
        operands: &[VariableRef],
    ) -> Result<VariableWrapper> {
        let result = receiver.operation(kind, operands)?;
        Ok(self.derive(result))
    }

    fn trace_dispatch(&self, operator: &'static str, kind: OperationKind, operand: &'static str) {
        if self.trace {
            trace!(
                event = "dispatch",
                operator = operator,
                kind = %kind,
                operand = operand,
                receiver = %self.variable.name(),
            );
        }
    }

    /// `self < rhs`
    pub fn is_less_than(&self, rhs: impl Into<Operand>) -> Result<VariableWrapper> {
        self.apply(BinaryOperator::Lt, rhs)
    }

    /// `self > rhs`
    pub fn is_greater_than(&self, rhs: impl Into<Operand>) -> Result<VariableWrapper> {
        self.apply(BinaryOperator::Gt, rhs)
    }

    /// `self <= rhs`
    pub fn is_less_or_equal(&self, rhs: impl Into<Operand>) -> Result<VariableWrapper> {
        self.apply(BinaryOperator::Le, rhs)
    }

    /// `self >= rhs`
    pub fn is_greater_or_equal(&self, rhs: impl Into<Operand>) -> Result<VariableWrapper> {
        self.apply(BinaryOperator::Ge, rhs)
    }

    /// `self == rhs`, as a model expression.
    pub fn is_equal(&self, rhs: impl Into<Operand>) -> Result<VariableWrapper> {
        self.apply(BinaryOperator::Eq, rhs)
    }

    /// `self != rhs`, as a model expression.
    pub fn is_not_equal(&self, rhs: impl Into<Operand>) -> Result<VariableWrapper> {
        self.apply(BinaryOperator::Ne, rhs)
    }
}

/// `lhs == rhs` with a possibly absent left operand.
///
/// # Errors
///
/// Returns [`MilpForgeError::InvalidArgument`] without calling the model if
/// `lhs` is `None`.
pub fn is_equal(lhs: Option<&VariableWrapper>, rhs: impl Into<Operand>) -> Result<VariableWrapper> {
    apply_guarded(BinaryOperator::Eq, lhs, rhs.into())
}

/// `lhs != rhs` with a possibly absent left operand.
///
/// # Errors
///
/// Returns [`MilpForgeError::InvalidArgument`] without calling the model if
/// `lhs` is `None`.
pub fn is_not_equal(
    lhs: Option<&VariableWrapper>,
    rhs: impl Into<Operand>,
) -> Result<VariableWrapper> {
    apply_guarded(BinaryOperator::Ne, lhs, rhs.into())
}

fn apply_guarded(
    op: BinaryOperator,
    lhs: Option<&VariableWrapper>,
    rhs: Operand,
) -> Result<VariableWrapper> {
    match lhs {
        Some(lhs) => lhs.apply(op, rhs),
        None => Err(MilpForgeError::invalid_argument(format!(
            "left operand of `{}` is absent",
            op
        ))),
    }
}

/// Generates the `std::ops` binary and unary operators for a left-hand
/// facade type.
///
/// # Usage
/// ```ignore
/// impl_facade_ops!(VariableWrapper, &VariableWrapper);
/// ```
macro_rules! impl_facade_ops {
    ($($lhs:ty),+) => {
        $(
            impl_facade_ops!(@binary $lhs, Add, add, BinaryOperator::Add);
            impl_facade_ops!(@binary $lhs, Sub, sub, BinaryOperator::Sub);
            impl_facade_ops!(@binary $lhs, Mul, mul, BinaryOperator::Mul);
            impl_facade_ops!(@binary $lhs, Div, div, BinaryOperator::Div);
            impl_facade_ops!(@binary $lhs, Rem, rem, BinaryOperator::Rem);
            impl_facade_ops!(@binary $lhs, BitXor, bitxor, BinaryOperator::BitXor);
            impl_facade_ops!(@binary $lhs, BitOr, bitor, BinaryOperator::BitOr);
            impl_facade_ops!(@binary $lhs, BitAnd, bitand, BinaryOperator::BitAnd);
            impl_facade_ops!(@unary $lhs, Neg, neg, UnaryOperator::Neg);
            impl_facade_ops!(@unary $lhs, Not, not, UnaryOperator::Not);
        )+
    };
    (@binary $lhs:ty, $trait:ident, $method:ident, $op:expr) => {
        impl<R: Into<Operand>> std::ops::$trait<R> for $lhs {
            type Output = Result<VariableWrapper>;

            fn $method(self, rhs: R) -> Self::Output {
                self.apply($op, rhs)
            }
        }
    };
    (@unary $lhs:ty, $trait:ident, $method:ident, $op:expr) => {
        impl std::ops::$trait for $lhs {
            type Output = Result<VariableWrapper>;

            fn $method(self) -> Self::Output {
                self.apply_unary($op)
            }
        }
    };
}

impl_facade_ops!(
    VariableWrapper,
    &VariableWrapper,
    CapabilityProxy,
    &CapabilityProxy,
    Wrapped,
    &Wrapped
);

/// Generates the `std::ops` binary operators with a literal on the left.
///
/// # Usage
/// ```ignore
/// impl_literal_ops!(i32 => VariableWrapper, &VariableWrapper);
/// ```
macro_rules! impl_literal_ops {
    ($lit:ty => $($rhs:ty),+) => {
        $(
            impl_literal_ops!(@binary $lit, $rhs, Add, add, BinaryOperator::Add);
            impl_literal_ops!(@binary $lit, $rhs, Sub, sub, BinaryOperator::Sub);
            impl_literal_ops!(@binary $lit, $rhs, Mul, mul, BinaryOperator::Mul);
            impl_literal_ops!(@binary $lit, $rhs, Div, div, BinaryOperator::Div);
            impl_literal_ops!(@binary $lit, $rhs, Rem, rem, BinaryOperator::Rem);
            impl_literal_ops!(@binary $lit, $rhs, BitXor, bitxor, BinaryOperator::BitXor);
            impl_literal_ops!(@binary $lit, $rhs, BitOr, bitor, BinaryOperator::BitOr);
            impl_literal_ops!(@binary $lit, $rhs, BitAnd, bitand, BinaryOperator::BitAnd);
        )+
    };
    (@binary $lit:ty, $rhs:ty, $trait:ident, $method:ident, $op:expr) => {
        impl std::ops::$trait<$rhs> for $lit {
            type Output = Result<VariableWrapper>;

            fn $method(self, rhs: $rhs) -> Self::Output {
                rhs.apply_reversed($op, self)
            }
        }
    };
}

impl_literal_ops!(i32 => VariableWrapper, &VariableWrapper, CapabilityProxy, &CapabilityProxy, Wrapped, &Wrapped);
impl_literal_ops!(f64 => VariableWrapper, &VariableWrapper, CapabilityProxy, &CapabilityProxy, Wrapped, &Wrapped);

#[cfg(test)]
#[path = "ops_tests.rs"]
mod tests;

//! Right-hand operands of the operator surface.

use std::sync::Arc;

use milpforge_core::{Literal, MilpModel, Result, VariableRef};

use crate::proxy::{CapabilityProxy, Wrapped};
use crate::wrapper::VariableWrapper;

/// Any value accepted on the right-hand side of an operator.
///
/// Facades contribute their underlying variable; literals are turned into
/// constants of the left operand's model before dispatch.
#[derive(Debug, Clone)]
pub enum Operand {
    Variable(VariableRef),
    Literal(Literal),
}

impl Operand {
    /// Short label used in dispatch events.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operand::Variable(_) => "variable",
            Operand::Literal(Literal::Integer(_)) => "integer",
            Operand::Literal(Literal::Real(_)) => "real",
        }
    }

    /// Resolves the operand to a model variable, materializing literals
    /// through `model`.
    pub fn into_variable(self, model: &dyn MilpModel) -> Result<VariableRef> {
        match self {
            Operand::Variable(variable) => Ok(variable),
            Operand::Literal(literal) => model.from_constant(literal),
        }
    }
}

impl From<VariableRef> for Operand {
    fn from(variable: VariableRef) -> Self {
        Operand::Variable(variable)
    }
}

impl From<&VariableRef> for Operand {
    fn from(variable: &VariableRef) -> Self {
        Operand::Variable(Arc::clone(variable))
    }
}

impl From<VariableWrapper> for Operand {
    fn from(wrapper: VariableWrapper) -> Self {
        Operand::Variable(wrapper.variable)
    }
}

impl From<&VariableWrapper> for Operand {
    fn from(wrapper: &VariableWrapper) -> Self {
        Operand::Variable(wrapper.unwrap())
    }
}

impl From<CapabilityProxy> for Operand {
    fn from(proxy: CapabilityProxy) -> Self {
        Operand::Variable(proxy.unwrap())
    }
}

impl From<&CapabilityProxy> for Operand {
    fn from(proxy: &CapabilityProxy) -> Self {
        Operand::Variable(proxy.unwrap())
    }
}

impl From<Wrapped> for Operand {
    fn from(wrapped: Wrapped) -> Self {
        Operand::Variable(wrapped.unwrap())
    }
}

impl From<&Wrapped> for Operand {
    fn from(wrapped: &Wrapped) -> Self {
        Operand::Variable(wrapped.unwrap())
    }
}

impl From<Literal> for Operand {
    fn from(literal: Literal) -> Self {
        Operand::Literal(literal)
    }
}

macro_rules! impl_literal_operand {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Operand {
                fn from(value: $t) -> Self {
                    Operand::Literal(Literal::from(value))
                }
            }
        )+
    };
}

impl_literal_operand!(i32, i64, f32, f64);

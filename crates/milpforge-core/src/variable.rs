//! The model variable contract consumed by the facade.
//!
//! A model builder owns its variables; the facade only ever holds shared
//! references to them ([`VariableRef`]) and talks to them through this
//! trait. All accessors take `&self`: setters mutate the shared instance
//! and the implementation is responsible for its own synchronization.

use std::any::Any;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::capability::CapabilitySet;
use crate::domain::Domain;
use crate::error::Result;
use crate::literal::Literal;
use crate::operation::OperationKind;

/// Shared handle to a model variable.
pub type VariableRef = Arc<dyn ModelVariable>;

/// Shared handle to a model builder.
pub type ModelRef = Arc<dyn MilpModel>;

/// The owning model of a set of variables.
pub trait MilpModel: Send + Sync + Debug {
    /// Materializes a literal as a constant variable bound to this model.
    ///
    /// Implementations may allocate a fresh node on every call.
    fn from_constant(&self, literal: Literal) -> Result<VariableRef>;
}

/// A node in an optimization model: a variable, constant or expression.
pub trait ModelVariable: Send + Sync + Debug + 'static {
    /// Identifier of the variable.
    fn name(&self) -> String;

    fn set_name(&self, name: String) -> Result<()>;

    /// Domain tag of the variable.
    fn domain(&self) -> Domain;

    fn set_domain(&self, domain: Domain) -> Result<()>;

    /// Known constant value, if the variable is a constant.
    fn constant_value(&self) -> Option<f64>;

    fn set_constant_value(&self, value: Option<f64>) -> Result<()>;

    /// Human-readable expression text.
    fn expression(&self) -> String;

    fn set_expression(&self, expression: String) -> Result<()>;

    /// The model this variable belongs to.
    fn model(&self) -> ModelRef;

    fn set_model(&self, model: ModelRef) -> Result<()>;

    /// Applies `kind` to this variable and `operands`, returning a freshly
    /// constructed result variable. Operands are never mutated.
    fn operation(&self, kind: OperationKind, operands: &[VariableRef]) -> Result<VariableRef>;

    /// Equality contract of the variable.
    ///
    /// `other` may be a forwarding wrapper; see [`innermost`].
    fn variable_eq(&self, other: &dyn ModelVariable) -> bool;

    /// Hash consistent with [`ModelVariable::variable_eq`].
    fn hash_code(&self) -> u64;

    /// Extended capabilities beyond this contract.
    ///
    /// Returned handles must point at this same instance.
    fn capabilities(self: Arc<Self>) -> CapabilitySet {
        CapabilitySet::new()
    }

    /// The variable this one forwards to, for wrappers.
    fn wrapped_variable(&self) -> Option<VariableRef> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

impl PartialEq for dyn ModelVariable {
    fn eq(&self, other: &Self) -> bool {
        self.variable_eq(other)
    }
}

impl Eq for dyn ModelVariable {}

impl Hash for dyn ModelVariable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

/// Follows [`ModelVariable::wrapped_variable`] until a variable that does
/// not forward is reached.
pub fn innermost(variable: &VariableRef) -> VariableRef {
    let mut current = variable.clone();
    while let Some(inner) = current.wrapped_variable() {
        current = inner;
    }
    current
}

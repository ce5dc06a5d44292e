//! The facade over a single model variable.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use milpforge_core::{
    innermost, CapabilitySet, Domain, MilpForgeError, ModelRef, ModelVariable, OperationKind,
    Result, VariableRef,
};

/// Generates the forwarding members of a [`ModelVariable`] impl.
///
/// Intended to be used *inside* an `impl ModelVariable for Type { ... }`
/// block. Every member except `capabilities`, `wrapped_variable` and
/// `as_any` forwards to the variable reached through the given field path.
///
/// # Usage
/// ```ignore
/// impl ModelVariable for VariableWrapper {
///     forward_variable_members!(variable);
///     // capabilities, wrapped_variable, as_any
/// }
/// ```
macro_rules! forward_variable_members {
    ($($field:ident).+) => {
        fn name(&self) -> String {
            self.$($field).+.name()
        }

        fn set_name(&self, name: String) -> Result<()> {
            self.$($field).+.set_name(name)
        }

        fn domain(&self) -> Domain {
            self.$($field).+.domain()
        }

        fn set_domain(&self, domain: Domain) -> Result<()> {
            self.$($field).+.set_domain(domain)
        }

        fn constant_value(&self) -> Option<f64> {
            self.$($field).+.constant_value()
        }

        fn set_constant_value(&self, value: Option<f64>) -> Result<()> {
            self.$($field).+.set_constant_value(value)
        }

        fn expression(&self) -> String {
            self.$($field).+.expression()
        }

        fn set_expression(&self, expression: String) -> Result<()> {
            self.$($field).+.set_expression(expression)
        }

        fn model(&self) -> ModelRef {
            self.$($field).+.model()
        }

        fn set_model(&self, model: ModelRef) -> Result<()> {
            self.$($field).+.set_model(model)
        }

        fn operation(&self, kind: OperationKind, operands: &[VariableRef]) -> Result<VariableRef> {
            self.$($field).+.operation(kind, operands)
        }

        fn variable_eq(&self, other: &dyn ModelVariable) -> bool {
            self.$($field).+.variable_eq(other)
        }

        fn hash_code(&self) -> u64 {
            self.$($field).+.hash_code()
        }
    };
}

pub(crate) use forward_variable_members;

/// Operator facade over one model variable.
///
/// The facade never stores another facade: constructing one from a
/// [`VariableRef`] that is itself a facade (or a
/// [`CapabilityProxy`](crate::CapabilityProxy)) keeps the innermost model
/// variable. Every accessor forwards to the shared underlying instance, so
/// mutations through one facade are visible through all of them.
///
/// # Examples
///
/// ```
/// use milpforge_core::{Domain, VariableRef};
/// use milpforge_test::RecordingModel;
/// use milpforge_wrapper::VariableWrapper;
///
/// let model = RecordingModel::new("m");
/// let x: VariableRef = model.variable("x", Domain::AnyInteger);
///
/// let once = VariableWrapper::new(x.clone());
/// let twice = VariableWrapper::new(std::sync::Arc::new(once.clone()));
/// assert_eq!(twice, once);
/// assert!(std::sync::Arc::ptr_eq(twice.wrapped(), &x));
/// ```
#[derive(Clone)]
pub struct VariableWrapper {
    pub(crate) variable: VariableRef,
    pub(crate) trace: bool,
}

impl VariableWrapper {
    /// Wraps `variable`, flattening any forwarding layers.
    pub fn new(variable: VariableRef) -> Self {
        Self {
            variable: innermost(&variable),
            trace: true,
        }
    }

    /// Wraps an optional variable.
    ///
    /// # Errors
    ///
    /// Returns [`MilpForgeError::InvalidArgument`] if `variable` is `None`.
    pub fn try_new(variable: Option<VariableRef>) -> Result<Self> {
        variable
            .map(Self::new)
            .ok_or_else(|| MilpForgeError::invalid_argument("cannot wrap an absent variable"))
    }

    /// Wraps every variable of `variables`.
    pub fn wrap_all<I>(variables: I) -> Vec<Self>
    where
        I: IntoIterator<Item = VariableRef>,
    {
        variables.into_iter().map(Self::new).collect()
    }

    /// Result facades inherit the dispatch tracing of their left operand.
    pub(crate) fn derive(&self, variable: VariableRef) -> Self {
        Self {
            variable: innermost(&variable),
            trace: self.trace,
        }
    }

    pub(crate) fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// The underlying model variable.
    pub fn unwrap(&self) -> VariableRef {
        self.variable.clone()
    }

    /// Borrows the underlying model variable.
    pub fn wrapped(&self) -> &VariableRef {
        &self.variable
    }

    /// Hash of the underlying variable.
    pub fn hash_code(&self) -> u64 {
        self.variable.hash_code()
    }

    pub fn name(&self) -> String {
        self.variable.name()
    }

    pub fn set_name(&self, name: impl Into<String>) -> Result<()> {
        self.variable.set_name(name.into())
    }

    pub fn domain(&self) -> Domain {
        self.variable.domain()
    }

    pub fn set_domain(&self, domain: Domain) -> Result<()> {
        self.variable.set_domain(domain)
    }

    pub fn constant_value(&self) -> Option<f64> {
        self.variable.constant_value()
    }

    pub fn set_constant_value(&self, value: Option<f64>) -> Result<()> {
        self.variable.set_constant_value(value)
    }

    pub fn expression(&self) -> String {
        self.variable.expression()
    }

    pub fn set_expression(&self, expression: impl Into<String>) -> Result<()> {
        self.variable.set_expression(expression.into())
    }

    pub fn model(&self) -> ModelRef {
        self.variable.model()
    }

    pub fn set_model(&self, model: ModelRef) -> Result<()> {
        self.variable.set_model(model)
    }
}

impl From<VariableRef> for VariableWrapper {
    fn from(variable: VariableRef) -> Self {
        Self::new(variable)
    }
}

impl PartialEq for VariableWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.variable.variable_eq(other.variable.as_ref())
    }
}

impl Eq for VariableWrapper {}

impl Hash for VariableWrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Debug for VariableWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VariableWrapper").field(&self.variable).finish()
    }
}

impl fmt::Display for VariableWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

impl ModelVariable for VariableWrapper {
    forward_variable_members!(variable);

    fn capabilities(self: Arc<Self>) -> CapabilitySet {
        self.variable.clone().capabilities()
    }

    fn wrapped_variable(&self) -> Option<VariableRef> {
        Some(self.variable.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//! A variable with extended capabilities.
//!
//! [`VectorVariable`] behaves like a plain recording variable for the base
//! contract and additionally reports two capabilities:
//!
//! - `indexed_access` ([`IndexedAccess`]): element lookup by position
//! - `bounds` ([`Bounds`]): mutable lower/upper bounds

use std::any::Any;
use std::sync::{Arc, PoisonError, RwLock};

use milpforge_core::{
    Capability, CapabilitySet, Domain, MilpForgeError, ModelRef, ModelVariable, OperationKind,
    Result, Value, VariableRef,
};

use crate::variable::RecordingVariable;

/// Positional access to the elements of a vector-shaped variable.
pub trait IndexedAccess: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, index: usize) -> Result<VariableRef>;
}

/// Lower and upper bounds of a variable.
pub trait Bounds: Send + Sync {
    fn lower_bound(&self) -> Option<f64>;

    fn upper_bound(&self) -> Option<f64>;

    fn set_bounds(&self, lower: Option<f64>, upper: Option<f64>) -> Result<()>;
}

/// Capability name of [`IndexedAccess`].
pub const INDEXED_ACCESS: &str = "indexed_access";

/// Capability name of [`Bounds`].
pub const BOUNDS: &str = "bounds";

#[derive(Debug, Default, Clone, Copy)]
struct BoundsState {
    lower: Option<f64>,
    upper: Option<f64>,
}

/// A vector-shaped variable reporting [`IndexedAccess`] and [`Bounds`].
#[derive(Debug)]
pub struct VectorVariable {
    base: Arc<RecordingVariable>,
    elements: Vec<VariableRef>,
    bounds: RwLock<BoundsState>,
}

impl VectorVariable {
    pub(crate) fn new(base: Arc<RecordingVariable>, elements: Vec<VariableRef>) -> Self {
        Self {
            base,
            elements,
            bounds: RwLock::new(BoundsState::default()),
        }
    }

    /// The plain variable carrying the base contract state.
    pub fn base(&self) -> &RecordingVariable {
        &self.base
    }
}

impl IndexedAccess for VectorVariable {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn element(&self, index: usize) -> Result<VariableRef> {
        self.elements.get(index).cloned().ok_or_else(|| {
            MilpForgeError::invalid_argument(format!(
                "index {} out of range for `{}` of length {}",
                index,
                self.base.name(),
                self.elements.len()
            ))
        })
    }
}

impl Bounds for VectorVariable {
    fn lower_bound(&self) -> Option<f64> {
        self.bounds.read().unwrap_or_else(PoisonError::into_inner).lower
    }

    fn upper_bound(&self) -> Option<f64> {
        self.bounds.read().unwrap_or_else(PoisonError::into_inner).upper
    }

    fn set_bounds(&self, lower: Option<f64>, upper: Option<f64>) -> Result<()> {
        if let (Some(lower), Some(upper)) = (lower, upper) {
            if lower > upper {
                return Err(MilpForgeError::DomainMismatch(format!(
                    "lower bound {} exceeds upper bound {}",
                    lower, upper
                )));
            }
        }
        *self.bounds.write().unwrap_or_else(PoisonError::into_inner) = BoundsState { lower, upper };
        Ok(())
    }
}

fn index_argument(args: &[Value]) -> Result<usize> {
    match args {
        [Value::Integer(index)] if *index >= 0 => Ok(*index as usize),
        _ => Err(MilpForgeError::invalid_argument(
            "element expects one non-negative integer",
        )),
    }
}

fn bound_argument(value: &Value) -> Result<Option<f64>> {
    match value {
        Value::Unit => Ok(None),
        other => other.as_real().map(Some).ok_or_else(|| {
            MilpForgeError::invalid_argument(format!(
                "bound must be numeric or unit, got {}",
                other.type_name()
            ))
        }),
    }
}

impl ModelVariable for VectorVariable {
    fn name(&self) -> String {
        self.base.name()
    }

    fn set_name(&self, name: String) -> Result<()> {
        self.base.set_name(name)
    }

    fn domain(&self) -> Domain {
        self.base.domain()
    }

    fn set_domain(&self, domain: Domain) -> Result<()> {
        self.base.set_domain(domain)
    }

    fn constant_value(&self) -> Option<f64> {
        self.base.constant_value()
    }

    fn set_constant_value(&self, value: Option<f64>) -> Result<()> {
        self.base.set_constant_value(value)
    }

    fn expression(&self) -> String {
        self.base.expression()
    }

    fn set_expression(&self, expression: String) -> Result<()> {
        self.base.set_expression(expression)
    }

    fn model(&self) -> ModelRef {
        self.base.model()
    }

    fn set_model(&self, model: ModelRef) -> Result<()> {
        self.base.set_model(model)
    }

    fn operation(&self, kind: OperationKind, operands: &[VariableRef]) -> Result<VariableRef> {
        self.base.operation(kind, operands)
    }

    fn variable_eq(&self, other: &dyn ModelVariable) -> bool {
        self.base.variable_eq(other)
    }

    fn hash_code(&self) -> u64 {
        self.base.hash_code()
    }

    fn capabilities(self: Arc<Self>) -> CapabilitySet {
        let indexed: Arc<dyn IndexedAccess> = self.clone();
        let bounds: Arc<dyn Bounds> = self.clone();

        let (len, element) = (self.clone(), self.clone());
        let (lower, upper, set) = (self.clone(), self.clone(), self);

        CapabilitySet::new()
            .with(
                Capability::new::<dyn IndexedAccess>(INDEXED_ACCESS, indexed)
                    .with_member("len", move |_| Ok(Value::Integer(len.len() as i64)))
                    .with_member("element", move |args| {
                        element.element(index_argument(args)?).map(Value::Variable)
                    }),
            )
            .with(
                Capability::new::<dyn Bounds>(BOUNDS, bounds)
                    .with_member("lower_bound", move |_| Ok(lower.lower_bound().into()))
                    .with_member("upper_bound", move |_| Ok(upper.upper_bound().into()))
                    .with_member("set_bounds", move |args| match args {
                        [lower, upper] => {
                            set.set_bounds(bound_argument(lower)?, bound_argument(upper)?)?;
                            Ok(Value::Unit)
                        }
                        _ => Err(MilpForgeError::invalid_argument(
                            "set_bounds expects two arguments",
                        )),
                    }),
            )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

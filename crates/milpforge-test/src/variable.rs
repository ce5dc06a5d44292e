//! Plain model variables owned by a [`RecordingModel`](crate::RecordingModel).

use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use milpforge_core::{
    Domain, MilpForgeError, ModelRef, ModelVariable, OperationKind, Result, VariableRef,
};

use crate::model::RecordingModel;
use crate::vector::VectorVariable;

/// Identifier assigned by the owning model.
pub type VariableId = usize;

#[derive(Debug, Clone)]
struct VariableState {
    name: String,
    domain: Domain,
    constant_value: Option<f64>,
    expression: String,
    model: ModelRef,
}

/// A model variable without extended capabilities.
///
/// Equality is value based: two variables are equal when they belong to
/// the same model and have the same expression text and constant value.
/// Operations are always recorded by the model that created the variable,
/// even after `set_model`.
#[derive(Debug)]
pub struct RecordingVariable {
    id: VariableId,
    state: RwLock<VariableState>,
    read_only: AtomicBool,
    owner: Arc<RecordingModel>,
}

impl RecordingVariable {
    pub(crate) fn new(
        id: VariableId,
        name: String,
        domain: Domain,
        constant_value: Option<f64>,
        expression: String,
        owner: Arc<RecordingModel>,
    ) -> Self {
        let model: ModelRef = owner.clone();
        Self {
            id,
            state: RwLock::new(VariableState {
                name,
                domain,
                constant_value,
                expression,
                model,
            }),
            read_only: AtomicBool::new(false),
            owner,
        }
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    /// Makes every setter fail with a model error.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Views `variable` as a recording variable, looking through vectors.
    pub fn resolve(variable: &dyn ModelVariable) -> Option<&RecordingVariable> {
        let any = variable.as_any();
        any.downcast_ref::<RecordingVariable>()
            .or_else(|| any.downcast_ref::<VectorVariable>().map(VectorVariable::base))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, VariableState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, VariableState>> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(MilpForgeError::Model(format!(
                "variable `{}` is read-only",
                self.read().name
            )));
        }
        Ok(self.state.write().unwrap_or_else(PoisonError::into_inner))
    }

    fn identity(&self) -> (usize, String, Option<u64>) {
        let state = self.read();
        (
            model_address(&state.model),
            state.expression.clone(),
            state.constant_value.map(f64::to_bits),
        )
    }
}

fn model_address(model: &ModelRef) -> usize {
    Arc::as_ptr(model) as *const () as usize
}

impl ModelVariable for RecordingVariable {
    fn name(&self) -> String {
        self.read().name.clone()
    }

    fn set_name(&self, name: String) -> Result<()> {
        self.write()?.name = name;
        Ok(())
    }

    fn domain(&self) -> Domain {
        self.read().domain
    }

    fn set_domain(&self, domain: Domain) -> Result<()> {
        self.write()?.domain = domain;
        Ok(())
    }

    fn constant_value(&self) -> Option<f64> {
        self.read().constant_value
    }

    fn set_constant_value(&self, value: Option<f64>) -> Result<()> {
        self.write()?.constant_value = value;
        Ok(())
    }

    fn expression(&self) -> String {
        self.read().expression.clone()
    }

    fn set_expression(&self, expression: String) -> Result<()> {
        self.write()?.expression = expression;
        Ok(())
    }

    fn model(&self) -> ModelRef {
        self.read().model.clone()
    }

    fn set_model(&self, model: ModelRef) -> Result<()> {
        self.write()?.model = model;
        Ok(())
    }

    fn operation(&self, kind: OperationKind, operands: &[VariableRef]) -> Result<VariableRef> {
        self.owner.apply(kind, self, operands)
    }

    fn variable_eq(&self, other: &dyn ModelVariable) -> bool {
        if let Some(inner) = other.wrapped_variable() {
            return self.variable_eq(inner.as_ref());
        }
        match RecordingVariable::resolve(other) {
            Some(other) => self.identity() == other.identity(),
            None => false,
        }
    }

    fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.identity().hash(&mut hasher);
        hasher.finish()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//! A recording in-memory model.
//!
//! Every call that crosses the model boundary (`from_constant` and
//! `operation`) is appended to a call log, so tests can assert exactly which
//! calls an operator issued. Results are computed deterministically: equal
//! inputs give variables with equal expression text and constant value.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use milpforge_core::{
    innermost, Domain, Literal, MilpForgeError, MilpModel, ModelRef, ModelVariable,
    OperationKind, Result, VariableRef,
};

use crate::variable::{RecordingVariable, VariableId};
use crate::vector::VectorVariable;

/// One call received by a [`RecordingModel`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FromConstant(Literal),
    Operation {
        kind: OperationKind,
        receiver: VariableId,
        operands: Vec<VariableId>,
    },
}

impl Call {
    pub fn is_operation(&self) -> bool {
        matches!(self, Call::Operation { .. })
    }
}

/// In-memory model that logs every boundary call.
#[derive(Debug)]
pub struct RecordingModel {
    name: String,
    next_id: AtomicUsize,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<MilpForgeError>>,
    this: Weak<RecordingModel>,
}

impl RecordingModel {
    /// Creates a new model.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|this| Self {
            name,
            next_id: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            this: this.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to this model.
    pub fn handle(&self) -> ModelRef {
        self.owner()
    }

    fn owner(&self) -> Arc<RecordingModel> {
        self.this
            .upgrade()
            .expect("RecordingModel is only constructed behind an Arc")
    }

    /// Declares a decision variable. Not recorded.
    pub fn variable(&self, name: &str, domain: Domain) -> Arc<RecordingVariable> {
        Arc::new(RecordingVariable::new(
            self.allocate_id(),
            name.to_string(),
            domain,
            None,
            name.to_string(),
            self.owner(),
        ))
    }

    /// Declares a constant directly, bypassing `from_constant`. Not recorded.
    pub fn constant(&self, value: impl Into<Literal>) -> Arc<RecordingVariable> {
        self.build_constant(value.into())
    }

    /// Declares a vector variable exposing the extended capabilities.
    pub fn vector(&self, name: &str, elements: Vec<VariableRef>) -> Arc<VectorVariable> {
        let base = self.variable(name, Domain::AnyInteger);
        Arc::new(VectorVariable::new(base, elements))
    }

    /// Snapshot of the call log.
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn operation_count(&self) -> usize {
        self.calls().iter().filter(|call| call.is_operation()).count()
    }

    pub fn from_constant_count(&self) -> usize {
        self.calls().len() - self.operation_count()
    }

    /// Makes the next boundary call fail with `error`.
    pub fn fail_next(&self, error: MilpForgeError) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    fn allocate_id(&self) -> VariableId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn take_failure(&self) -> Result<()> {
        match self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn build_constant(&self, literal: Literal) -> Arc<RecordingVariable> {
        let id = self.allocate_id();
        Arc::new(RecordingVariable::new(
            id,
            format!("c{}", id),
            literal.domain(),
            Some(literal.as_f64()),
            literal.to_string(),
            self.owner(),
        ))
    }

    /// Applies `kind` on behalf of `receiver`.
    pub(crate) fn apply(
        &self,
        kind: OperationKind,
        receiver: &RecordingVariable,
        operands: &[VariableRef],
    ) -> Result<VariableRef> {
        self.take_failure()?;

        if operands.len() != kind.operand_count() {
            return Err(MilpForgeError::InvalidOperandCount {
                kind,
                expected: kind.operand_count(),
                actual: operands.len(),
            });
        }

        let resolved: Vec<VariableRef> = operands.iter().map(innermost).collect();
        let mut operand_ids = Vec::with_capacity(resolved.len());
        for operand in &resolved {
            let id = RecordingVariable::resolve(operand.as_ref())
                .map(RecordingVariable::id)
                .ok_or_else(|| {
                    MilpForgeError::Model(format!(
                        "operand `{}` does not belong to model `{}`",
                        operand.name(),
                        self.name
                    ))
                })?;
            operand_ids.push(id);
        }

        if kind.is_logical() {
            let receiver_ok = is_boolean(receiver);
            if !receiver_ok || !resolved.iter().all(|operand| is_boolean(operand.as_ref())) {
                return Err(MilpForgeError::DomainMismatch(format!(
                    "{} requires binary operands",
                    kind
                )));
            }
        }

        let rhs = resolved.first();
        if matches!(kind, OperationKind::Division | OperationKind::Remainder)
            && rhs.and_then(|operand| operand.constant_value()) == Some(0.0)
        {
            return Err(MilpForgeError::DomainMismatch(format!(
                "{} by constant zero",
                kind
            )));
        }

        self.record(Call::Operation {
            kind,
            receiver: receiver.id(),
            operands: operand_ids,
        });

        let expression = match (kind.binary_operator(), rhs) {
            (Some(op), Some(rhs)) => {
                format!("({} {} {})", receiver.expression(), op.symbol(), rhs.expression())
            }
            _ if kind == OperationKind::Negation => format!("-({})", receiver.expression()),
            _ => format!("!({})", receiver.expression()),
        };

        let folded = fold(
            kind,
            receiver.constant_value(),
            rhs.map(|operand| operand.constant_value()),
        );
        let integral = receiver.domain().is_integer()
            && resolved.iter().all(|operand| operand.domain().is_integer());
        let domain = result_domain(kind, integral, folded.is_some());

        let id = self.allocate_id();
        Ok(Arc::new(RecordingVariable::new(
            id,
            format!("t{}", id),
            domain,
            folded,
            expression,
            self.owner(),
        )))
    }
}

impl MilpModel for RecordingModel {
    fn from_constant(&self, literal: Literal) -> Result<VariableRef> {
        self.take_failure()?;
        self.record(Call::FromConstant(literal));
        Ok(self.build_constant(literal))
    }
}

fn is_boolean(variable: &dyn ModelVariable) -> bool {
    match variable.constant_value() {
        Some(value) => value == 0.0 || value == 1.0,
        None => variable.domain().is_binary(),
    }
}

fn truth(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

// `rhs` is `None` for unary kinds and `Some(None)` for a non-constant operand.
fn fold(kind: OperationKind, lhs: Option<f64>, rhs: Option<Option<f64>>) -> Option<f64> {
    let a = lhs?;
    let b = match rhs {
        Some(value) => value?,
        None => 0.0,
    };
    let value = match kind {
        OperationKind::Addition => a + b,
        OperationKind::Subtraction => a - b,
        OperationKind::Multiplication => a * b,
        OperationKind::Division => a / b,
        OperationKind::Remainder => a % b,
        OperationKind::ExclusiveDisjunction => truth((a != 0.0) != (b != 0.0)),
        OperationKind::Disjunction => truth(a != 0.0 || b != 0.0),
        OperationKind::Conjunction => truth(a != 0.0 && b != 0.0),
        OperationKind::IsLessThan => truth(a < b),
        OperationKind::IsGreaterThan => truth(a > b),
        OperationKind::IsLessOrEqual => truth(a <= b),
        OperationKind::IsGreaterOrEqual => truth(a >= b),
        OperationKind::IsEqual => truth(a == b),
        OperationKind::IsNotEqual => truth(a != b),
        OperationKind::Negation => -a,
        OperationKind::BinaryNegation => truth(a == 0.0),
        _ => return None,
    };
    Some(value)
}

fn result_domain(kind: OperationKind, integral: bool, constant: bool) -> Domain {
    let domain = if kind.is_comparison() || kind.is_logical() {
        Domain::BinaryInteger
    } else if integral && kind != OperationKind::Division {
        Domain::AnyInteger
    } else {
        Domain::AnyReal
    };
    if constant {
        domain.to_constant()
    } else {
        domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_constant_is_recorded() {
        let model = RecordingModel::new("m");
        let constant = model.from_constant(Literal::Integer(4)).unwrap();

        assert_eq!(constant.constant_value(), Some(4.0));
        assert_eq!(constant.expression(), "4");
        assert_eq!(model.calls(), vec![Call::FromConstant(Literal::Integer(4))]);
    }

    #[test]
    fn test_operation_folds_constants() {
        let model = RecordingModel::new("m");
        let a = model.constant(2);
        let b: VariableRef = model.constant(3);

        let sum = a.operation(OperationKind::Addition, &[b.clone()]).unwrap();
        assert_eq!(sum.constant_value(), Some(5.0));
        assert_eq!(sum.expression(), "(2 + 3)");
        assert_eq!(sum.domain(), Domain::AnyConstantInteger);

        let le = a.operation(OperationKind::IsLessOrEqual, &[b]).unwrap();
        assert_eq!(le.constant_value(), Some(1.0));
        assert_eq!(le.domain(), Domain::BinaryConstantInteger);
    }

    #[test]
    fn test_operand_count_is_checked() {
        let model = RecordingModel::new("m");
        let a = model.variable("a", Domain::AnyInteger);

        let err = a.operation(OperationKind::Addition, &[]).unwrap_err();
        assert_eq!(
            err,
            MilpForgeError::InvalidOperandCount {
                kind: OperationKind::Addition,
                expected: 1,
                actual: 0,
            }
        );
        assert_eq!(model.operation_count(), 0);
    }

    #[test]
    fn test_logical_requires_binary() {
        let model = RecordingModel::new("m");
        let a = model.variable("a", Domain::AnyInteger);
        let b: VariableRef = model.variable("b", Domain::BinaryInteger);

        let err = a.operation(OperationKind::Conjunction, &[b]).unwrap_err();
        assert!(matches!(err, MilpForgeError::DomainMismatch(_)));
    }

    #[test]
    fn test_fail_next_is_one_shot() {
        let model = RecordingModel::new("m");
        model.fail_next(MilpForgeError::Model("boom".into()));

        assert!(model.from_constant(Literal::Integer(1)).is_err());
        assert!(model.from_constant(Literal::Integer(1)).is_ok());
        assert_eq!(model.from_constant_count(), 1);
    }

    #[test]
    fn test_operation_recorded_on_receiver_model() {
        let first = RecordingModel::new("first");
        let a = first.variable("a", Domain::AnyInteger);
        let second = RecordingModel::new("second");
        let b: VariableRef = second.variable("b", Domain::AnyInteger);

        assert!(a.operation(OperationKind::Addition, &[b]).is_ok());
        assert_eq!(first.operation_count(), 1);
        assert_eq!(second.operation_count(), 0);
    }
}

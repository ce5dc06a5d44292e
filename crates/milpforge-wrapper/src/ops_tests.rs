//! Tests for the operator surface.

use std::sync::Arc;

use milpforge_core::{
    BinaryOperator, Domain, Literal, MilpForgeError, MilpModel, OperationKind, Result,
    VariableRef,
};
use milpforge_test::{Call, RecordingModel, RecordingVariable};

use super::{is_equal, is_not_equal};
use crate::{wrap, VariableWrapper};

struct Fixture {
    model: Arc<RecordingModel>,
    a: Arc<RecordingVariable>,
    b: Arc<RecordingVariable>,
    fa: VariableWrapper,
    fb: VariableWrapper,
}

// Binary operands keep every operator valid, including the logical ones.
fn fixture() -> Fixture {
    let model = RecordingModel::new("m");
    let a = model.variable("a", Domain::BinaryInteger);
    let b = model.variable("b", Domain::BinaryInteger);
    let fa = VariableWrapper::new(a.clone());
    let fb = VariableWrapper::new(b.clone());
    Fixture { model, a, b, fa, fb }
}

fn operation(kind: OperationKind, receiver: &RecordingVariable, operands: &[usize]) -> Call {
    Call::Operation {
        kind,
        receiver: receiver.id(),
        operands: operands.to_vec(),
    }
}

fn assert_wraps_result(result: &VariableWrapper) {
    assert_eq!(*result, VariableWrapper::new(result.unwrap()));
}

#[test]
fn test_every_operator_with_variable_operand() {
    let f = fixture();
    let b: VariableRef = f.b.clone();

    for op in BinaryOperator::ALL {
        f.model.clear_calls();
        let result = f.fa.apply(op, &b).unwrap();

        assert_eq!(
            f.model.calls(),
            vec![operation(op.kind(), &f.a, &[f.b.id()])],
            "operator {}",
            op
        );
        assert_wraps_result(&result);
        assert_eq!(
            result.expression(),
            format!("(a {} b)", op.symbol()),
            "operator {}",
            op
        );
    }
}

#[test]
fn test_every_operator_with_facade_operand() {
    let f = fixture();

    for op in BinaryOperator::ALL {
        f.model.clear_calls();
        let result = f.fa.apply(op, &f.fb).unwrap();

        assert_eq!(
            f.model.calls(),
            vec![operation(op.kind(), &f.a, &[f.b.id()])],
            "operator {}",
            op
        );
        assert_wraps_result(&result);
    }
}

#[test]
fn test_every_operator_with_integer_literal() {
    let f = fixture();

    for op in BinaryOperator::ALL {
        f.model.clear_calls();
        let result = f.fa.apply(op, 1).unwrap();

        let calls = f.model.calls();
        assert_eq!(calls.len(), 2, "operator {}", op);
        assert_eq!(calls[0], Call::FromConstant(Literal::Integer(1)));
        match &calls[1] {
            Call::Operation {
                kind,
                receiver,
                operands,
            } => {
                assert_eq!(*kind, op.kind());
                assert_eq!(*receiver, f.a.id());
                assert_eq!(operands.len(), 1);
                assert_ne!(operands[0], f.a.id());
                assert_ne!(operands[0], f.b.id());
            }
            other => panic!("expected an operation, got {:?}", other),
        }
        assert_wraps_result(&result);
        assert_eq!(result.expression(), format!("(a {} 1)", op.symbol()));
    }
}

#[test]
fn test_every_operator_with_real_literal() {
    let f = fixture();

    for op in BinaryOperator::ALL {
        f.model.clear_calls();
        let result = f.fa.apply(op, 1.0).unwrap();

        let calls = f.model.calls();
        assert_eq!(calls.len(), 2, "operator {}", op);
        assert_eq!(calls[0], Call::FromConstant(Literal::Real(1.0)));
        assert!(matches!(
            &calls[1],
            Call::Operation { kind, receiver, operands }
                if *kind == op.kind() && *receiver == f.a.id() && operands.len() == 1
        ));
        assert_wraps_result(&result);
    }
}

#[test]
fn test_std_ops_map_to_operation_kinds() {
    type BinaryFn = fn(&VariableWrapper, &VariableWrapper) -> Result<VariableWrapper>;

    let cases: [(OperationKind, BinaryFn); 8] = [
        (OperationKind::Addition, |x, y| x + y),
        (OperationKind::Subtraction, |x, y| x - y),
        (OperationKind::Multiplication, |x, y| x * y),
        (OperationKind::Division, |x, y| x / y),
        (OperationKind::Remainder, |x, y| x % y),
        (OperationKind::ExclusiveDisjunction, |x, y| x ^ y),
        (OperationKind::Disjunction, |x, y| x | y),
        (OperationKind::Conjunction, |x, y| x & y),
    ];

    let f = fixture();
    for (kind, apply) in cases {
        f.model.clear_calls();
        apply(&f.fa, &f.fb).unwrap();
        assert_eq!(f.model.calls(), vec![operation(kind, &f.a, &[f.b.id()])]);
    }
}

#[test]
fn test_named_comparisons_map_to_operation_kinds() {
    type BinaryFn = fn(&VariableWrapper, &VariableWrapper) -> Result<VariableWrapper>;

    let cases: [(OperationKind, BinaryFn); 6] = [
        (OperationKind::IsLessThan, |x, y| x.is_less_than(y)),
        (OperationKind::IsGreaterThan, |x, y| x.is_greater_than(y)),
        (OperationKind::IsLessOrEqual, |x, y| x.is_less_or_equal(y)),
        (OperationKind::IsGreaterOrEqual, |x, y| x.is_greater_or_equal(y)),
        (OperationKind::IsEqual, |x, y| x.is_equal(y)),
        (OperationKind::IsNotEqual, |x, y| x.is_not_equal(y)),
    ];

    let f = fixture();
    for (kind, compare) in cases {
        f.model.clear_calls();
        let result = compare(&f.fa, &f.fb).unwrap();
        assert_eq!(f.model.calls(), vec![operation(kind, &f.a, &[f.b.id()])]);
        assert_eq!(result.domain(), Domain::BinaryInteger);
    }
}

#[test]
fn test_owned_operands() {
    let f = fixture();

    let sum = (f.fa.clone() + f.fb.clone()).unwrap();
    assert_eq!(sum.expression(), "(a + b)");

    let scaled = (sum * 2_i64).unwrap();
    assert_eq!(scaled.expression(), "((a + b) * 2)");

    let b: VariableRef = f.b.clone();
    let ratio = (f.fa.clone() / b).unwrap();
    assert_eq!(ratio.domain(), Domain::AnyReal);

    let half = (&f.fa * 0.5_f32).unwrap();
    assert_eq!(half.expression(), "(a * 0.5)");
}

#[test]
fn test_literal_matches_explicit_constant() {
    let f = fixture();

    let with_literal = (&f.fa + 5).unwrap();
    let constant = f.model.from_constant(Literal::Integer(5)).unwrap();
    let with_constant = (&f.fa + constant).unwrap();

    assert_eq!(with_literal, with_constant);
    assert_eq!(with_literal.hash_code(), with_constant.hash_code());
}

#[test]
fn test_literal_on_the_left() {
    let f = fixture();

    let result = (3 + &f.fa).unwrap();
    let calls = f.model.calls();

    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Call::FromConstant(Literal::Integer(3)));
    assert!(matches!(
        &calls[1],
        Call::Operation { kind: OperationKind::Addition, operands, .. } if *operands == vec![f.a.id()]
    ));
    assert_eq!(result.expression(), "(3 + a)");

    let result = (10.0 - f.fa.clone()).unwrap();
    assert_eq!(result.expression(), "(10 - a)");

    let result = (1 & &f.fa).unwrap();
    assert_eq!(result.expression(), "(1 & a)");
}

#[test]
fn test_unary_operators() {
    let f = fixture();

    let negated = (-&f.fa).unwrap();
    assert_eq!(negated.expression(), "-(a)");

    let inverted = (!f.fa.clone()).unwrap();
    assert_eq!(inverted.expression(), "!(a)");

    assert_eq!(
        f.model.calls(),
        vec![
            operation(OperationKind::Negation, &f.a, &[]),
            operation(OperationKind::BinaryNegation, &f.a, &[]),
        ]
    );
}

#[test]
fn test_equality_guard_rejects_absent_left_operand() {
    let f = fixture();

    let err = is_equal(None, &f.fb).unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));

    let err = is_not_equal(None, 3).unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));

    assert!(f.model.calls().is_empty());
}

#[test]
fn test_equality_guard_dispatches_present_left_operand() {
    let f = fixture();

    is_equal(Some(&f.fa), &f.fb).unwrap();
    is_not_equal(Some(&f.fa), &f.fb).unwrap();

    assert_eq!(
        f.model.calls(),
        vec![
            operation(OperationKind::IsEqual, &f.a, &[f.b.id()]),
            operation(OperationKind::IsNotEqual, &f.a, &[f.b.id()]),
        ]
    );
}

#[test]
fn test_model_errors_propagate_unchanged() {
    let f = fixture();

    f.model.fail_next(MilpForgeError::Model("rejected".into()));
    assert_eq!(
        (&f.fa + &f.fb).unwrap_err(),
        MilpForgeError::Model("rejected".into())
    );

    f.model.fail_next(MilpForgeError::Model("no constants".into()));
    assert_eq!(
        (&f.fa + 1).unwrap_err(),
        MilpForgeError::Model("no constants".into())
    );
    assert_eq!(f.model.operation_count(), 0);

    let err = (&f.fa / 0).unwrap_err();
    assert!(matches!(err, MilpForgeError::DomainMismatch(_)));
}

#[test]
fn test_logical_operator_domain_mismatch() {
    let f = fixture();
    let x = VariableWrapper::new(f.model.variable("x", Domain::AnyInteger));

    let err = (&x & &f.fa).unwrap_err();
    assert!(matches!(err, MilpForgeError::DomainMismatch(_)));

    let err = (&f.fa | 2).unwrap_err();
    assert!(matches!(err, MilpForgeError::DomainMismatch(_)));
}

#[test]
fn test_siblings_survive_failure() {
    let f = fixture();

    let sum = (&f.fa + &f.fb).unwrap();
    f.model.fail_next(MilpForgeError::Model("boom".into()));
    assert!((&sum * 2).is_err());

    let doubled = (&sum * 2).unwrap();
    assert_eq!(doubled.expression(), "((a + b) * 2)");
    assert_eq!(sum.expression(), "(a + b)");
}

#[test]
fn test_chained_expression() {
    let f = fixture();

    let constraint = ((&f.fa + &f.fb).unwrap() * 2)
        .unwrap()
        .is_less_or_equal(3)
        .unwrap();

    assert_eq!(constraint.expression(), "(((a + b) * 2) <= 3)");
    assert_eq!(f.model.operation_count(), 3);
    assert_eq!(f.model.from_constant_count(), 2);
}

#[test]
fn test_end_to_end() {
    let f = fixture();
    let a: VariableRef = f.a.clone();
    let b: VariableRef = f.b.clone();

    let sum = (wrap(a.clone()) + wrap(b)).unwrap();
    assert_eq!(f.model.calls(), vec![operation(OperationKind::Addition, &f.a, &[f.b.id()])]);
    assert_eq!(sum.expression(), "(a + b)");

    f.model.clear_calls();
    let constraint = wrap(a).is_less_or_equal(3).unwrap();
    let calls = f.model.calls();

    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Call::FromConstant(Literal::Integer(3)));
    assert!(matches!(
        &calls[1],
        Call::Operation { kind: OperationKind::IsLessOrEqual, receiver, .. } if *receiver == f.a.id()
    ));
    assert_eq!(constraint.expression(), "(a <= 3)");
    assert_eq!(constraint.constant_value(), None);
}

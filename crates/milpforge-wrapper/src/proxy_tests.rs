//! Tests for capability-preserving wrapping.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use milpforge_config::WrapperConfig;
use milpforge_core::{Domain, MilpForgeError, ModelVariable, Value, VariableRef};
use milpforge_test::{
    Bounds, IndexedAccess, RecordingModel, RecordingVariable, VectorVariable, BOUNDS,
    INDEXED_ACCESS,
};

use super::{try_wrap, wrap, Wrapped, Wrapper, BASE_MEMBERS};
use crate::VariableWrapper;

trait Unrelated: Send + Sync {}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn vector_model() -> (Arc<RecordingModel>, Arc<RecordingVariable>, Arc<VectorVariable>) {
    let model = RecordingModel::new("m");
    let x = model.variable("x", Domain::AnyInteger);
    let first: VariableRef = x.clone();
    let second: VariableRef = model.variable("y", Domain::AnyInteger);
    let v = model.vector("v", vec![first, second]);
    (model, x, v)
}

#[test]
fn test_plain_variable_wraps_plain() {
    let model = RecordingModel::new("m");
    let a: VariableRef = model.variable("a", Domain::AnyInteger);

    let wrapped = wrap(a);
    assert!(!wrapped.is_extended());
    assert!(wrapped.capability_names().is_empty());

    let err = wrapped.capability::<dyn IndexedAccess>().err().unwrap();
    assert!(matches!(err, MilpForgeError::UnsupportedOperation(_)));
    let err = wrapped.invoke("len", &[]).unwrap_err();
    assert!(matches!(err, MilpForgeError::UnsupportedOperation(_)));

    assert_eq!(wrapped.invoke("name", &[]).unwrap(), Value::Text("a".into()));
}

#[test]
fn test_capable_variable_wraps_extended() {
    let (_model, _x, v) = vector_model();

    let wrapped = wrap(v);
    assert!(wrapped.is_extended());
    assert_eq!(wrapped.capability_names(), vec![INDEXED_ACCESS, BOUNDS]);
    let proxy = wrapped.as_proxy().unwrap();
    assert!(proxy.has_capability::<dyn Bounds>());
    assert!(!proxy.has_capability::<dyn Unrelated>());
}

#[test]
fn test_typed_handle_forwards_to_same_instance() {
    let (_model, x, v) = vector_model();
    let wrapped = wrap(v.clone());

    let bounds = wrapped.capability::<dyn Bounds>().unwrap();
    bounds.set_bounds(Some(0.0), Some(4.0)).unwrap();
    assert_eq!(v.upper_bound(), Some(4.0));

    let indexed = wrapped.capability::<dyn IndexedAccess>().unwrap();
    assert_eq!(indexed.len(), 2);
    assert!(Arc::ptr_eq(&indexed.element(0).unwrap(), &(x as VariableRef)));
}

#[test]
fn test_invoke_capability_members() {
    let (_model, _x, v) = vector_model();
    let wrapped = wrap(v.clone());

    assert_eq!(wrapped.invoke("len", &[]).unwrap(), Value::Integer(2));
    wrapped
        .invoke("set_bounds", &[Value::Integer(1), Value::Unit])
        .unwrap();
    assert_eq!(v.lower_bound(), Some(1.0));
    assert_eq!(v.upper_bound(), None);
    assert_eq!(wrapped.invoke("lower_bound", &[]).unwrap(), Value::Real(1.0));
}

#[test]
fn test_returned_variables_are_wrapped_again() {
    let (_model, x, v) = vector_model();
    let wrapped = wrap(v);

    let element = wrapped.invoke("element", &[Value::Integer(0)]).unwrap();
    let element = element.as_variable().unwrap();

    assert!(element.as_any().downcast_ref::<VariableWrapper>().is_some());
    assert_eq!(wrap(element.clone()), wrap(x.clone()));
    assert!(Arc::ptr_eq(&VariableWrapper::new(element.clone()).unwrap(), &(x as VariableRef)));
}

#[test]
fn test_unknown_members_are_unsupported() {
    let (_model, _x, v) = vector_model();
    let wrapped = wrap(v);

    let err = wrapped.invoke("transpose", &[]).unwrap_err();
    assert!(matches!(err, MilpForgeError::UnsupportedOperation(_)));

    let err = wrapped.capability::<dyn Unrelated>().err().unwrap();
    assert!(matches!(err, MilpForgeError::UnsupportedOperation(_)));
}

#[test]
fn test_member_errors_propagate() {
    let (_model, _x, v) = vector_model();
    let wrapped = wrap(v);

    let err = wrapped.invoke("element", &[Value::Integer(9)]).unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));
}

#[test]
fn test_base_members_through_invoke() {
    let (_model, _x, v) = vector_model();

    for wrapped in [wrap(v.clone()), Wrapped::Plain(VariableWrapper::new(v.clone()))] {
        wrapped
            .invoke("set_name", &[Value::Text("renamed".into())])
            .unwrap();
        assert_eq!(v.name(), "renamed");

        wrapped
            .invoke("set_domain", &[Value::Domain(Domain::BinaryInteger)])
            .unwrap();
        assert_eq!(
            wrapped.invoke("domain", &[]).unwrap(),
            Value::Domain(Domain::BinaryInteger)
        );

        wrapped
            .invoke("set_constant_value", &[Value::Integer(1)])
            .unwrap();
        assert_eq!(wrapped.invoke("constant_value", &[]).unwrap(), Value::Real(1.0));
        wrapped.invoke("set_constant_value", &[Value::Unit]).unwrap();
        assert_eq!(v.constant_value(), None);

        wrapped
            .invoke("set_expression", &[Value::Text("v".into())])
            .unwrap();
        assert_eq!(
            wrapped.invoke("expression", &[]).unwrap(),
            Value::Text("v".into())
        );
    }
}

#[test]
fn test_every_base_member_is_answered() {
    let model = RecordingModel::new("m");
    let a: VariableRef = model.variable("a", Domain::AnyInteger);
    let wrapped = wrap(a);

    for member in BASE_MEMBERS {
        let err = wrapped.invoke(member, &[Value::Bool(true), Value::Bool(true)]);
        assert!(
            matches!(err, Err(MilpForgeError::InvalidArgument(_))),
            "member {}",
            member
        );
    }
}

#[test]
fn test_model_members_through_invoke() {
    let (model, _x, v) = vector_model();
    let other = RecordingModel::new("other");
    let wrapped = wrap(v.clone());

    let owner = wrapped.invoke("model", &[]).unwrap();
    assert!(Arc::ptr_eq(owner.as_model().unwrap(), &model.handle()));

    let result = wrapped
        .invoke("set_model", &[Value::Model(other.handle())])
        .unwrap();
    assert_eq!(result, Value::Unit);
    assert!(Arc::ptr_eq(&v.model(), &other.handle()));

    let err = wrapped
        .invoke("set_model", &[Value::Text("other".into())])
        .unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));
}

#[test]
fn test_base_member_argument_checks() {
    let model = RecordingModel::new("m");
    let a: VariableRef = model.variable("a", Domain::AnyInteger);
    let wrapped = wrap(a);

    let err = wrapped.invoke("set_name", &[Value::Integer(3)]).unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));
    let err = wrapped.invoke("name", &[Value::Unit]).unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));
    let err = wrapped
        .invoke("set_domain", &[Value::Text("binary".into())])
        .unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));
}

#[test]
fn test_rejected_setter_propagates() {
    let model = RecordingModel::new("m");
    let a = model.variable("a", Domain::AnyInteger);
    a.set_read_only(true);
    let wrapped = wrap(a.clone());

    let err = wrapped.set_name("b").unwrap_err();
    assert!(matches!(err, MilpForgeError::Model(_)));
    let err = wrapped
        .invoke("set_expression", &[Value::Text("b".into())])
        .unwrap_err();
    assert!(matches!(err, MilpForgeError::Model(_)));
    assert_eq!(a.name(), "a");
}

#[test]
fn test_flattening_is_idempotent() {
    let (_model, x, v) = vector_model();
    let x: VariableRef = x;

    let once = wrap(x.clone());
    let twice = wrap(once.clone().into_variable());
    assert!(Arc::ptr_eq(&twice.unwrap(), &once.unwrap()));
    assert!(Arc::ptr_eq(&once.unwrap(), &x));
    assert!(!twice.is_extended());

    let once = wrap(v.clone());
    let twice = wrap(once.clone().into_variable());
    assert!(twice.is_extended());
    assert_eq!(twice.capability_names(), once.capability_names());
    assert_eq!(twice, once);

    let nested = VariableWrapper::new(twice.into_variable());
    let v: VariableRef = v;
    assert!(Arc::ptr_eq(&nested.unwrap(), &v));
}

#[test]
fn test_plain_facade_stays_plain() {
    let (_model, _x, v) = vector_model();

    let facade: VariableRef = Arc::new(VariableWrapper::new(v));
    assert!(!wrap(facade).is_extended());
}

#[test]
fn test_equality_delegates() {
    let model = RecordingModel::new("m");
    let first: VariableRef = model.variable("x", Domain::AnyInteger);
    let second: VariableRef = model.variable("x", Domain::AnyInteger);
    let other: VariableRef = model.variable("z", Domain::AnyInteger);

    assert!(*first == *second);
    assert_eq!(wrap(first.clone()), wrap(second.clone()));
    assert_eq!(hash_of(&wrap(first.clone())), hash_of(&wrap(second)));
    assert_ne!(wrap(first.clone()), wrap(other));
    assert_eq!(wrap(first.clone()).hash_code(), first.hash_code());
}

#[test]
fn test_absent_variable_is_rejected() {
    let err = try_wrap(None).unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));

    let err = VariableWrapper::try_new(None).unwrap_err();
    assert!(matches!(err, MilpForgeError::InvalidArgument(_)));

    let model = RecordingModel::new("m");
    let a: VariableRef = model.variable("a", Domain::AnyInteger);
    assert!(try_wrap(Some(a)).is_ok());
}

#[test]
fn test_mutations_visible_through_every_facade() {
    let (_model, _x, v) = vector_model();
    let first = wrap(v.clone());
    let second = wrap(v.clone());

    first.set_name("w").unwrap();
    assert_eq!(second.name(), "w");
    assert_eq!(v.name(), "w");
}

#[test]
fn test_plain_and_extended_compare_by_variable() {
    let (_model, _x, v) = vector_model();
    let extended = wrap(v.clone());
    let plain = Wrapper::new(WrapperConfig::new().with_capability_detection(false)).wrap(v);

    assert!(extended.is_extended());
    assert!(!plain.is_extended());
    assert_eq!(extended, plain);
    assert_eq!(hash_of(&extended), hash_of(&plain));
}

#[test]
fn test_capability_detection_disabled() {
    let (_model, _x, v) = vector_model();
    let wrapper = Wrapper::new(WrapperConfig::new().with_capability_detection(false));

    let wrapped = wrapper.wrap(v);
    assert!(!wrapped.is_extended());
}

#[test]
fn test_disabled_capabilities_are_hidden() {
    let (_model, _x, v) = vector_model();

    let wrapper = Wrapper::new(WrapperConfig::new().with_disabled_capability(BOUNDS));
    let wrapped = wrapper.wrap(v.clone());
    assert_eq!(wrapped.capability_names(), vec![INDEXED_ACCESS]);
    assert!(wrapped.capability::<dyn Bounds>().is_err());
    assert!(wrapped.invoke("set_bounds", &[Value::Unit, Value::Unit]).is_err());

    let wrapper = Wrapper::new(
        WrapperConfig::new()
            .with_disabled_capability(BOUNDS)
            .with_disabled_capability(INDEXED_ACCESS),
    );
    assert!(!wrapper.wrap(v).is_extended());
}

#[test]
fn test_proxy_operator_surface() {
    let (model, x, v) = vector_model();
    let wrapped = wrap(v);
    let fx = VariableWrapper::new(x);

    let sum = (&wrapped + 1).unwrap();
    assert_eq!(sum.expression(), "(v + 1)");

    let proxy = wrapped.as_proxy().unwrap();
    let compared = proxy.is_greater_than(&fx).unwrap();
    assert_eq!(compared.expression(), "(v > x)");

    let product = (proxy * &fx).unwrap();
    assert_eq!(product.expression(), "(v * x)");

    let negated = (-&wrapped).unwrap();
    assert_eq!(negated.expression(), "-(v)");

    let reversed = (2 * &wrapped).unwrap();
    assert_eq!(reversed.expression(), "(2 * v)");

    let mixed = (&fx - wrapped).unwrap();
    assert_eq!(mixed.expression(), "(x - v)");

    assert_eq!(model.operation_count(), 6);
}

#[test]
fn test_proxy_as_model_variable() {
    let (_model, _x, v) = vector_model();
    let variable = wrap(v).into_variable();

    assert_eq!(variable.name(), "v");
    assert_eq!(variable.clone().capabilities().len(), 2);
    assert!(variable.wrapped_variable().is_some());
}

#[test]
fn test_display_shows_expression() {
    let (_model, _x, v) = vector_model();
    let wrapped = wrap(v);
    let sum = (&wrapped + 3).unwrap();

    assert_eq!(wrapped.to_string(), "v");
    assert_eq!(sum.to_string(), "(v + 3)");
}

#[test]
fn test_wrap_all() {
    let model = RecordingModel::new("m");
    let a: VariableRef = model.variable("a", Domain::AnyInteger);
    let b: VariableRef = model.variable("b", Domain::AnyReal);
    let variables = vec![a, b];

    let facades = VariableWrapper::wrap_all(variables);
    let names: Vec<String> = facades.iter().map(|facade| facade.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

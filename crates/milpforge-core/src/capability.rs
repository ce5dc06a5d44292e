//! Capability descriptors for variables with extended contracts.
//!
//! Rust has no runtime interface reflection, so a variable reports what it
//! can do beyond [`ModelVariable`](crate::ModelVariable) through
//! [`ModelVariable::capabilities`](crate::ModelVariable::capabilities).
//! Each [`Capability`] carries:
//!
//! - a typed handle (`Arc<dyn Trait>`) keyed by the trait object's `TypeId`,
//!   pointing at the same instance as the variable;
//! - a member table (name to forwarding closure) for dynamic invocation.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use milpforge_core::{Capability, CapabilitySet, Value};
//!
//! trait Labelled: Send + Sync {
//!     fn label(&self) -> String;
//! }
//!
//! struct Node;
//!
//! impl Labelled for Node {
//!     fn label(&self) -> String {
//!         "node".to_string()
//!     }
//! }
//!
//! let node = Arc::new(Node);
//! let handle: Arc<dyn Labelled> = node.clone();
//! let set = CapabilitySet::new().with(
//!     Capability::new::<dyn Labelled>("labelled", handle)
//!         .with_member("label", move |_| Ok(Value::Text(node.label()))),
//! );
//!
//! assert_eq!(set.get::<dyn Labelled>().unwrap().label(), "node");
//! assert_eq!(set.invoke("label", &[]).unwrap().unwrap(), Value::Text("node".into()));
//! ```

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::Domain;
use crate::error::{MilpForgeError, Result};
use crate::variable::{ModelRef, VariableRef};

/// Argument or return value of a dynamically invoked member.
#[derive(Debug, Clone)]
pub enum Value {
    Unit,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Domain(Domain),
    Variable(VariableRef),
    Model(ModelRef),
}

impl Value {
    /// Short type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Domain(_) => "domain",
            Value::Variable(_) => "variable",
            Value::Model(_) => "model",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_domain(&self) -> Option<Domain> {
        match self {
            Value::Domain(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableRef> {
        match self {
            Value::Variable(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&ModelRef> {
        match self {
            Value::Model(value) => Some(value),
            _ => None,
        }
    }
}

// Variables compare by delegated identity, models by instance.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Domain(a), Value::Domain(b)) => a == b,
            (Value::Variable(a), Value::Variable(b)) => a.variable_eq(&**b),
            (Value::Model(a), Value::Model(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Option<f64>> for Value {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Value::Unit, Value::Real)
    }
}

/// Forwarding closure behind a dynamically invoked member.
pub type MemberFn = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// One extended contract implemented by a concrete variable.
#[derive(Clone)]
pub struct Capability {
    name: &'static str,
    type_id: TypeId,
    // Holds an `Arc<C>` for the `C` recorded in `type_id`.
    handle: Arc<dyn Any + Send + Sync>,
    members: BTreeMap<&'static str, MemberFn>,
}

impl Capability {
    /// Creates a capability backed by `handle`.
    ///
    /// `C` is usually a trait object type such as `dyn IndexedAccess`.
    pub fn new<C>(name: &'static str, handle: Arc<C>) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        Self {
            name,
            type_id: TypeId::of::<C>(),
            handle: Arc::new(handle),
            members: BTreeMap::new(),
        }
    }

    /// Registers a dynamically invocable member.
    pub fn with_member<F>(mut self, member: &'static str, call: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.members.insert(member, Arc::new(call));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `TypeId` of the contract this capability provides.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns true if this capability provides contract `C`.
    pub fn provides<C: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }

    /// Typed handle to the contract, if this capability provides `C`.
    pub fn handle<C: ?Sized + 'static>(&self) -> Option<Arc<C>> {
        self.handle.downcast_ref::<Arc<C>>().cloned()
    }

    /// Names of the dynamically invocable members.
    pub fn member_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.members.keys().copied()
    }

    pub fn has_member(&self, member: &str) -> bool {
        self.members.contains_key(member)
    }

    /// The forwarding closure for `member`.
    pub fn member(&self, member: &str) -> Option<&MemberFn> {
        self.members.get(member)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name)
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The capabilities a variable exposes beyond the base contract.
///
/// Capabilities are unique by contract type: inserting a second
/// capability for the same `C` replaces the first.
#[derive(Clone, Default)]
pub struct CapabilitySet {
    capabilities: Vec<Capability>,
}

impl CapabilitySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a capability, builder style.
    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    /// Adds or replaces a capability.
    pub fn insert(&mut self, capability: Capability) {
        match self
            .capabilities
            .iter_mut()
            .find(|existing| existing.type_id == capability.type_id)
        {
            Some(existing) => *existing = capability,
            None => self.capabilities.push(capability),
        }
    }

    /// Typed handle to contract `C`, if present.
    pub fn get<C: ?Sized + 'static>(&self) -> Option<Arc<C>> {
        self.capabilities.iter().find_map(|cap| cap.handle::<C>())
    }

    /// Typed handle to contract `C`, or `UnsupportedOperation`.
    pub fn require<C: ?Sized + 'static>(&self) -> Result<Arc<C>> {
        self.get::<C>().ok_or_else(|| {
            MilpForgeError::unsupported(format!(
                "capability `{}` is not available",
                std::any::type_name::<C>()
            ))
        })
    }

    pub fn contains<C: ?Sized + 'static>(&self) -> bool {
        self.capabilities.iter().any(|cap| cap.provides::<C>())
    }

    /// Looks up a capability by name.
    pub fn find(&self, name: &str) -> Option<&Capability> {
        self.capabilities.iter().find(|cap| cap.name == name)
    }

    /// Capability names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.capabilities.iter().map(|cap| cap.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Removes capabilities whose name is in `names`.
    pub fn without<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.into_iter().collect();
        self.capabilities.retain(|cap| !names.contains(&cap.name));
        self
    }

    /// Resolves `member` across all capabilities, first match wins.
    pub fn resolve(&self, member: &str) -> Option<&MemberFn> {
        self.capabilities.iter().find_map(|cap| cap.member(member))
    }

    /// Invokes `member` if some capability provides it.
    ///
    /// Returns `None` when no capability has the member.
    pub fn invoke(&self, member: &str, args: &[Value]) -> Option<Result<Value>> {
        self.resolve(member).map(|call| call(args))
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.capabilities.iter()).finish()
    }
}

//! Capability-preserving wrapping.
//!
//! [`wrap`] inspects the capabilities a variable reports and returns either
//! a plain facade or a [`CapabilityProxy`] that keeps exposing them. The
//! proxy derefs to [`VariableWrapper`], so the whole operator surface is
//! available on both.
//!
//! # Examples
//!
//! ```
//! use milpforge_core::{Domain, Value, VariableRef};
//! use milpforge_test::{IndexedAccess, RecordingModel};
//! use milpforge_wrapper::wrap;
//!
//! let model = RecordingModel::new("m");
//! let x: VariableRef = model.variable("x", Domain::AnyInteger);
//! let v: VariableRef = model.vector("v", vec![x]);
//!
//! let wrapped = wrap(v);
//! assert!(wrapped.is_extended());
//! assert_eq!(wrapped.capability::<dyn IndexedAccess>().unwrap().len(), 1);
//! assert_eq!(wrapped.invoke("len", &[]).unwrap(), Value::Integer(1));
//!
//! let sum = (&wrapped + 1).unwrap();
//! assert_eq!(sum.expression(), "(v + 1)");
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;

use milpforge_config::WrapperConfig;
use milpforge_core::{
    CapabilitySet, Domain, MilpForgeError, ModelRef, ModelVariable, OperationKind, Result, Value,
    VariableRef,
};

use crate::wrapper::{forward_variable_members, VariableWrapper};

/// Base members answered by every wrapped value through `invoke`.
pub const BASE_MEMBERS: [&str; 10] = [
    "name",
    "set_name",
    "domain",
    "set_domain",
    "constant_value",
    "set_constant_value",
    "expression",
    "set_expression",
    "model",
    "set_model",
];

/// Facade that also exposes the capabilities of the wrapped variable.
#[derive(Clone)]
pub struct CapabilityProxy {
    facade: VariableWrapper,
    capabilities: CapabilitySet,
    wrapper: Wrapper,
}

impl CapabilityProxy {
    /// The plain facade behind this proxy.
    pub fn facade(&self) -> &VariableWrapper {
        &self.facade
    }

    pub fn into_facade(self) -> VariableWrapper {
        self.facade
    }

    /// The capabilities discovered at wrap time.
    pub fn capability_set(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn capability_names(&self) -> Vec<&'static str> {
        self.capabilities.names()
    }

    /// Returns true if contract `C` is exposed.
    pub fn has_capability<C: ?Sized + 'static>(&self) -> bool {
        self.capabilities.contains::<C>()
    }

    /// Typed handle to contract `C`, pointing at the wrapped instance.
    ///
    /// # Errors
    ///
    /// Returns [`MilpForgeError::UnsupportedOperation`] if the variable
    /// does not expose `C`.
    pub fn capability<C: ?Sized + 'static>(&self) -> Result<Arc<C>> {
        self.capabilities.require::<C>()
    }

    /// Invokes a base or capability member by name.
    ///
    /// A variable returned by the member is wrapped again before being
    /// handed back.
    ///
    /// # Errors
    ///
    /// Returns [`MilpForgeError::UnsupportedOperation`] for an unknown
    /// member; member errors propagate unchanged.
    pub fn invoke(&self, member: &str, args: &[Value]) -> Result<Value> {
        let result = match invoke_base(&self.facade, member, args) {
            Some(result) => result,
            None => self
                .capabilities
                .invoke(member, args)
                .ok_or_else(|| unknown_member(&self.facade, member))?,
        };
        result.map(|value| self.wrapper.rewrap(value))
    }
}

impl Deref for CapabilityProxy {
    type Target = VariableWrapper;

    fn deref(&self) -> &VariableWrapper {
        &self.facade
    }
}

impl PartialEq for CapabilityProxy {
    fn eq(&self, other: &Self) -> bool {
        self.facade == other.facade
    }
}

impl Eq for CapabilityProxy {}

impl Hash for CapabilityProxy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.facade.hash(state);
    }
}

impl fmt::Debug for CapabilityProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityProxy")
            .field("variable", &self.facade.variable)
            .field("capabilities", &self.capabilities.names())
            .finish()
    }
}

impl fmt::Display for CapabilityProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.facade, f)
    }
}

impl ModelVariable for CapabilityProxy {
    forward_variable_members!(facade.variable);

    fn capabilities(self: Arc<Self>) -> CapabilitySet {
        self.capabilities.clone()
    }

    fn wrapped_variable(&self) -> Option<VariableRef> {
        Some(self.facade.variable.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Result of [`wrap`]: a plain facade or a capability proxy.
///
/// Equality and hashing follow the underlying variable, so a plain and an
/// extended wrap of the same variable compare equal.
#[derive(Debug, Clone)]
pub enum Wrapped {
    Plain(VariableWrapper),
    Extended(CapabilityProxy),
}

impl PartialEq for Wrapped {
    fn eq(&self, other: &Self) -> bool {
        self.facade() == other.facade()
    }
}

impl Eq for Wrapped {}

impl Hash for Wrapped {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.facade().hash(state);
    }
}

impl Wrapped {
    pub fn facade(&self) -> &VariableWrapper {
        match self {
            Wrapped::Plain(facade) => facade,
            Wrapped::Extended(proxy) => proxy.facade(),
        }
    }

    pub fn into_facade(self) -> VariableWrapper {
        match self {
            Wrapped::Plain(facade) => facade,
            Wrapped::Extended(proxy) => proxy.into_facade(),
        }
    }

    /// Returns true if capabilities beyond the base contract are exposed.
    pub fn is_extended(&self) -> bool {
        matches!(self, Wrapped::Extended(_))
    }

    pub fn as_proxy(&self) -> Option<&CapabilityProxy> {
        match self {
            Wrapped::Plain(_) => None,
            Wrapped::Extended(proxy) => Some(proxy),
        }
    }

    pub fn capability_names(&self) -> Vec<&'static str> {
        self.as_proxy()
            .map(CapabilityProxy::capability_names)
            .unwrap_or_default()
    }

    /// Typed handle to contract `C`.
    ///
    /// # Errors
    ///
    /// Returns [`MilpForgeError::UnsupportedOperation`] for plain facades
    /// and for proxies that do not expose `C`.
    pub fn capability<C: ?Sized + 'static>(&self) -> Result<Arc<C>> {
        match self {
            Wrapped::Plain(facade) => Err(MilpForgeError::unsupported(format!(
                "`{}` exposes no capability `{}`",
                facade.name(),
                std::any::type_name::<C>()
            ))),
            Wrapped::Extended(proxy) => proxy.capability::<C>(),
        }
    }

    /// Invokes a base or capability member by name.
    ///
    /// # Errors
    ///
    /// Returns [`MilpForgeError::UnsupportedOperation`] for an unknown
    /// member.
    pub fn invoke(&self, member: &str, args: &[Value]) -> Result<Value> {
        match self {
            Wrapped::Plain(facade) => invoke_base(facade, member, args)
                .unwrap_or_else(|| Err(unknown_member(facade, member))),
            Wrapped::Extended(proxy) => proxy.invoke(member, args),
        }
    }

    /// Shares the wrapped value as a model variable.
    ///
    /// Wrapping the returned reference again yields an equivalent value.
    pub fn into_variable(self) -> VariableRef {
        match self {
            Wrapped::Plain(facade) => Arc::new(facade),
            Wrapped::Extended(proxy) => Arc::new(proxy),
        }
    }
}

impl Deref for Wrapped {
    type Target = VariableWrapper;

    fn deref(&self) -> &VariableWrapper {
        self.facade()
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.facade(), f)
    }
}

impl From<Wrapped> for VariableWrapper {
    fn from(wrapped: Wrapped) -> Self {
        wrapped.into_facade()
    }
}

/// Builds wrapped values according to a [`WrapperConfig`].
///
/// # Examples
///
/// ```
/// use milpforge_config::WrapperConfig;
/// use milpforge_core::{Domain, VariableRef};
/// use milpforge_test::RecordingModel;
/// use milpforge_wrapper::Wrapper;
///
/// let model = RecordingModel::new("m");
/// let v: VariableRef = model.vector("v", Vec::new());
///
/// let wrapper = Wrapper::new(WrapperConfig::new().with_disabled_capability("bounds"));
/// assert_eq!(wrapper.wrap(v).capability_names(), vec!["indexed_access"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Wrapper {
    config: Arc<WrapperConfig>,
}

impl Wrapper {
    pub fn new(config: WrapperConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    /// Wraps `variable`, preserving its capabilities.
    ///
    /// A facade or proxy passed as a [`VariableRef`] comes back as the same
    /// kind of value without being proxied again.
    pub fn wrap(&self, variable: VariableRef) -> Wrapped {
        let trace = self.config.logging.trace_dispatch;

        if let Some(proxy) = variable.as_any().downcast_ref::<CapabilityProxy>() {
            let mut proxy = proxy.clone();
            proxy.facade = proxy.facade.with_trace(trace);
            proxy.wrapper = self.clone();
            return Wrapped::Extended(proxy);
        }
        if let Some(facade) = variable.as_any().downcast_ref::<VariableWrapper>() {
            return Wrapped::Plain(facade.clone().with_trace(trace));
        }

        let facade = VariableWrapper::new(variable.clone()).with_trace(trace);
        if !self.config.proxy.capability_detection {
            return Wrapped::Plain(facade);
        }

        let capabilities = variable.capabilities().without(
            self.config
                .proxy
                .disabled_capabilities
                .iter()
                .map(String::as_str),
        );
        if capabilities.is_empty() {
            return Wrapped::Plain(facade);
        }

        debug!(
            event = "wrap",
            variable = %facade.name(),
            capabilities = capabilities.len(),
            names = ?capabilities.names(),
        );
        Wrapped::Extended(CapabilityProxy {
            facade,
            capabilities,
            wrapper: self.clone(),
        })
    }

    /// Wraps an optional variable.
    ///
    /// # Errors
    ///
    /// Returns [`MilpForgeError::InvalidArgument`] if `variable` is `None`.
    pub fn try_wrap(&self, variable: Option<VariableRef>) -> Result<Wrapped> {
        variable
            .map(|variable| self.wrap(variable))
            .ok_or_else(|| MilpForgeError::invalid_argument("cannot wrap an absent variable"))
    }

    fn rewrap(&self, value: Value) -> Value {
        match value {
            Value::Variable(variable) => Value::Variable(self.wrap(variable).into_variable()),
            other => other,
        }
    }
}

/// Wraps `variable` with the default configuration.
pub fn wrap(variable: VariableRef) -> Wrapped {
    Wrapper::default().wrap(variable)
}

/// Wraps an optional variable with the default configuration.
///
/// # Errors
///
/// Returns [`MilpForgeError::InvalidArgument`] if `variable` is `None`.
pub fn try_wrap(variable: Option<VariableRef>) -> Result<Wrapped> {
    Wrapper::default().try_wrap(variable)
}

/// Method-call form of [`wrap`].
///
/// ```
/// use milpforge_core::{Domain, VariableRef};
/// use milpforge_test::RecordingModel;
/// use milpforge_wrapper::WrapExt;
///
/// let model = RecordingModel::new("m");
/// let x: VariableRef = model.variable("x", Domain::AnyInteger);
/// assert_eq!(x.wrap().name(), "x");
/// ```
pub trait WrapExt {
    fn wrap(self) -> Wrapped;
}

impl WrapExt for VariableRef {
    fn wrap(self) -> Wrapped {
        wrap(self)
    }
}

fn unknown_member(facade: &VariableWrapper, member: &str) -> MilpForgeError {
    MilpForgeError::unsupported(format!(
        "`{}` has no member `{}`",
        facade.name(),
        member
    ))
}

fn invoke_base(facade: &VariableWrapper, member: &str, args: &[Value]) -> Option<Result<Value>> {
    let result = match member {
        "name" => no_arguments(member, args).map(|()| Value::Text(facade.name())),
        "domain" => no_arguments(member, args).map(|()| Value::Domain(facade.domain())),
        "constant_value" => no_arguments(member, args).map(|()| facade.constant_value().into()),
        "expression" => no_arguments(member, args).map(|()| Value::Text(facade.expression())),
        "model" => no_arguments(member, args).map(|()| Value::Model(facade.model())),
        "set_name" => single_argument(member, args)
            .and_then(|value| text_argument(member, value))
            .and_then(|name| facade.set_name(name))
            .map(|()| Value::Unit),
        "set_domain" => single_argument(member, args)
            .and_then(|value| {
                value.as_domain().ok_or_else(|| wrong_argument(member, "domain", value))
            })
            .and_then(|domain| facade.set_domain(domain))
            .map(|()| Value::Unit),
        "set_constant_value" => single_argument(member, args)
            .and_then(|value| match value {
                Value::Unit => Ok(None),
                other => other
                    .as_real()
                    .map(Some)
                    .ok_or_else(|| wrong_argument(member, "number or unit", other)),
            })
            .and_then(|value| facade.set_constant_value(value))
            .map(|()| Value::Unit),
        "set_expression" => single_argument(member, args)
            .and_then(|value| text_argument(member, value))
            .and_then(|expression| facade.set_expression(expression))
            .map(|()| Value::Unit),
        "set_model" => single_argument(member, args)
            .and_then(|value| {
                value
                    .as_model()
                    .cloned()
                    .ok_or_else(|| wrong_argument(member, "model", value))
            })
            .and_then(|model| facade.set_model(model))
            .map(|()| Value::Unit),
        _ => return None,
    };
    Some(result)
}

fn no_arguments(member: &str, args: &[Value]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(MilpForgeError::invalid_argument(format!(
            "`{}` takes no arguments, got {}",
            member,
            args.len()
        )))
    }
}

fn single_argument<'a>(member: &str, args: &'a [Value]) -> Result<&'a Value> {
    match args {
        [value] => Ok(value),
        _ => Err(MilpForgeError::invalid_argument(format!(
            "`{}` takes one argument, got {}",
            member,
            args.len()
        ))),
    }
}

fn text_argument(member: &str, value: &Value) -> Result<String> {
    value
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| wrong_argument(member, "text", value))
}

fn wrong_argument(member: &str, expected: &str, value: &Value) -> MilpForgeError {
    MilpForgeError::invalid_argument(format!(
        "`{}` expects {}, got {}",
        member,
        expected,
        value.type_name()
    ))
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;

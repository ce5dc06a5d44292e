//! MilpForge Wrapper - Infix operators over MILP model variables
//!
//! Wrap a model variable once and build expressions and constraints with
//! ordinary operators instead of explicit `operation` calls:
//!
//! ```
//! use milpforge_core::{Domain, VariableRef};
//! use milpforge_test::RecordingModel;
//! use milpforge_wrapper::wrap;
//!
//! let model = RecordingModel::new("m");
//! let a: VariableRef = model.variable("a", Domain::AnyInteger);
//! let b: VariableRef = model.variable("b", Domain::AnyInteger);
//!
//! let total = (wrap(a) + wrap(b)).unwrap();
//! let limit = (&total * 2).unwrap().is_less_or_equal(10).unwrap();
//!
//! assert_eq!(limit.expression(), "(((a + b) * 2) <= 10)");
//! assert_eq!(model.operation_count(), 3);
//! ```
//!
//! - [`VariableWrapper`] - The facade: pass-through accessors, delegated
//!   equality, flattening construction
//! - [`ops`] - The operator surface and the dispatch to `operation`
//! - [`Operand`] - Right-hand operands: variables, facades, literals
//! - [`wrap`], [`Wrapper`] - Capability-preserving wrapping
//!   ([`Wrapped`], [`CapabilityProxy`])

pub mod operand;
pub mod ops;
pub mod proxy;
pub mod wrapper;

pub use operand::Operand;
pub use ops::{is_equal, is_not_equal};
pub use proxy::{try_wrap, wrap, CapabilityProxy, WrapExt, Wrapped, Wrapper, BASE_MEMBERS};
pub use wrapper::VariableWrapper;

//! MilpForge - Infix operators for MILP model builders
//!
//! Wrap model variables and write expressions and constraints the way they
//! read on paper.
//!
//! # Example
//!
//! ```rust
//! use milpforge::prelude::*;
//!
//! // The dispatch table is re-exported
//! assert_eq!(BinaryOperator::Le.kind(), OperationKind::IsLessOrEqual);
//! assert_eq!(BinaryOperator::from_symbol("^"), Some(BinaryOperator::BitXor));
//! ```
//!
//! With a model builder implementing [`ModelVariable`]:
//!
//! ```rust
//! use milpforge::prelude::*;
//! use milpforge_test::RecordingModel;
//!
//! let model = RecordingModel::new("knapsack");
//! let x: VariableRef = model.variable("x", Domain::BinaryInteger);
//! let y: VariableRef = model.variable("y", Domain::BinaryInteger);
//!
//! let weight = ((wrap(x) * 3).unwrap() + (wrap(y) * 5).unwrap()).unwrap();
//! let fits = weight.is_less_or_equal(7).unwrap();
//! assert_eq!(fits.expression(), "(((x * 3) + (y * 5)) <= 7)");
//! ```

// Core contracts
pub use milpforge_core::{
    innermost, BinaryOperator, Capability, CapabilitySet, Domain, Literal, MemberFn,
    MilpForgeError, MilpModel, ModelRef, ModelVariable, OperationKind, Result, UnaryOperator,
    Value, VariableRef,
};

// Configuration
pub use milpforge_config::{ConfigError, LoggingConfig, ProxyConfig, WrapperConfig};

// Facade and proxy
pub use milpforge_wrapper::{
    is_equal, is_not_equal, try_wrap, wrap, CapabilityProxy, Operand, VariableWrapper, WrapExt,
    Wrapped, Wrapper, BASE_MEMBERS,
};

/// Operator surface module, for the free equality functions.
pub use milpforge_wrapper::ops;

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        BinaryOperator, Domain, Literal, MilpForgeError, MilpModel, ModelRef, ModelVariable,
        OperationKind, Result, UnaryOperator, Value, VariableRef,
    };
    pub use super::{wrap, CapabilityProxy, Operand, VariableWrapper, WrapExt, Wrapped, Wrapper};
    pub use super::WrapperConfig;
}

//! MilpForge Core - Contracts for ergonomic MILP expression building
//!
//! This crate provides the fundamental abstractions shared by the facade:
//! - The operator dispatch table mapping infix operators to operation kinds
//! - The model variable and model contracts the facade forwards to
//! - Capability descriptors for variables with extended contracts
//! - Domain tags, numeric literals and the error taxonomy

pub mod capability;
pub mod domain;
pub mod error;
pub mod literal;
pub mod operation;
pub mod variable;

pub use capability::{Capability, CapabilitySet, MemberFn, Value};
pub use domain::Domain;
pub use error::{MilpForgeError, Result};
pub use literal::Literal;
pub use operation::{BinaryOperator, OperationKind, UnaryOperator};
pub use variable::{innermost, MilpModel, ModelRef, ModelVariable, VariableRef};

//! Shared test fixtures for MilpForge crates.
//!
//! This crate provides an in-memory model builder for testing the facade.
//! It depends only on `milpforge-core` so every crate can use it as a
//! dev-dependency.
//!
//! - [`model`] - Recording model that logs every boundary call
//! - [`variable`] - Plain variables with value-based equality
//! - [`vector`] - A variable reporting extended capabilities
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! milpforge-test = { workspace = true }
//! ```
//!
//! Then build a model and inspect its call log:
//!
//! ```
//! use milpforge_core::{Domain, ModelVariable, OperationKind, VariableRef};
//! use milpforge_test::{Call, RecordingModel};
//!
//! let model = RecordingModel::new("m");
//! let a = model.variable("a", Domain::AnyInteger);
//! let b: VariableRef = model.variable("b", Domain::AnyInteger);
//!
//! let sum = a.operation(OperationKind::Addition, &[b]).unwrap();
//! assert_eq!(sum.expression(), "(a + b)");
//! assert!(matches!(model.calls()[0], Call::Operation { kind: OperationKind::Addition, .. }));
//! ```

pub mod model;
pub mod variable;
pub mod vector;

pub use model::{Call, RecordingModel};
pub use variable::{RecordingVariable, VariableId};
pub use vector::{Bounds, IndexedAccess, VectorVariable, BOUNDS, INDEXED_ACCESS};

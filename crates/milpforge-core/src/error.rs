//! Error types for MilpForge

use thiserror::Error;

use crate::operation::OperationKind;

/// Main error type for MilpForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MilpForgeError {
    /// An argument was absent or otherwise unusable.
    ///
    /// Raised when wrapping an absent variable, or when an equality
    /// operator is invoked without a left-hand operand.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A proxy call that targets neither the base variable contract nor a
    /// discovered capability.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Operand domains are incompatible with the requested operation.
    #[error("Domain mismatch: {0}")]
    DomainMismatch(String),

    /// Wrong number of operands for an operation kind.
    #[error("Operation {kind} expects {expected} operand(s), got {actual}")]
    InvalidOperandCount {
        kind: OperationKind,
        expected: usize,
        actual: usize,
    },

    /// Any other failure reported by the model builder.
    #[error("Model error: {0}")]
    Model(String),
}

impl MilpForgeError {
    /// Shorthand for [`MilpForgeError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        MilpForgeError::InvalidArgument(message.into())
    }

    /// Shorthand for [`MilpForgeError::UnsupportedOperation`].
    pub fn unsupported(message: impl Into<String>) -> Self {
        MilpForgeError::UnsupportedOperation(message.into())
    }
}

/// Result type alias for MilpForge operations
pub type Result<T> = std::result::Result<T, MilpForgeError>;

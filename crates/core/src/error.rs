//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures (validation,
/// sequencing, guards). All variants are non-fatal and locally recoverable;
/// infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced product does not exist.
    #[error("not found")]
    NotFound,

    /// A product with the same id is already registered.
    #[error("duplicate product id: {0}")]
    DuplicateId(String),

    /// The requested status is not the immediate successor of the current one.
    #[error("invalid transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    /// A consumer attempted to confirm delivery before payment was recorded.
    #[error("payment required before delivery confirmation")]
    PaymentRequired,

    /// The acting role is not permitted to request the target status.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn invalid_transition(current: impl Into<String>, requested: impl Into<String>) -> Self {
        Self::InvalidTransition {
            current: current.into(),
            requested: requested.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

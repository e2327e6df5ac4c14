//! Error types for the Curio system.
//!
//! Uses `thiserror` for ergonomic error definition.
//!
//! The store itself never raises: unknown ids, unresolvable paths, and
//! inapplicable filters degrade to no-ops or vacuous results. Errors exist
//! for the edges of the system: snapshot I/O, serialization, and one-time
//! request validation.

use thiserror::Error;

/// Convenient result alias for Curio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Curio operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File I/O failed while reading or writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),

    /// A snapshot or payload could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A filter constraint named no recognized operator or predicate.
    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates an I/O error with the given message.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a serialization error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates an invalid-constraint error with the given message.
    #[must_use]
    pub fn invalid_constraint(message: impl Into<String>) -> Self {
        Self::InvalidConstraint(message.into())
    }
}

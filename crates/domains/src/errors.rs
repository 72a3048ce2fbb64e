//! # DomainError
//!
//! Failures raised by entity invariants and by the stores behind the ports.
//! Expected business outcomes (duplicate names, missing references) are not
//! modelled here; each command in `services` has its own closed error enum.

use thiserror::Error;

/// Exceptional conditions surfaced by the domain model and persistence ports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed an entity invariant (blank, too long, malformed).
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A numeric field fell outside its permitted range.
    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    /// A recipe already has a step with this number.
    #[error("step number {step_number} already exists on this recipe")]
    DuplicateStep { step_number: i32 },

    /// An entity expected to exist was not found by the store.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A store constraint (uniqueness, reference) rejected a commit.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store itself failed (connection, decoding, driver errors).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn out_of_range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// A specialized Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

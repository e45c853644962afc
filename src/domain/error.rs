//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid glossary data.
///
/// Tree operations never fail; only name validation does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid name: {0}")]
    InvalidName(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

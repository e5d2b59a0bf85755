//! Domain Layer - Core Entity Trait
//!
//! Every persisted record carries a string id.

use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Position of the entity with `id`, or `NotFound`
pub(crate) fn position_of<T: Entity>(items: &[T], id: &str) -> DomainResult<usize> {
    items
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| DomainError::NotFound(id.to_string()))
}

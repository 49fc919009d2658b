//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent input that does not fit a command shape.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid move command format: '{0}' (expected: move file <source> to <destination>)")]
    InvalidMoveFormat(String),
}

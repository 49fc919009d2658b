//! Domain layer: command model and parsing
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod command;
pub mod error;

pub use command::{normalize, parse, Command, MOVE_DELIMITER};
pub use error::DomainError;

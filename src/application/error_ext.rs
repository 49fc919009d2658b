//! Error conversion helpers for filesystem primitives
//!
//! Each operation names the one `io::ErrorKind` it reports distinctly; every
//! other failure becomes a generic `OperationFailed` with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error. No kind is reported distinctly.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_dir_names(&dir)
    ///     .with_path_context("list directory", &dir)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Like `with_path_context`, but `NotFound` becomes [`ApplicationError::NotFound`].
    fn or_not_found(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Like `with_path_context`, but `AlreadyExists` becomes [`ApplicationError::AlreadyExists`].
    fn or_already_exists(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| translate(e, action, path, None))
    }

    fn or_not_found(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| translate(e, action, path, Some(io::ErrorKind::NotFound)))
    }

    fn or_already_exists(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| translate(e, action, path, Some(io::ErrorKind::AlreadyExists)))
    }
}

fn translate(
    e: io::Error,
    action: &str,
    path: &Path,
    distinct: Option<io::ErrorKind>,
) -> ApplicationError {
    match (distinct, e.kind()) {
        (Some(io::ErrorKind::NotFound), io::ErrorKind::NotFound) => {
            ApplicationError::NotFound(path.to_path_buf())
        }
        (Some(io::ErrorKind::AlreadyExists), io::ErrorKind::AlreadyExists) => {
            ApplicationError::AlreadyExists(path.to_path_buf())
        }
        _ => ApplicationError::OperationFailed {
            context: format!("{} '{}'", action, path.display()),
            source: Box::new(e),
        },
    }
}

//! I/O boundary traits for testability
//!
//! The filesystem primitives the interpreter orchestrates, abstracted so that
//! services can be tested with failing or recording implementations.

use std::fs::Metadata;
use std::io;
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// List entry names of a directory, in the order the OS returns them.
    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Create a new empty file. Fails with `AlreadyExists` if the path exists.
    fn create_new(&self, path: &Path) -> io::Result<()>;

    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create a single directory (non-recursive).
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Metadata of a path, without following a final symlink.
    fn symlink_metadata(&self, path: &Path) -> io::Result<Metadata>;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Rename/move a path (single OS call).
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copy file or directory (auto-detect).
    fn copy_any(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove file or directory (auto-detect).
    fn remove_any(&self, path: &Path) -> io::Result<()>;

    /// Move file or directory, with fallback for cross-device moves.
    ///
    /// Tries atomic rename first. If that fails with EXDEV (cross-device link),
    /// falls back to copy + delete.
    fn move_path(&self, from: &Path, to: &Path) -> io::Result<()> {
        match self.rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                tracing::debug!("cross-device move, copying: {:?} -> {:?}", from, to);
                self.copy_any(from, to)?;
                self.remove_any(from)
            }
            Err(e) => Err(e),
        }
    }
}

fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV = 18 on Unix (cross-device link not permitted)
    #[cfg(unix)]
    const EXDEV: i32 = 18;
    #[cfg(windows)]
    const EXDEV: i32 = 17; // ERROR_NOT_SAME_DEVICE

    e.raw_os_error() == Some(EXDEV)
}

// ============================================================
// REAL IMPLEMENTATION
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<String>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect()
    }

    fn create_new(&self, path: &Path) -> io::Result<()> {
        std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(drop)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir(path)
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<Metadata> {
        std::fs::symlink_metadata(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn copy_any(&self, from: &Path, to: &Path) -> io::Result<()> {
        use walkdir::WalkDir;

        if !from.is_dir() {
            return std::fs::copy(from, to).map(|_| ());
        }

        std::fs::create_dir_all(to)?;
        for entry in WalkDir::new(from) {
            let entry = entry.map_err(io::Error::from)?;
            let rel_path = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
            let target = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else {
                std::fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn remove_any(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }
}

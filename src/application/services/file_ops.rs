//! Filesystem operations service
//!
//! Each operation wraps exactly one filesystem primitive and translates its
//! failure into an [`ApplicationError`]. Arguments are used as given; relative
//! paths resolve against the service root.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Service performing the interpreter's filesystem operations.
pub struct FileOpsService {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl FileOpsService {
    /// Create a new service resolving relative paths against `root`.
    pub fn new(fs: Arc<dyn FileSystem>, root: PathBuf) -> Self {
        Self { fs, root }
    }

    /// Resolve an argument against the root. An empty argument stays empty so
    /// the OS reports on it exactly as typed.
    fn resolve(&self, arg: &str) -> PathBuf {
        if arg.is_empty() {
            PathBuf::new()
        } else {
            self.root.join(arg)
        }
    }

    /// List entry names of `dir` (default: root), in OS order.
    #[instrument(skip(self))]
    pub fn list(&self, dir: Option<&str>) -> ApplicationResult<Vec<String>> {
        let (path, shown) = match dir {
            Some(d) => (self.resolve(d), Path::new(d)),
            None => (self.root.clone(), Path::new(".")),
        };
        let names = self
            .fs
            .read_dir_names(&path)
            .with_path_context("list directory", shown)?;
        debug!("list: {} entries in {}", names.len(), path.display());
        Ok(names)
    }

    /// Create a new empty file; an existing file is left untouched.
    #[instrument(skip(self))]
    pub fn create_file(&self, name: &str) -> ApplicationResult<()> {
        self.fs
            .create_new(&self.resolve(name))
            .or_already_exists("create file", Path::new(name))
    }

    /// Read full file contents as text.
    #[instrument(skip(self))]
    pub fn read_file(&self, name: &str) -> ApplicationResult<String> {
        self.fs
            .read_to_string(&self.resolve(name))
            .or_not_found("read file", Path::new(name))
    }

    /// Remove a file.
    #[instrument(skip(self))]
    pub fn delete_file(&self, name: &str) -> ApplicationResult<()> {
        self.fs
            .remove_file(&self.resolve(name))
            .or_not_found("delete file", Path::new(name))
    }

    /// Create one directory; parents are not created.
    #[instrument(skip(self))]
    pub fn create_folder(&self, name: &str) -> ApplicationResult<()> {
        self.fs
            .create_dir(&self.resolve(name))
            .or_already_exists("create folder", Path::new(name))
    }

    /// Move or rename `source` to `destination`.
    ///
    /// If `destination` is an existing directory, `source` is moved into it
    /// under its own file name; an entry of that name already there is a
    /// generic failure and nothing is overwritten. Returns the path the
    /// source ended up at, relative to the root.
    #[instrument(skip(self))]
    pub fn move_path(&self, source: &str, destination: &str) -> ApplicationResult<PathBuf> {
        let from = self.resolve(source);
        self.fs
            .symlink_metadata(&from)
            .or_not_found("move file", Path::new(source))?;

        let mut to = self.resolve(destination);
        let mut shown = PathBuf::from(destination);
        if self.fs.is_dir(&to) {
            if let Some(name) = from.file_name() {
                to.push(name);
                shown.push(name);
                if self.fs.symlink_metadata(&to).is_ok() {
                    let taken = io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "destination path already exists",
                    );
                    return Err::<PathBuf, _>(taken).with_path_context("move file", &shown);
                }
            }
        }
        debug!("move: {} -> {}", from.display(), to.display());

        self.fs
            .move_path(&from, &to)
            .with_path_context("move file", Path::new(source))?;
        Ok(shown)
    }
}

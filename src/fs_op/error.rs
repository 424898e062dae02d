use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by the filesystem operation helpers.
///
/// Callers can tell "not found" apart from "permission denied" apart from any
/// other I/O failure; none of these are swallowed by the helpers.
#[derive(Error, Debug)]
pub enum FsOpError {
    /// The source path does not exist.
    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// The destination (or source) could not be accessed.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// A rename target is already taken.
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A file was expected but a directory was found.
    #[error("is a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    /// The path has no final component (e.g. `/` or `..`).
    #[error("path has no file name: {}", .0.display())]
    MissingFilename(PathBuf),

    /// Any other I/O failure, with the path it happened on.
    #[error("I/O error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Contextual error that includes source and destination paths.
    #[error("copy failed from `{}` to `{}`: {msg}", .src.display(), .dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        msg: String,
    },
}

impl FsOpError {
    /// Classify an `io::Error` raised while working on `path`.
    pub fn from_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => FsOpError::NotFound(path),
            io::ErrorKind::PermissionDenied => FsOpError::PermissionDenied(path),
            io::ErrorKind::AlreadyExists => FsOpError::AlreadyExists(path),
            _ => FsOpError::Io { path, source },
        }
    }

    /// Returns `true` when the error means the path was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsOpError::NotFound(_))
    }
}

/// Extension used to attach a path to `io::Result` values.
pub(crate) trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T, FsOpError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T, FsOpError> {
        self.map_err(|e| FsOpError::from_io(path, e))
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::fs_op::error::{FsOpError, IoResultExt};

/// Lightweight classification of a filesystem path's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// The path does not exist.
    NotFound,
    /// The path exists and is a directory.
    Directory,
    /// The path exists and is a regular file.
    File,
    /// The path exists but is neither a regular file nor a directory
    /// (for example: socket, FIFO, block device, dangling symlink).
    Other,
}

impl PathType {
    /// Classify `path` and return its `PathType`.
    ///
    /// Symlinks are followed, so a link to a directory is a `Directory`.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        match fs::metadata(path.as_ref()) {
            Err(_) => {
                // A dangling symlink still occupies the name.
                if fs::symlink_metadata(path.as_ref()).is_ok() {
                    PathType::Other
                } else {
                    PathType::NotFound
                }
            }
            Ok(md) if md.is_dir() => PathType::Directory,
            Ok(md) if md.is_file() => PathType::File,
            Ok(_) => PathType::Other,
        }
    }
}

/// Return `true` if something occupies `path`.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) != PathType::NotFound
}

/// Return `true` if the provided `path` is a directory.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::Directory
}

/// Return `true` if the provided `path` is a regular file.
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::File
}

/// A snapshot of one file or directory on disk.
///
/// Nodes are read-only views; nothing in this crate creates a node's backing
/// file through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub path: PathBuf,
    pub kind: PathType,
    pub modified: Option<SystemTime>,
    pub size: u64,
}

impl FileNode {
    /// Stat `path`, following symlinks.
    pub fn stat(path: impl AsRef<Path>) -> Result<Self, FsOpError> {
        let path = path.as_ref();
        let md = fs::metadata(path).at(path)?;
        let kind = if md.is_dir() {
            PathType::Directory
        } else if md.is_file() {
            PathType::File
        } else {
            PathType::Other
        };
        Ok(FileNode {
            path: path.to_path_buf(),
            kind,
            modified: md.modified().ok(),
            size: md.len(),
        })
    }

    pub fn is_dir(&self) -> bool {
        self.kind == PathType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == PathType::File
    }

    /// Final path component as a `String` (lossy).
    pub fn name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

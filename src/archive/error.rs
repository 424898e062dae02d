use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

use crate::fs_op::FsOpError;

/// Errors returned while packing, listing or unpacking archives.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The path to archive does not exist.
    #[error("nothing to archive at {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem failure while reading the tree or writing the output.
    #[error(transparent)]
    Fs(#[from] FsOpError),

    /// The container could not be written or parsed.
    #[error("zip error: {0}")]
    Zip(#[from] ZipError),

    /// An entry name would land outside the extraction directory.
    #[error("refusing unsafe entry name `{0}`")]
    UnsafeEntry(String),
}

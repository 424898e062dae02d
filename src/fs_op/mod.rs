//! Filesystem helpers: copy, move, delete, rename, read and write.
//!
//! Every operation returns a `Result` with an [`FsOpError`] describing what
//! went wrong; nothing is logged-and-swallowed. Progress and completed work
//! are reported through `tracing`, so the caller's subscriber decides what
//! gets recorded.

pub mod copy;
pub mod error;
pub mod helpers;
pub(crate) mod metadata;
pub mod mv;
pub mod naming;
pub mod read;
pub mod remove;
pub mod size;
pub mod stat;
pub mod write;

pub use copy::{copy_path, copy_path_with, CopySettings};
pub use error::FsOpError;
pub use mv::{move_path, move_path_with, rename_path};
pub use naming::{file_extension, file_stem, resolve_name, CollisionSuffix};
pub use read::{read_bytes, read_prefix, read_to_string};
pub use remove::remove_path;
pub use size::{readable_size, readable_size_of};
pub use stat::{exists, is_dir, is_file, FileNode, PathType};
pub use write::{write_to_file, WriteMode};

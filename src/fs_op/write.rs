use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::fs_op::error::{FsOpError, IoResultExt};
use crate::fs_op::helpers::atomic_write;
use crate::fs_op::stat::PathType;

/// How [`write_to_file`] treats existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file's content.
    Overwrite,
    /// Keep the existing bytes and add the new ones after them.
    Append,
}

/// Write `content` to an existing regular file.
///
/// The file must already exist: this helper never creates files, so a typo in
/// the path surfaces as [`FsOpError::NotFound`] instead of a stray new file.
/// Overwrites go through a temp file and rename. Appends are raw bytes, so
/// binary payloads survive unchanged.
pub fn write_to_file(
    path: impl AsRef<Path>,
    content: impl AsRef<[u8]>,
    mode: WriteMode,
) -> Result<(), FsOpError> {
    let p = path.as_ref();
    let content = content.as_ref();

    match PathType::of(p) {
        PathType::NotFound => return Err(FsOpError::NotFound(p.to_path_buf())),
        PathType::Directory => return Err(FsOpError::IsDirectory(p.to_path_buf())),
        _ => {}
    }

    match mode {
        WriteMode::Overwrite => atomic_write(p, content).at(p)?,
        WriteMode::Append => {
            let mut f = OpenOptions::new().append(true).open(p).at(p)?;
            f.write_all(content).at(p)?;
            f.flush().at(p)?;
        }
    }
    tracing::debug!(path = %p.display(), bytes = content.len(), ?mode, "wrote file");
    Ok(())
}

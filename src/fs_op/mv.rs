use std::fs;
use std::path::{Path, PathBuf};

use crate::fs_op::copy::{copy_path_with, CopySettings};
use crate::fs_op::error::{FsOpError, IoResultExt};
use crate::fs_op::remove::remove_path;
use crate::fs_op::stat::exists;

/// Rename a path within the same parent directory.
///
/// Refuses to replace anything: if `new_name` is already taken the call fails
/// with [`FsOpError::AlreadyExists`]. Returns the new path.
pub fn rename_path<P: AsRef<Path>>(path: P, new_name: &str) -> Result<PathBuf, FsOpError> {
    let p = path.as_ref();
    if !exists(p) {
        return Err(FsOpError::NotFound(p.to_path_buf()));
    }
    if new_name.is_empty() || new_name.contains(['/', '\\']) {
        return Err(FsOpError::MissingFilename(PathBuf::from(new_name)));
    }
    let parent = p
        .parent()
        .ok_or_else(|| FsOpError::MissingFilename(p.to_path_buf()))?;
    let dest = parent.join(new_name);
    if exists(&dest) {
        return Err(FsOpError::AlreadyExists(dest));
    }
    fs::rename(p, &dest).at(p)?;
    tracing::info!(from = %p.display(), to = %dest.display(), "renamed");
    Ok(dest)
}

/// Move `src` into the directory `dest` using default copy settings.
pub fn move_path<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> Result<PathBuf, FsOpError> {
    move_path_with(src, dest, &CopySettings::default())
}

/// Move `src` into `dest` as a copy followed by removal of the source.
///
/// Naming follows [`copy_path_with`], so a taken name gets a `(n)` counter.
/// The source is only removed once the copy finished; a failed copy leaves the
/// source intact.
pub fn move_path_with<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dest: Q,
    settings: &CopySettings,
) -> Result<PathBuf, FsOpError> {
    let s = src.as_ref();
    let copied = copy_path_with(s, dest.as_ref(), settings)?;
    remove_path(s)?;
    tracing::info!(from = %s.display(), to = %copied.display(), "moved");
    Ok(copied)
}

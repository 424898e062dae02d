//! Carry permissions and timestamps from a source path over to its copy.

use std::fs;
use std::io;
use std::path::Path;

use filetime::{set_file_times, FileTime};

/// Copy permission bits from `src` to `dst`.
pub(crate) fn copy_permissions(src: &Path, dst: &Path) -> io::Result<()> {
    let perms = fs::metadata(src)?.permissions();
    fs::set_permissions(dst, perms)
}

/// Copy access and modification times from `src` to `dst`.
pub(crate) fn copy_times(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    let mtime = FileTime::from_last_modification_time(&meta);
    let atime = FileTime::from_last_access_time(&meta);
    set_file_times(dst, atime, mtime)
}

/// Preserve metadata from `src` to `dst` for a single file.
///
/// Permissions and timestamps are both propagated as errors; a failure here
/// means the copy is not faithful.
pub(crate) fn preserve_file_metadata(src: &Path, dst: &Path) -> io::Result<()> {
    copy_permissions(src, dst)?;
    copy_times(src, dst)
}

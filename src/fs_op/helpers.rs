use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use fs_extra::file::{copy as fs_extra_copy, CopyOptions};

use crate::fs_op::metadata::copy_permissions;

/// Default buffer used for chunked file copies.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Ensure parent directory exists for a path.
pub fn ensure_parent_exists(p: &Path) -> io::Result<()> {
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

// Temp names combine pid, clock and a process-wide sequence so rapid calls
// never reuse a name.
fn temp_sibling(target: &Path, tag: &str) -> PathBuf {
    static NEXT_ID: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let raw = format!("{:x}{:x}{:x}", std::process::id(), nanos, seq);
    let suffix = &raw[raw.len().saturating_sub(12)..];
    let dir = target.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!(".tmp_{}.{}", tag, suffix))
}

/// Write `data` to `target` atomically by writing to a temporary file in the
/// same directory and then renaming into place.
///
/// A symlinked `target` is followed, so the link survives and the file it
/// points to receives the data. An existing file keeps its permission bits.
pub fn atomic_write(target: &Path, data: &[u8]) -> io::Result<()> {
    let target = &resolve_link(target)?;
    ensure_parent_exists(target)?;
    let tmp = temp_sibling(target, "atomic_write");
    let staged = fs::write(&tmp, data).and_then(|()| {
        if target.is_file() {
            copy_permissions(target, &tmp)?;
        }
        Ok(())
    });
    if let Err(e) = staged {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, target).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}

// Final path behind `target`. Missing targets and dangling links stay as given.
fn resolve_link(target: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(target) {
        Ok(p) => Ok(p),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(target.to_path_buf()),
        Err(e) => Err(e),
    }
}

/// Copy a single file atomically: copy into a temp file in the destination
/// directory with a `buffer_size` chunked copy, then rename into place.
/// Returns the number of bytes copied.
pub fn atomic_copy_file(src: &Path, dst: &Path, buffer_size: usize) -> io::Result<u64> {
    ensure_parent_exists(dst)?;
    let tmp = temp_sibling(dst, "atomic_copy");

    let mut options = CopyOptions::new();
    options.overwrite = false;
    options.buffer_size = buffer_size.max(1);

    let copied = match fs_extra_copy(src, &tmp, &options) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(into_io(e));
        }
    };
    fs::rename(&tmp, dst).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })?;
    Ok(copied)
}

// fs_extra wraps io errors; unwrap them so the caller can still classify by kind.
fn into_io(e: fs_extra::error::Error) -> io::Error {
    use fs_extra::error::ErrorKind;
    let message = e.to_string();
    match e.kind {
        ErrorKind::Io(inner) => inner,
        ErrorKind::NotFound => io::Error::new(io::ErrorKind::NotFound, message),
        ErrorKind::PermissionDenied => io::Error::new(io::ErrorKind::PermissionDenied, message),
        ErrorKind::AlreadyExists => io::Error::new(io::ErrorKind::AlreadyExists, message),
        _ => io::Error::other(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn leftovers(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp_"))
            .count()
    }

    #[test]
    fn atomic_write_replaces_content() {
        let td = tempdir().unwrap();
        let target = td.path().join("out.txt");
        fs::write(&target, b"old contents").unwrap();

        atomic_write(&target, b"new").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert_eq!(leftovers(td.path()), 0);
    }

    #[test]
    fn atomic_copy_creates_parents() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.bin");
        fs::write(&src, vec![7u8; 200_000]).unwrap();
        let dst = td.path().join("a/b/dst.bin");

        let n = atomic_copy_file(&src, &dst, 1024).unwrap();
        assert_eq!(n, 200_000);
        assert_eq!(fs::read(&dst).unwrap(), fs::read(&src).unwrap());
        assert_eq!(leftovers(&td.path().join("a/b")), 0);
    }

    #[test]
    fn atomic_copy_missing_source_is_not_found() {
        let td = tempdir().unwrap();
        let err = atomic_copy_file(
            &td.path().join("missing"),
            &td.path().join("dst"),
            DEFAULT_BUFFER_SIZE,
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(leftovers(td.path()), 0);
    }
}

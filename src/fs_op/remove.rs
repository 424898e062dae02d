use std::fs;
use std::path::Path;

use crate::fs_op::error::{FsOpError, IoResultExt};
use crate::fs_op::stat::PathType;

/// Remove a file or directory at `path`.
///
/// Directories are removed recursively. A missing path is reported as
/// [`FsOpError::NotFound`] so callers can tell "nothing was there" apart from
/// a successful delete. Symlinks are removed themselves, never their target.
pub fn remove_path(path: impl AsRef<Path>) -> Result<(), FsOpError> {
    let p = path.as_ref();

    let is_link = fs::symlink_metadata(p)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);

    match PathType::of(p) {
        PathType::NotFound => return Err(FsOpError::NotFound(p.to_path_buf())),
        PathType::Directory if !is_link => fs::remove_dir_all(p).at(p)?,
        _ => fs::remove_file(p).at(p)?,
    }

    tracing::info!(path = %p.display(), "removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remove_file_and_dir_ok() {
        let td = tempdir().expect("create temp dir");
        let dir = td.path().join("sub");
        std::fs::create_dir_all(dir.join("nested")).expect("create subdir");
        let f = dir.join("f.txt");
        std::fs::write(&f, b"x").expect("write file");

        remove_path(&f).expect("remove file");
        assert!(!f.exists(), "file should be removed");

        remove_path(&dir).expect("remove dir");
        assert!(!dir.exists(), "dir should be removed");
    }

    #[test]
    fn remove_nonexistent_is_not_found() {
        let td = tempdir().expect("tempdir");
        let p = td.path().join("does_not_exist");
        let err = remove_path(&p).unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_dir_removes_link_only() {
        let td = tempdir().expect("tempdir");
        let target = td.path().join("target");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), b"k").unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        remove_path(&link).unwrap();
        assert!(!link.exists());
        assert!(target.join("keep.txt").exists());
    }
}

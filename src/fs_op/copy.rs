use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::fs_op::error::{FsOpError, IoResultExt};
use crate::fs_op::helpers::{atomic_copy_file, atomic_write, DEFAULT_BUFFER_SIZE};
use crate::fs_op::metadata::{copy_times, preserve_file_metadata};
use crate::fs_op::naming::resolve_name;
use crate::fs_op::stat::PathType;

/// Knobs for file copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySettings {
    /// Chunk size used when streaming file contents.
    pub buffer_size: usize,
    /// Carry permissions and modification times over to the copy.
    pub preserve_times: bool,
}

impl Default for CopySettings {
    fn default() -> Self {
        CopySettings {
            buffer_size: DEFAULT_BUFFER_SIZE,
            preserve_times: true,
        }
    }
}

/// Copy `src` into the directory `dest` with default settings.
///
/// See [`copy_path_with`].
pub fn copy_path<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> Result<PathBuf, FsOpError> {
    copy_path_with(src, dest, &CopySettings::default())
}

/// Copy a file or directory into `dest`, never overwriting existing entries.
///
/// `dest` names the directory that receives the copy and is created when
/// missing. The copy keeps the source's name unless that name is taken, in
/// which case a `(n)` counter is added (see [`resolve_name`]). Directories are
/// copied recursively. The one exception is a `dest` that is an existing
/// regular file while `src` is a file: its content is replaced.
///
/// Returns the path of the created copy. A failure part way through a
/// directory copy leaves whatever was already copied in place.
pub fn copy_path_with<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dest: Q,
    settings: &CopySettings,
) -> Result<PathBuf, FsOpError> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    match PathType::of(src) {
        PathType::NotFound => Err(FsOpError::NotFound(src.to_path_buf())),
        PathType::File => copy_file_into(src, dest, settings),
        PathType::Directory => copy_dir_into(src, dest, settings),
        PathType::Other => Err(FsOpError::Copy {
            src: src.to_path_buf(),
            dst: dest.to_path_buf(),
            msg: "source is neither a file nor a directory".to_string(),
        }),
    }
}

fn copy_file_into(src: &Path, dest: &Path, settings: &CopySettings) -> Result<PathBuf, FsOpError> {
    if PathType::of(dest) == PathType::File {
        let data = fs::read(src).at(src)?;
        atomic_write(dest, &data).at(dest)?;
        if settings.preserve_times {
            copy_times(src, dest).at(dest)?;
        }
        tracing::info!(src = %src.display(), dst = %dest.display(), "replaced file contents");
        return Ok(dest.to_path_buf());
    }

    fs::create_dir_all(dest).at(dest)?;
    let name = src
        .file_name()
        .ok_or_else(|| FsOpError::MissingFilename(src.to_path_buf()))?;
    let target = dest.join(resolve_name(dest.join(name))?);

    copy_one_file(src, &target, settings)?;
    tracing::info!(src = %src.display(), dst = %target.display(), "copied file");
    Ok(target)
}

fn copy_dir_into(src: &Path, dest: &Path, settings: &CopySettings) -> Result<PathBuf, FsOpError> {
    // Copying a directory into itself would keep finding its own copy. Checked
    // on the closest existing ancestor so a refused copy creates nothing.
    let src_abs = fs::canonicalize(src).at(src)?;
    let anchor = existing_ancestor(dest);
    let anchor_abs = fs::canonicalize(anchor).at(anchor)?;
    if anchor_abs.starts_with(&src_abs) {
        return Err(FsOpError::Copy {
            src: src.to_path_buf(),
            dst: dest.to_path_buf(),
            msg: "destination is inside the source directory".to_string(),
        });
    }
    fs::create_dir_all(dest).at(dest)?;

    // Keep a symlink's own name; fall back to the resolved name for `.`-like paths.
    let name = src
        .file_name()
        .or_else(|| src_abs.file_name())
        .ok_or_else(|| FsOpError::MissingFilename(src.to_path_buf()))?;
    let root = dest.join(resolve_name(dest.join(name))?);
    fs::create_dir(&root).at(&root)?;

    let mut files = 0usize;
    for entry in WalkDir::new(&src_abs).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| walk_error(&src_abs, &root, e))?;
        let from = entry.path();
        let rel = from.strip_prefix(&src_abs).map_err(|e| FsOpError::Copy {
            src: from.to_path_buf(),
            dst: root.clone(),
            msg: e.to_string(),
        })?;
        let to = root.join(rel);

        let ft = entry.file_type();
        if ft.is_dir() {
            fs::create_dir_all(&to).at(&to)?;
        } else if ft.is_file() {
            copy_one_file(from, &to, settings)?;
            files += 1;
        } else {
            tracing::warn!(path = %from.display(), "skipping special file");
        }
    }

    tracing::info!(src = %src.display(), dst = %root.display(), files, "copied directory");
    Ok(root)
}

fn copy_one_file(from: &Path, to: &Path, settings: &CopySettings) -> Result<(), FsOpError> {
    atomic_copy_file(from, to, settings.buffer_size).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound if !from.exists() => FsOpError::NotFound(from.to_path_buf()),
        _ => FsOpError::from_io(to, e),
    })?;
    if settings.preserve_times {
        preserve_file_metadata(from, to).at(to)?;
    }
    tracing::debug!(from = %from.display(), to = %to.display(), "copied entry");
    Ok(())
}

fn existing_ancestor(path: &Path) -> &Path {
    path.ancestors()
        .find(|p| !p.as_os_str().is_empty() && p.exists())
        .unwrap_or_else(|| Path::new("."))
}

pub(crate) fn walk_error(root: &Path, dst: &Path, e: walkdir::Error) -> FsOpError {
    let path = e
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let msg = e.to_string();
    match e.into_io_error() {
        Some(io) => FsOpError::from_io(path, io),
        None => FsOpError::Copy {
            src: path,
            dst: dst.to_path_buf(),
            msg,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_copy_into_missing_directory() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"alpha").unwrap();

        let out = copy_path(&src, td.path().join("out")).unwrap();
        assert_eq!(out, td.path().join("out").join("a.txt"));
        assert_eq!(fs::read(&out).unwrap(), b"alpha");
        assert!(src.exists(), "source must be untouched");
    }

    #[test]
    fn repeated_copies_get_counters() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"alpha").unwrap();
        let out = td.path().join("out");

        let first = copy_path(&src, &out).unwrap();
        let second = copy_path(&src, &out).unwrap();
        let third = copy_path(&src, &out).unwrap();
        assert_eq!(first.file_name().unwrap(), "a.txt");
        assert_eq!(second.file_name().unwrap(), "a(0).txt");
        assert_eq!(third.file_name().unwrap(), "a(1).txt");
    }

    #[test]
    fn file_onto_existing_file_replaces_it() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        let dst = td.path().join("b.txt");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old and longer").unwrap();

        let out = copy_path(&src, &dst).unwrap();
        assert_eq!(out, dst);
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn directory_copy_is_recursive() {
        let td = tempdir().unwrap();
        let src = td.path().join("tree");
        fs::create_dir_all(src.join("inner/empty")).unwrap();
        fs::write(src.join("top.txt"), b"top").unwrap();
        fs::write(src.join("inner/deep.txt"), b"deep").unwrap();

        let out = copy_path(&src, td.path().join("dest")).unwrap();
        assert_eq!(out, td.path().join("dest").join("tree"));
        assert_eq!(fs::read(out.join("top.txt")).unwrap(), b"top");
        assert_eq!(fs::read(out.join("inner/deep.txt")).unwrap(), b"deep");
        assert!(out.join("inner/empty").is_dir());

        let again = copy_path(&src, td.path().join("dest")).unwrap();
        assert_eq!(again.file_name().unwrap(), "tree(0)");
    }

    #[test]
    fn empty_directory_copy() {
        let td = tempdir().unwrap();
        let src = td.path().join("empty");
        fs::create_dir(&src).unwrap();

        let out = copy_path(&src, td.path().join("dest")).unwrap();
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn missing_source_is_not_found() {
        let td = tempdir().unwrap();
        let err = copy_path(td.path().join("nope"), td.path().join("dest")).unwrap_err();
        assert!(err.is_not_found());
        assert!(!td.path().join("dest").exists());
    }

    #[test]
    fn copy_into_itself_is_rejected() {
        let td = tempdir().unwrap();
        let src = td.path().join("loop");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("f"), b"x").unwrap();

        let err = copy_path(&src, src.join("nested")).unwrap_err();
        assert!(matches!(err, FsOpError::Copy { .. }));
        assert!(!src.join("nested").exists(), "refused copy must not create dest");

        let err = copy_path(&src, src.join("a/b")).unwrap_err();
        assert!(matches!(err, FsOpError::Copy { .. }));
        assert!(!src.join("a").exists());
    }

    #[cfg(unix)]
    #[test]
    fn file_onto_existing_file_keeps_dest_mode() {
        use std::os::unix::fs::PermissionsExt;

        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        let dst = td.path().join("tool");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();
        fs::set_permissions(&dst, fs::Permissions::from_mode(0o750)).unwrap();

        copy_path(&src, &dst).unwrap();
        assert_eq!(fs::metadata(&dst).unwrap().permissions().mode() & 0o777, 0o750);
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }
}

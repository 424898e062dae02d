use std::fs;
use std::path::Path;

use crate::fs_op::error::{FsOpError, IoResultExt};
use crate::fs_op::stat::PathType;

/// Read the whole content of a regular file.
pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>, FsOpError> {
    let p = path.as_ref();
    match PathType::of(p) {
        PathType::NotFound => Err(FsOpError::NotFound(p.to_path_buf())),
        PathType::Directory => Err(FsOpError::IsDirectory(p.to_path_buf())),
        _ => fs::read(p).at(p),
    }
}

/// Read a file as text. Invalid UTF-8 sequences become U+FFFD.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String, FsOpError> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read at most `len` leading bytes of a file.
pub fn read_prefix(path: impl AsRef<Path>, len: usize) -> Result<Vec<u8>, FsOpError> {
    use std::io::Read;

    let p = path.as_ref();
    if PathType::of(p) == PathType::Directory {
        return Err(FsOpError::IsDirectory(p.to_path_buf()));
    }
    let file = fs::File::open(p).at(p)?;
    let mut buf = Vec::with_capacity(len);
    file.take(len as u64).read_to_end(&mut buf).at(p)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_bytes_and_text() {
        let td = tempdir().unwrap();
        let f = td.path().join("t.txt");
        fs::write(&f, b"hi \xff there").unwrap();

        assert_eq!(read_bytes(&f).unwrap(), b"hi \xff there");
        assert_eq!(read_to_string(&f).unwrap(), "hi \u{FFFD} there");
        assert_eq!(read_prefix(&f, 2).unwrap(), b"hi");
    }

    #[test]
    fn directory_and_missing_are_errors() {
        let td = tempdir().unwrap();
        assert!(matches!(read_bytes(td.path()), Err(FsOpError::IsDirectory(_))));
        assert!(read_bytes(td.path().join("nope")).unwrap_err().is_not_found());
        assert!(read_prefix(td.path().join("nope"), 4).unwrap_err().is_not_found());
    }
}

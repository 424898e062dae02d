use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::archive::entry::{ArchiveEntry, EntryKind};
use crate::archive::error::ArchiveError;
use crate::fs_op::error::IoResultExt;

fn open(archive: &Path) -> Result<ZipArchive<File>, ArchiveError> {
    if !archive.exists() {
        return Err(ArchiveError::NotFound(archive.to_path_buf()));
    }
    let file = File::open(archive).at(archive)?;
    Ok(ZipArchive::new(file)?)
}

/// List the entries of an archive in stored order.
pub fn read_entries(archive: impl AsRef<Path>) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let mut zip = open(archive.as_ref())?;
    let mut entries = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let file = zip.by_index(i)?;
        entries.push(ArchiveEntry {
            name: file.name().to_string(),
            kind: if file.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            size: file.size(),
            modified: file.last_modified(),
        });
    }
    Ok(entries)
}

/// Unpack every entry of `archive` under `dest`.
///
/// Entry names that would escape `dest` (absolute paths, `..`) abort the
/// extraction with [`ArchiveError::UnsafeEntry`]. Existing files are
/// overwritten. Returns the written file paths in archive order.
pub fn extract(archive: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<Vec<PathBuf>, ArchiveError> {
    let archive = archive.as_ref();
    let dest = dest.as_ref();
    let mut zip = open(archive)?;
    fs::create_dir_all(dest).at(dest)?;

    let mut written = Vec::new();
    for i in 0..zip.len() {
        let mut file = zip.by_index(i)?;
        let rel = file
            .enclosed_name()
            .ok_or_else(|| ArchiveError::UnsafeEntry(file.name().to_string()))?;
        let target = dest.join(rel);

        if file.is_dir() {
            fs::create_dir_all(&target).at(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        let mut out = File::create(&target).at(&target)?;
        io::copy(&mut file, &mut out).at(&target)?;
        tracing::debug!(entry = %file.name(), path = %target.display(), "extracted");
        written.push(target);
    }
    tracing::info!(archive = %archive.display(), files = written.len(), "archive extracted");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    #[test]
    fn lists_kinds_and_sizes() {
        let td = tempdir().unwrap();
        let path = td.path().join("t.zip");
        let mut w = zip::ZipWriter::new(File::create(&path).unwrap());
        w.add_directory("d/", SimpleFileOptions::default()).unwrap();
        w.start_file("d/f.txt", SimpleFileOptions::default()).unwrap();
        w.write_all(b"abcd").unwrap();
        w.finish().unwrap();

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_dir());
        assert_eq!(entries[1].name, "d/f.txt");
        assert_eq!(entries[1].size, 4);
    }

    #[test]
    fn unsafe_names_are_refused() {
        let td = tempdir().unwrap();
        let path = td.path().join("evil.zip");
        let mut w = zip::ZipWriter::new(File::create(&path).unwrap());
        w.start_file("../evil.txt", SimpleFileOptions::default()).unwrap();
        w.write_all(b"x").unwrap();
        w.finish().unwrap();

        let out = td.path().join("out");
        let err = extract(&path, &out).unwrap_err();
        assert!(matches!(err, ArchiveError::UnsafeEntry(_)));
        assert!(!td.path().join("evil.txt").exists());
    }

    #[test]
    fn missing_archive_is_not_found() {
        let td = tempdir().unwrap();
        let err = read_entries(td.path().join("none.jar")).unwrap_err();
        assert!(matches!(err, ArchiveError::NotFound(_)));
    }
}

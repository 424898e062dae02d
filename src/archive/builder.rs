//! Pack a file or directory tree into a JAR-style archive.
//!
//! The output is a ZIP container whose first entry is
//! `META-INF/MANIFEST.MF`. Entry names are relative to the *parent* of the
//! archived root, so packing `/data/site` yields `site/index.html` and a
//! closing `site/` directory marker.
//!
//! Children are visited in file-name order, and a directory's marker is
//! written after everything it contains. The tree is assumed not to change
//! while it is being packed.

use std::fs::{self, File};
use std::io::{self, BufReader, Seek, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::archive::entry::{entry_name, zip_time};
use crate::archive::error::ArchiveError;
use crate::archive::options::ArchiveOptions;
use crate::fs_op::copy::walk_error;
use crate::fs_op::error::{FsOpError, IoResultExt};

/// Path of the manifest entry.
pub const MANIFEST_NAME: &str = "META-INF/MANIFEST.MF";

/// Summary of a finished archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub path: PathBuf,
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

/// Writes archives with a fixed set of [`ArchiveOptions`].
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    options: ArchiveOptions,
}

impl ArchiveBuilder {
    pub fn new(options: ArchiveOptions) -> Self {
        ArchiveBuilder { options }
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    /// Pack `root` into `output_dir`, returning the archive path.
    ///
    /// `output_dir` is created when missing. The archive is named after
    /// `output_name` when given, else after `root`, with the configured
    /// extension appended when missing. An existing file of that name is
    /// replaced. Any I/O failure aborts the build; a partly written archive
    /// may remain.
    pub fn build(
        &self,
        root: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        output_name: Option<&str>,
    ) -> Result<PathBuf, ArchiveError> {
        self.build_report(root, output_dir, output_name).map(|r| r.path)
    }

    /// Like [`build`](Self::build) but also returns entry counts.
    pub fn build_report(
        &self,
        root: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        output_name: Option<&str>,
    ) -> Result<BuildReport, ArchiveError> {
        let root = root.as_ref();
        let output_dir = output_dir.as_ref();

        if !root.exists() {
            return Err(ArchiveError::NotFound(root.to_path_buf()));
        }
        fs::create_dir_all(output_dir).at(output_dir)?;

        let root_abs = fs::canonicalize(root).at(root)?;
        let root_name = root_abs
            .file_name()
            .ok_or_else(|| FsOpError::MissingFilename(root.to_path_buf()))?
            .to_string_lossy()
            .into_owned();
        let output = output_dir.join(self.options.output_name(&root_name, output_name));

        // Creating the archive truncates whatever sits at its path first.
        if fs::canonicalize(&output).is_ok_and(|p| p == root_abs) {
            return Err(FsOpError::AlreadyExists(output).into());
        }

        let file = File::create(&output).at(&output)?;
        // Canonical form of the output so the walk can skip it when the archive
        // is written inside the tree being packed.
        let output_abs = fs::canonicalize(&output).at(&output)?;

        let mut stats = self.write_tree(&root_abs, file, Some(&output_abs))?;
        stats.path = output;
        tracing::info!(
            archive = %stats.path.display(),
            files = stats.files,
            directories = stats.directories,
            bytes = stats.bytes,
            "archive written"
        );
        Ok(stats)
    }

    /// Pack `root` into an arbitrary seekable writer and hand the writer back.
    pub fn write_to<W: Write + Seek>(&self, root: impl AsRef<Path>, writer: W) -> Result<W, ArchiveError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(ArchiveError::NotFound(root.to_path_buf()));
        }
        let root_abs = fs::canonicalize(root).at(root)?;
        let mut zip = ZipWriter::new(writer);
        self.write_entries(&root_abs, &mut zip, None)?;
        Ok(zip.finish()?)
    }

    fn write_tree<W: Write + Seek>(
        &self,
        root: &Path,
        writer: W,
        skip: Option<&Path>,
    ) -> Result<BuildReport, ArchiveError> {
        let mut zip = ZipWriter::new(writer);
        let stats = self.write_entries(root, &mut zip, skip)?;
        zip.finish()?;
        Ok(stats)
    }

    fn write_entries<W: Write + Seek>(
        &self,
        root: &Path,
        zip: &mut ZipWriter<W>,
        skip: Option<&Path>,
    ) -> Result<BuildReport, ArchiveError> {
        let base = root.parent().unwrap_or(root);
        let mut stats = BuildReport {
            path: PathBuf::new(),
            files: 0,
            directories: 0,
            bytes: 0,
        };

        self.write_manifest(zip)?;

        let walker = WalkDir::new(root)
            .follow_links(true)
            .contents_first(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(root, root, e))?;
            let path = entry.path();
            if skip.is_some_and(|s| s == path) {
                tracing::debug!(path = %path.display(), "skipping the archive being written");
                continue;
            }
            let Some(name) = entry_name(base, path) else {
                tracing::warn!(path = %path.display(), "entry outside archive root, skipped");
                continue;
            };

            let meta = entry.metadata().ok();
            let mut opts = SimpleFileOptions::default()
                .compression_method(self.options.compression.into())
                .large_file(meta.as_ref().is_some_and(|m| needs_zip64(m.len())));
            if let Some(t) = meta.and_then(|m| m.modified().ok()) {
                opts = opts.last_modified_time(zip_time(t));
            }

            let ft = entry.file_type();
            if ft.is_dir() {
                if name.is_empty() {
                    continue;
                }
                zip.add_directory(format!("{}/", name), opts)?;
                stats.directories += 1;
                tracing::debug!(entry = %name, "directory entry");
            } else if ft.is_file() {
                zip.start_file(name.clone(), opts)?;
                let src = File::open(path).at(path)?;
                let mut reader = BufReader::with_capacity(self.options.buffer_size.max(1), src);
                let n = io::copy(&mut reader, zip).at(path)?;
                stats.files += 1;
                stats.bytes += n;
                tracing::debug!(entry = %name, bytes = n, "file entry");
            } else {
                tracing::warn!(path = %path.display(), "skipping special file");
            }
        }
        Ok(stats)
    }

    fn write_manifest<W: Write + Seek>(&self, zip: &mut ZipWriter<W>) -> Result<(), ArchiveError> {
        let opts = SimpleFileOptions::default().compression_method(self.options.compression.into());
        zip.start_file(MANIFEST_NAME, opts)?;
        let body = format!("Manifest-Version: {}\r\n\r\n", self.options.manifest_version);
        zip.write_all(body.as_bytes())
            .map_err(|e| FsOpError::from_io(MANIFEST_NAME, e))?;
        Ok(())
    }
}

/// Payloads this large need ZIP64 headers.
pub(crate) fn needs_zip64(len: u64) -> bool {
    len >= u64::from(u32::MAX)
}

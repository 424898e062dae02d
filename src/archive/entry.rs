use std::path::{Component, Path};
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, Timelike};

/// Kind of record stored in an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory marker; the name ends with `/` and there is no payload.
    Directory,
    /// File with raw byte content.
    File,
}

/// One record as seen when listing an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Forward-slash separated name; directories end with `/`.
    pub name: String,
    pub kind: EntryKind,
    /// Uncompressed payload size (0 for directories).
    pub size: u64,
    /// Last-modified time recorded for the entry, in local time.
    pub modified: Option<zip::DateTime>,
}

impl ArchiveEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Name of `path` relative to `base`, joined with `/`.
///
/// Returns `None` when `path` does not live under `base`. The base itself maps
/// to the empty string.
pub fn entry_name(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Convert a filesystem timestamp to an archive timestamp in local time.
///
/// ZIP stores dates from 1980 to 2107; anything outside is clamped.
pub fn zip_time(t: SystemTime) -> zip::DateTime {
    let local: DateTime<Local> = t.into();
    if local.year() < 1980 {
        return zip::DateTime::default();
    }
    if local.year() > 2107 {
        return zip::DateTime::from_date_and_time(2107, 12, 31, 23, 59, 58).unwrap_or_default();
    }
    zip::DateTime::from_date_and_time(
        local.year() as u16,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second().min(59) as u8,
    )
    .unwrap_or_default()
}

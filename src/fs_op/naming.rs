//! Collision-free destination naming.
//!
//! When a copy would land on a name that is already taken, the stem gets a
//! parenthesised counter: `report.txt` becomes `report(0).txt`, then
//! `report(1).txt`, and an existing `report(4).txt` becomes `report(5).txt`.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::fs_op::error::FsOpError;
use crate::fs_op::stat::{exists, is_dir};

fn suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?s)(.*)\((\d+)\)$").expect("static regex"))
}

/// A `(n)` counter parsed off the end of a stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionSuffix {
    /// Stem with the counter removed.
    pub base: String,
    /// Parsed counter, `None` when the stem carries no numeric suffix.
    pub index: Option<u64>,
}

impl CollisionSuffix {
    /// Split `stem` into its base and optional counter.
    ///
    /// Only a trailing `(<digits>)` counts. `a(x)` or `a(1)b` carry no suffix,
    /// and neither does a counter too large for `u64`.
    pub fn parse(stem: &str) -> Self {
        if let Some(caps) = suffix_regex().captures(stem) {
            if let Ok(n) = caps[2].parse::<u64>() {
                return CollisionSuffix {
                    base: caps[1].to_string(),
                    index: Some(n),
                };
            }
        }
        CollisionSuffix {
            base: stem.to_string(),
            index: None,
        }
    }

    /// Counter for the next attempt: an absent suffix behaves like `-1`.
    pub fn next_index(&self) -> u64 {
        match self.index {
            Some(n) => n.saturating_add(1),
            None => 0,
        }
    }

    /// Compose `base(index)extension`.
    pub fn compose(&self, index: u64, extension: &str) -> String {
        format!("{}({}){}", self.base, index, extension)
    }
}

/// Extension of the final path component including the leading dot.
///
/// Returns `None` when the name has no dot. A leading-dot name such as
/// `.bashrc` has no extension.
pub fn file_extension(path: impl AsRef<Path>) -> Option<String> {
    let name = path.as_ref().file_name()?.to_string_lossy().into_owned();
    match name.rfind('.') {
        Some(0) | None => None,
        Some(i) => Some(name[i..].to_string()),
    }
}

/// Final path component without its extension.
pub fn file_stem(path: impl AsRef<Path>) -> Option<String> {
    let name = path.as_ref().file_name()?.to_string_lossy().into_owned();
    let ext_len = file_extension(path.as_ref()).map(|e| e.len()).unwrap_or(0);
    Some(name[..name.len() - ext_len].to_string())
}

/// Pick a free file name for `candidate` within its parent directory.
///
/// Returns the candidate's own name when nothing occupies it. Otherwise the
/// stem's `(n)` counter is bumped until a name is free. Only existence checks
/// are made; nothing is created.
pub fn resolve_name(candidate: impl AsRef<Path>) -> Result<String, FsOpError> {
    let candidate = candidate.as_ref();
    let name = candidate
        .file_name()
        .ok_or_else(|| FsOpError::MissingFilename(candidate.to_path_buf()))?
        .to_string_lossy()
        .into_owned();

    if !exists(candidate) {
        return Ok(name);
    }

    let parent = candidate.parent().unwrap_or_else(|| Path::new(""));
    // Directories never carry an extension, even when their name has a dot.
    let (stem, extension) = if is_dir(candidate) {
        (name.clone(), String::new())
    } else {
        (
            file_stem(candidate).unwrap_or_else(|| name.clone()),
            file_extension(candidate).unwrap_or_default(),
        )
    };

    let suffix = CollisionSuffix::parse(&stem);
    let mut index = suffix.next_index();
    loop {
        let attempt = suffix.compose(index, &extension);
        if !exists(parent.join(&attempt)) {
            tracing::debug!(original = %name, resolved = %attempt, "resolved name collision");
            return Ok(attempt);
        }
        index = index.saturating_add(1);
    }
}

//! User configuration loaded from a TOML file.

pub mod config_dirs;
pub mod read_settings;

use serde::{Deserialize, Serialize};

use crate::archive::{ArchiveOptions, Compression};
use crate::fs_op::helpers::DEFAULT_BUFFER_SIZE;
use crate::fs_op::CopySettings;

pub use config_dirs::{project_config_dir, settings_path};
pub use read_settings::{load_settings, load_settings_from, ConfigError};

/// Top-level configuration. Every section and field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub archive: ArchiveSection,
    pub copy: CopySection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveSection {
    pub compression: Compression,
    pub manifest_version: String,
    pub extension: String,
}

impl Default for ArchiveSection {
    fn default() -> Self {
        let o = ArchiveOptions::default();
        ArchiveSection {
            compression: o.compression,
            manifest_version: o.manifest_version,
            extension: o.extension,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopySection {
    pub buffer_size: usize,
    pub preserve_times: bool,
}

impl Default for CopySection {
    fn default() -> Self {
        CopySection {
            buffer_size: DEFAULT_BUFFER_SIZE,
            preserve_times: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        LogSection {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn archive_options(&self) -> ArchiveOptions {
        ArchiveOptions {
            compression: self.archive.compression,
            manifest_version: self.archive.manifest_version.clone(),
            extension: self.archive.extension.trim_start_matches('.').to_string(),
            buffer_size: self.copy.buffer_size,
        }
    }

    pub fn copy_settings(&self) -> CopySettings {
        CopySettings {
            buffer_size: self.copy.buffer_size,
            preserve_times: self.copy.preserve_times,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_defaults() {
        let s = Settings::default();
        assert_eq!(s.archive_options(), ArchiveOptions::default());
        assert_eq!(s.copy_settings(), CopySettings::default());
        assert_eq!(s.log.level, "warn");
    }

    #[test]
    fn extension_dot_is_dropped() {
        let mut s = Settings::default();
        s.archive.extension = ".zip".to_string();
        assert_eq!(s.archive_options().output_name("x", None), "x.zip");
    }
}

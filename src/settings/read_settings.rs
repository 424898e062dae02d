use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::settings::config_dirs::settings_path;
use crate::settings::Settings;

/// Errors raised while loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read settings `{}`: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid settings `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load settings from the default location. A missing file yields defaults.
pub fn load_settings() -> Result<Settings, ConfigError> {
    match settings_path() {
        Some(p) if p.exists() => load_settings_from(&p),
        _ => Ok(Settings::default()),
    }
}

/// Load settings from an explicit file. Unlike [`load_settings`], a missing
/// file is an error here.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Compression;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.toml");
        fs::write(
            &p,
            "[archive]\ncompression = \"stored\"\n\n[copy]\npreserve_times = false\n",
        )
        .unwrap();

        let s = load_settings_from(&p).unwrap();
        assert_eq!(s.archive.compression, Compression::Stored);
        assert_eq!(s.archive.manifest_version, "1.0");
        assert!(!s.copy.preserve_times);
        assert_eq!(s.copy.buffer_size, 64 * 1024);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.toml");
        fs::write(&p, "[archive\ncompression = 1").unwrap();
        assert!(matches!(load_settings_from(&p), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let td = tempdir().unwrap();
        let err = load_settings_from(&td.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

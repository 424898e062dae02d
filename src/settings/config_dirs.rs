use std::path::PathBuf;

use directories_next::ProjectDirs;

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "config.toml";

/// Per-user configuration directory (`~/.config/toolbelt` on Linux).
pub fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "toolbelt").map(|d| d.config_dir().to_path_buf())
}

/// Default location of the settings file.
pub fn settings_path() -> Option<PathBuf> {
    project_config_dir().map(|d| d.join(SETTINGS_FILE))
}

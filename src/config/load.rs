use std::{
    env, fs,
    path::{Path, PathBuf},
};

use super::schema::Settings;
use crate::error::SettingsError;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `DUBDIB__`) and falls back to struct defaults.
impl Settings {
    /// Load settings from the resolved config path and the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from `path` (if any) and the environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("DUBDIB")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("library.extensions"),
        );

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }

    /// Load only the file at `path` (missing is fine), without environment
    /// overrides. Used when the file is about to be rewritten.
    pub fn load_file(path: &Path) -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .build()?
            .try_deserialize()
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.library.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(SettingsError::Invalid(
                "library.extensions must name at least one extension".to_string(),
            ));
        }
        if self.library.max_depth == Some(0) {
            return Err(SettingsError::Invalid(
                "library.max_depth must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Write the settings to `path` as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve the config path from `DUBDIB_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("DUBDIB_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/dubdib/config.toml`
/// or `~/.config/dubdib/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("dubdib").join("config.toml"))
}

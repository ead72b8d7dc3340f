use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::organize::{GroupKey, TransferMode};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/dubdib/config.toml` or `~/.config/dubdib/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DUBDIB__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub organize: OrganizeSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "flac", "wav", "ogg", "m4a", "opus", "aiff"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

impl LibrarySettings {
    /// Whether `ext` (with or without a leading dot) is one of the configured extensions.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        let ext = ext.trim().trim_start_matches('.');
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OrganizeSettings {
    /// Folder scanned when no source is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_source: Option<PathBuf>,
    /// Folder organized into when no destination is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_destination: Option<PathBuf>,
    /// Attribute used to bucket tracks.
    pub group_by: GroupKey,
    /// Whether files are copied or moved.
    pub mode: TransferMode,
    /// Replace files that already exist at the destination.
    pub overwrite: bool,
}

impl Default for OrganizeSettings {
    fn default() -> Self {
        Self {
            default_source: None,
            default_destination: None,
            group_by: GroupKey::Artist,
            mode: TransferMode::Copy,
            overwrite: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// Which columns the library listing shows, and in what order.
    ///
    /// Example: ["artist", "title", "location"]
    pub columns: Vec<LibraryColumn>,
    /// Separator placed between columns.
    pub column_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            columns: vec![
                LibraryColumn::Title,
                LibraryColumn::Artist,
                LibraryColumn::Album,
                LibraryColumn::Genre,
                LibraryColumn::Tags,
                LibraryColumn::Location,
            ],
            column_separator: " | ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryColumn {
    Title,
    Artist,
    Album,
    Genre,
    Tags,
    /// Full source path.
    #[serde(alias = "path")]
    Location,
    /// File name without extension.
    Filename,
}

// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::StoreFormat;

/// Default strftime pattern for absolute dates in the display ("10/3/2026").
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Configuration exactly as read from the TOML file, before validation.
///
/// ```toml
/// [storage]
/// path = "~/.duelist.json"
/// format = "json"
///
/// [picker]
/// command = ["rofi", "-dmenu", "-i", "-p", "{prompt}", "-mesg", "{message}"]
///
/// [display]
/// date_format = "%-m/%-d/%Y"
///
/// [open]
/// command = "xdg-open"
///
/// [logging]
/// level = "info"
/// file = "~/.duelist.log"
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub picker: PickerSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub open: OpenSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`], so the rest of the program can trust its fields.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub storage: StorageSection,
    pub picker: PickerSection,
    pub display: DisplaySection,
    pub open: OpenSection,
    pub logging: LoggingSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            storage: raw.storage,
            picker: raw.picker,
            display: raw.display,
            open: raw.open,
            logging: raw.logging,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    /// Task file location. A leading `~` is expanded to the home directory.
    ///
    /// If `None`, `~/.duelist.json` (or `~/.duelist` for the legacy format).
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub format: StoreFormat,
}

impl StorageSection {
    /// Effective path of the task file.
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(p) => expand_home(p),
            None => {
                let file_name = match self.format {
                    StoreFormat::Json => ".duelist.json",
                    StoreFormat::Legacy => ".duelist",
                };
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(file_name)
            }
        }
    }
}

/// `[picker]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickerSection {
    /// Argv of an external dmenu-style picker.
    ///
    /// `{prompt}` and `{message}` inside any argument are substituted per
    /// call. Empty means "use the terminal picker".
    #[serde(default)]
    pub command: Vec<String>,
}

/// `[display]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySection {
    /// strftime pattern for absolute dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

/// `[open]` section: how "Visit URL" opens a link.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenSection {
    #[serde(default = "default_open_command")]
    pub command: String,
}

fn default_open_command() -> String {
    if cfg!(target_os = "macos") {
        "open".to_string()
    } else {
        "xdg-open".to_string()
    }
}

impl Default for OpenSection {
    fn default() -> Self {
        Self {
            command: default_open_command(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    /// Level name; overridden by `--log-level` and `DUELIST_LOG`.
    #[serde(default)]
    pub level: Option<String>,

    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

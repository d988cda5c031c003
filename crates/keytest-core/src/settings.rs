// Keytest Settings Module
// User-configurable defaults for the display, input handling and layout files

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::mode::{ModeKind, DEFAULT_MAX_LINES};

/// Release delay used when the terminal cannot report key releases
pub const DEFAULT_RELEASE_DELAY_MS: u64 = 150;

/// Keysym that closes the application
pub const DEFAULT_QUIT_KEY: &str = "Escape";

/// Settings for keytest
///
/// Loaded from a TOML file (default: ~/.config/keytest/settings.toml). Every
/// value is optional; missing ones fall back to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Layout shown at startup; `None` picks the first catalog layout
    layout: Option<String>,

    /// Mode shown at startup
    mode: ModeKind,

    /// Synthesized release delay for terminals without release events
    release_delay_ms: u64,

    /// Keysym that quits
    quit_key: String,

    /// Event log scroll-back
    log_max_lines: usize,

    /// Extra layout files, already resolved to absolute paths where possible
    layout_files: Vec<PathBuf>,

    /// File the settings were read from, if any
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    display: Option<DisplaySettings>,

    #[serde(default)]
    input: Option<InputSettings>,

    #[serde(default)]
    log: Option<LogSettings>,

    #[serde(default)]
    layouts: Option<LayoutsSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DisplaySettings {
    #[serde(default)]
    layout: Option<String>,
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct InputSettings {
    #[serde(default)]
    release_delay_ms: Option<i64>,
    #[serde(default)]
    quit_key: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LogSettings {
    #[serde(default)]
    max_lines: Option<i64>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LayoutsSettings {
    #[serde(default)]
    files: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Settings with every default applied
    pub fn new() -> Self {
        Self {
            layout: None,
            mode: ModeKind::default(),
            release_delay_ms: DEFAULT_RELEASE_DELAY_MS,
            quit_key: DEFAULT_QUIT_KEY.to_string(),
            log_max_lines: DEFAULT_MAX_LINES,
            layout_files: Vec::new(),
            source_path: None,
        }
    }

    /// Load settings from a TOML file.
    ///
    /// Relative layout file paths are taken relative to the settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        if let Some(dir) = path.as_ref().parent() {
            settings.layout_files = settings
                .layout_files
                .into_iter()
                .map(|file| if file.is_relative() { dir.join(file) } else { file })
                .collect();
        }
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(display) = toml_settings.display {
            if let Some(layout) = display.layout {
                if layout.trim().is_empty() {
                    return Err(SettingsError::InvalidValue(
                        "display.layout must not be empty".to_string(),
                    ));
                }
                settings.layout = Some(layout);
            }
            if let Some(mode) = display.mode {
                settings.mode = parse_mode(&mode)?;
            }
        }

        if let Some(input) = toml_settings.input {
            if let Some(delay) = input.release_delay_ms {
                settings.release_delay_ms = u64::try_from(delay).map_err(|_| {
                    SettingsError::InvalidValue(format!(
                        "input.release_delay_ms must not be negative, got {}",
                        delay
                    ))
                })?;
            }
            if let Some(quit_key) = input.quit_key {
                if quit_key.is_empty() {
                    return Err(SettingsError::InvalidValue(
                        "input.quit_key must not be empty".to_string(),
                    ));
                }
                settings.quit_key = quit_key;
            }
        }

        if let Some(log) = toml_settings.log {
            if let Some(max_lines) = log.max_lines {
                settings.log_max_lines = usize::try_from(max_lines)
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        SettingsError::InvalidValue(format!(
                            "log.max_lines must be positive, got {}",
                            max_lines
                        ))
                    })?;
            }
        }

        if let Some(layouts) = toml_settings.layouts {
            settings.layout_files = layouts.files.iter().map(|f| expand_home(f)).collect();
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keytest").join("settings.toml"))
    }

    /// Load from default location (~/.config/keytest/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    pub fn set_layout(&mut self, layout: impl Into<String>) {
        self.layout = Some(layout.into());
    }

    pub fn mode(&self) -> ModeKind {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ModeKind) {
        self.mode = mode;
    }

    pub fn release_delay_ms(&self) -> u64 {
        self.release_delay_ms
    }

    pub fn quit_key(&self) -> &str {
        &self.quit_key
    }

    pub fn log_max_lines(&self) -> usize {
        self.log_max_lines
    }

    pub fn layout_files(&self) -> &[PathBuf] {
        &self.layout_files
    }

    /// Append a layout file (command-line additions come after configured ones)
    pub fn add_layout_file(&mut self, path: impl Into<PathBuf>) {
        self.layout_files.push(path.into());
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

fn parse_mode(value: &str) -> Result<ModeKind, SettingsError> {
    ModeKind::from_str(&value.to_lowercase()).map_err(|_| {
        SettingsError::InvalidValue(format!(
            "display.mode must be 'visual' or 'log', got '{}'",
            value
        ))
    })
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Keytest Settings
# Place this file at: ~/.config/keytest/settings.toml

[display]
# Layout shown at startup (see `keytest --list-layouts`)
layout = "QWERTY_Full_US"
# "visual" or "log"
mode = "visual"

[input]
# Terminals that cannot report key releases get one after this delay
release_delay_ms = 150
# Keysym that closes keytest
quit_key = "Escape"

[log]
# Event log scroll-back
max_lines = 800

[layouts]
# Extra layout definitions, relative paths are resolved against this file
# files = ["layouts/custom.toml"]
"#
}

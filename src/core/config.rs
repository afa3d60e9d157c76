//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.keynav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::action::Command;
use crate::core::action_bar::ActionItem;
use crate::core::chord::Chord;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeynavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<String>,
    pub font: Option<String>,
    pub show_grid: Option<bool>,
    pub log_level: Option<String>,
}

/// An extra action-bar button.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemEntry {
    /// Chord that triggers the command, e.g. `"ctrl+q"`.
    pub hotkey: String,
    pub body: String,
    /// `theme:<class>`, `font:<class>`, `grid` or `quit`.
    pub command: String,
    /// Hint shown on the button. Defaults to the chord.
    pub hint: Option<String>,
}

impl ItemEntry {
    pub fn to_action_item(&self) -> Result<ActionItem, ConfigError> {
        let chord: Chord = self
            .hotkey
            .parse()
            .map_err(|e| ConfigError::Item(format!("'{}': {e}", self.body)))?;
        let command: Command = self
            .command
            .parse()
            .map_err(|e| ConfigError::Item(format!("'{}': {e}", self.body)))?;
        let hint = self.hint.clone().unwrap_or_else(|| chord.to_string());
        Ok(ActionItem::command(hint, self.body.clone(), Some(chord), command))
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_THEME: &str = "theme-black-pink";
pub const DEFAULT_FONT: &str = "";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub theme: String,
    pub font: String,
    pub show_grid: bool,
    pub log_level: LevelFilter,
    pub items: Vec<ActionItem>,
}

/// Values given on the command line (`None` / `false` = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub theme: Option<String>,
    pub font: Option<String>,
    pub grid: bool,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Item(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Item(msg) => write!(f, "invalid [[items]] entry {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.keynav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".keynav").join("config.toml"))
}

/// Load config from `~/.keynav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `KeynavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<KeynavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(KeynavConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<KeynavConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(KeynavConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: KeynavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# keynav configuration
# All settings are optional, defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "theme-black-pink"     # Or set KEYNAV_THEME. "" = Refined White
# font = ""                      # Or set KEYNAV_FONT. "" = Departure Mono
# show_grid = false
# log_level = "info"             # "off", "error", "warn", "info", "debug", "trace"

# Extra action-bar buttons, appended after Font / Theme / Grid.
# [[items]]
# hotkey = "ctrl+q"
# body = "Quit"
# command = "quit"               # "theme:<class>", "font:<class>", "grid", "quit"
# hint = "⌃+Q"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// Invalid `[[items]]` entries are skipped with a warning.
pub fn resolve(config: &KeynavConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .clone()
        .or_else(|| std::env::var("KEYNAV_THEME").ok())
        .or_else(|| config.general.theme.clone())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    // Font: CLI → env → config → default
    let font = cli
        .font
        .clone()
        .or_else(|| std::env::var("KEYNAV_FONT").ok())
        .or_else(|| config.general.font.clone())
        .unwrap_or_else(|| DEFAULT_FONT.to_string());

    let log_level = cli
        .log_level
        .as_deref()
        .or(config.general.log_level.as_deref())
        .and_then(|level| match level.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let items = config
        .items
        .iter()
        .filter_map(|entry| match entry.to_action_item() {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping action item: {}", e);
                None
            }
        })
        .collect();

    ResolvedConfig {
        theme,
        font,
        show_grid: cli.grid || config.general.show_grid.unwrap_or(false),
        log_level,
        items,
    }
}

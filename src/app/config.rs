//! Configuration for the console

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{
    Dimensions, Rgba, COLS_RANGE, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SPACES_PER_TAB, ROWS_RANGE,
};
use crate::error::ConsoleError;

/// Default upper bound on the length of a line being edited
pub const DEFAULT_MAX_LINE_LEN: usize = 65536;

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Spaces written for each tab character
    pub spaces_per_tab: usize,
    /// Whether writing past the bottom row scrolls
    pub scrollable: bool,
    /// Color used when a write does not name one
    pub default_color: Rgba,
    /// Maximum characters in a line being edited
    pub max_line_len: usize,
    /// Screen variant name
    pub screen: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            spaces_per_tab: DEFAULT_SPACES_PER_TAB,
            scrollable: true,
            default_color: Rgba::default(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            screen: ScreenType::Flat.to_string(),
        }
    }
}

/// Screen variants a console can be built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenType {
    /// A flat rectangular screen
    #[default]
    Flat,
}

impl FromStr for ScreenType {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(ScreenType::Flat),
            _ => Err(ConsoleError::UnsupportedScreen(s.to_string())),
        }
    }
}

impl fmt::Display for ScreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenType::Flat => write!(f, "flat"),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/clay-console/config.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring {}: {}", config_path.display(), e),
                }
            }
        }
        Self::default()
    }

    /// Parsed screen variant
    pub fn screen_type(&self) -> Result<ScreenType, ConsoleError> {
        self.screen.parse()
    }

    /// Check that a console can be built from this configuration
    pub fn validate(&self) -> Result<(), ConsoleError> {
        self.screen_type()?;
        if !Dimensions::new(self.rows, self.cols).is_valid() {
            return Err(ConsoleError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
                min_rows: *ROWS_RANGE.start(),
                max_rows: *ROWS_RANGE.end(),
                min_cols: *COLS_RANGE.start(),
                max_cols: *COLS_RANGE.end(),
            });
        }
        if self.max_line_len == 0 {
            return Err(ConsoleError::InvalidConfig(
                "max_line_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("clay-console"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

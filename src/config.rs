use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::max_heap::SiftMode;

/// Main configuration structure for heapstack
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HeapstackConfig {
    /// Defaults for heaps created by the CLI
    #[serde(default)]
    pub heap: HeapConfig,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Heap construction settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeapConfig {
    /// Maximum number of elements (default: 16)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Sifting behavior (default: ordered)
    #[serde(default)]
    pub sift_mode: SiftMode,
}

/// Display configuration options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Whether to color terminal output (default: true)
    #[serde(default = "default_true")]
    pub use_color: bool,
}

fn default_capacity() -> usize {
    16
}

fn default_true() -> bool {
    true
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            sift_mode: SiftMode::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { use_color: true }
    }
}

impl HeapstackConfig {
    /// Load config from custom path or default XDG location
    pub fn load(custom_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let path = if let Some(p) = custom_path {
            p.clone()
        } else {
            match Self::default_config_path() {
                Ok(p) => p,
                Err(_) => return Ok(Self::default()),
            }
        };

        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(path.clone(), e))?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.clone(), e))
    }

    /// Get default config path: ~/.config/heapstack/config.toml
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;

        Ok(config_dir.join("heapstack").join("config.toml"))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    NoConfigDir,
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(path, e) => {
                write!(f, "Failed to read config at {}: {}", path.display(), e)
            }
            ConfigError::Parse(path, e) => {
                write!(f, "Failed to parse config at {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

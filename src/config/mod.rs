//! Configuration System for memrdf
//!
//! Provides a flexible configuration system supporting:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple config file locations
//!
//! # Configuration File Locations
//!
//! Configuration files are searched in order (first found wins):
//! 1. `./memrdf.toml` - Project-local configuration
//! 2. `~/.config/memrdf/config.toml` - User configuration (XDG)
//! 3. `~/.memrdf/config.toml` - User configuration (legacy)
//! 4. `/etc/memrdf/config.toml` - System-wide configuration
//!
//! # Environment Variables
//!
//! - `MEMRDF_LOG_LEVEL` - Logging verbosity (quiet, normal, verbose, debug)
//! - `MEMRDF_IRI_VALIDATION` - IRI checks on creation (minimal, strict)
//! - `MEMRDF_DISPLAY_LIMIT` - Statements shown when printing a graph or dataset
//! - `MEMRDF_INITIAL_CAPACITY` - Pre-allocated statement slots per store
//!
//! # Example Configuration
//!
//! ```toml
//! # memrdf.toml
//!
//! [general]
//! log_level = "verbose"
//!
//! [terms]
//! iri_validation = "strict"
//!
//! [store]
//! display_limit = 25
//! initial_capacity = 1024
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Configuration Schema
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MemrdfConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Term creation settings
    pub terms: TermConfig,
    /// Graph and dataset settings
    pub store: StoreConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level
    pub log_level: LogLevel,
}

/// Term factory configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TermConfig {
    /// How strictly IRIs are checked when created or imported
    pub iri_validation: IriValidation,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum statements printed by `Display` before eliding the rest
    pub display_limit: usize,
    /// Statement slots reserved when a store is created
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            display_limit: 10,
            initial_capacity: 0,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Log level options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quiet" | "q" | "0" => Some(LogLevel::Quiet),
            "normal" | "n" | "1" => Some(LogLevel::Normal),
            "verbose" | "v" | "2" => Some(LogLevel::Verbose),
            "debug" | "d" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// The `tracing` filter directive for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Verbose => "debug",
            LogLevel::Debug => "trace",
        }
    }
}

/// IRI validation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IriValidation {
    /// Only reject empty IRIs
    #[default]
    Minimal,
    /// Also reject whitespace, control characters and `<>"{}|^`\`
    Strict,
}

impl IriValidation {
    pub fn as_str(&self) -> &'static str {
        match self {
            IriValidation::Minimal => "minimal",
            IriValidation::Strict => "strict",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "minimal" | "min" | "lax" => Some(IriValidation::Minimal),
            "strict" => Some(IriValidation::Strict),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration Loading
// ============================================================================

impl MemrdfConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from default locations
    ///
    /// Searches for config files in order:
    /// 1. ./memrdf.toml
    /// 2. ~/.config/memrdf/config.toml
    /// 3. ~/.memrdf/config.toml
    /// 4. /etc/memrdf/config.toml
    ///
    /// Then applies environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for path in Self::config_paths() {
            if path.exists() {
                config = Self::load_from_file(&path)?;
                break;
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e.to_string()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Load configuration from a TOML string
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(PathBuf::from("<string>"), e.to_string()))
    }

    /// Get the list of config file search paths
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Project-local
        paths.push(PathBuf::from("./memrdf.toml"));

        // XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("memrdf").join("config.toml"));
        }

        // Legacy home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".memrdf").join("config.toml"));
        }

        // System-wide (Unix only)
        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/memrdf/config.toml"));

        paths
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparseable values are ignored
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("MEMRDF_LOG_LEVEL").and_then(|v| LogLevel::from_str(&v)) {
            self.general.log_level = level;
        }

        if let Some(mode) =
            lookup("MEMRDF_IRI_VALIDATION").and_then(|v| IriValidation::from_str(&v))
        {
            self.terms.iri_validation = mode;
        }

        if let Some(limit) = lookup("MEMRDF_DISPLAY_LIMIT").and_then(|v| v.parse().ok()) {
            self.store.display_limit = limit;
        }

        if let Some(capacity) = lookup("MEMRDF_INITIAL_CAPACITY").and_then(|v| v.parse().ok()) {
            self.store.initial_capacity = capacity;
        }
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Install a `tracing` fmt subscriber at the configured level
    ///
    /// `RUST_LOG` takes precedence when set. Returns `false` if a global
    /// subscriber was already installed.
    pub fn init_tracing(&self) -> bool {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.general.log_level.filter_directive()));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_ok()
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading/writing config file
    #[error("IO error reading {path}: {1}", path = .0.display())]
    IoError(PathBuf, String),
    /// Parse error in config file
    #[error("Parse error in {path}: {1}", path = .0.display())]
    ParseError(PathBuf, String),
    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializeError(String),
}

// ============================================================================
// Tests
// ============================================================================

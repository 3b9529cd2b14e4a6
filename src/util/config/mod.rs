//! msh launch configuration
//!
//! Decides how the command line is handed to the script runtime.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. Environment variables (MSH_*)
//! 2. User-level (~/.config/msh/config.toml, or $MSH_CONFIG)
//! 3. Default values
//! ```
//!
//! The launcher parses no flags of its own, so there is no CLI layer.
//!
//! # Usage
//!
//! ```rust,no_run
//! use msh::util::config;
//!
//! let config = config::load().unwrap();
//! assert_eq!(config.entry, "__main__");
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Explicit config file location
pub const CONFIG_ENV: &str = "MSH_CONFIG";

/// How raw process arguments are turned into script strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgEncoding {
    /// Convert from the platform encoding, replacing invalid sequences
    #[default]
    Lossy,
    /// Refuse to start when an argument is not valid UTF-8
    Strict,
}

impl FromStr for ArgEncoding {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lossy" | "locale" => Ok(ArgEncoding::Lossy),
            "strict" | "utf8" | "utf-8" => Ok(ArgEncoding::Strict),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ArgEncoding {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ArgEncoding::Lossy => write!(f, "lossy"),
            ArgEncoding::Strict => write!(f, "strict"),
        }
    }
}

/// Launch settings for the bootstrap sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchConfig {
    /// Name of the script-level entry function
    #[serde(default = "default_entry")]
    pub entry: String,
    /// Global constant the argument list is bound to
    #[serde(default = "default_argv_global")]
    pub argv_global: String,
    /// Global constant holding the launcher version; empty disables it
    #[serde(default = "default_version_global")]
    pub version_global: String,
    /// Leave argv[0] out of the argument list
    #[serde(default = "default_true")]
    pub skip_program_name: bool,
    /// Pass the argument list to the entry function as its only argument
    #[serde(default = "default_true")]
    pub pass_argv: bool,
    /// Argument conversion mode
    #[serde(default)]
    pub arg_encoding: ArgEncoding,
    /// Entry script to load instead of the bundled one
    #[serde(default)]
    pub script: Option<PathBuf>,
}

fn default_entry() -> String {
    "__main__".to_string()
}

fn default_argv_global() -> String {
    "ARGV".to_string()
}

fn default_version_global() -> String {
    "MSH_VERSION".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            argv_global: default_argv_global(),
            version_global: default_version_global(),
            skip_program_name: true,
            pass_argv: true,
            arg_encoding: ArgEncoding::Lossy,
            script: None,
        }
    }
}

/// On-disk layout: everything lives under `[launch]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    #[serde(default)]
    pub launch: LaunchConfig,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: `{value}`")]
    InvalidValue { key: String, value: String },
}

impl LaunchConfig {
    /// Parse a `config.toml` document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let user: UserConfig = toml::from_str(content)?;
        Ok(user.launch)
    }

    /// Layer environment overrides on top of this config
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env<F>(
        &mut self,
        lookup: F,
    ) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(entry) = lookup("MSH_ENTRY") {
            self.entry = entry;
        }
        if let Some(name) = lookup("MSH_ARGV_GLOBAL") {
            self.argv_global = name;
        }
        if let Some(script) = lookup("MSH_SCRIPT") {
            self.script = if script.is_empty() {
                None
            } else {
                Some(PathBuf::from(script))
            };
        }
        if let Some(raw) = lookup("MSH_SKIP_PROGRAM_NAME") {
            self.skip_program_name = parse_flag("MSH_SKIP_PROGRAM_NAME", &raw)?;
        }
        if let Some(raw) = lookup("MSH_PASS_ARGV") {
            self.pass_argv = parse_flag("MSH_PASS_ARGV", &raw)?;
        }
        if let Some(raw) = lookup("MSH_ARG_ENCODING") {
            self.arg_encoding = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "MSH_ARG_ENCODING".to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(())
    }
}

fn parse_flag(
    key: &str,
    raw: &str,
) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("msh"));
    }

    // Fallback to ~/.config/msh
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("msh"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("msh"));
    }

    None
}

/// Get the user config file path, honouring `$MSH_CONFIG`
pub fn get_config_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load a config file, returning defaults if it doesn't exist
pub fn load_file(path: &Path) -> Result<LaunchConfig, ConfigError> {
    if !path.exists() {
        return Ok(LaunchConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    LaunchConfig::from_toml(&content)
}

/// Load the effective launch configuration: defaults, user file, environment
pub fn load() -> anyhow::Result<LaunchConfig> {
    let mut config = match get_config_path() {
        Some(path) => load_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => LaunchConfig::default(),
    };

    config
        .apply_env(|key| std::env::var(key).ok())
        .context("invalid environment override")?;

    tracing::debug!(
        entry = %config.entry,
        skip_program_name = config.skip_program_name,
        arg_encoding = %config.arg_encoding,
        "launch config loaded"
    );
    Ok(config)
}

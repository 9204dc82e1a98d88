//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use super::{ControllerConfig, Thresholds};
use crate::axis::Axis;
use crate::kinematics::{Easing, SettleTiming};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PAGESWIPE_CONFIG";
/// Environment variable overriding the scroll axis.
pub const AXIS_ENV: &str = "PAGESWIPE_AXIS";
/// Environment variable overriding the touch slop.
pub const TOUCH_SLOP_ENV: &str = "PAGESWIPE_TOUCH_SLOP";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An override environment variable held an unusable value.
    #[error("Invalid value '{value}' in {var}: {reason}")]
    InvalidEnvValue {
        /// Name of the variable.
        var: &'static str,
        /// Raw value found.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pageswipe/config.toml`.
///
/// ```toml
/// axis = "vertical"
/// touch_slop = 12.0
/// easing = "decelerate-quad"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Scroll axis ("horizontal" or "vertical").
    #[serde(default)]
    pub axis: Option<Axis>,

    /// Drag distance before the axis locks.
    #[serde(default)]
    pub touch_slop: Option<f64>,

    /// Slowest release counted as a fling, units per second.
    #[serde(default)]
    pub min_fling_velocity: Option<f64>,

    /// Fastest release counted as a fling, units per second.
    #[serde(default)]
    pub max_fling_velocity: Option<f64>,

    /// Settle milliseconds per unit of distance.
    #[serde(default)]
    pub settle_ms_per_unit: Option<f64>,

    /// Shortest settle, in milliseconds.
    #[serde(default)]
    pub min_settle_ms: Option<u64>,

    /// Longest settle, in milliseconds.
    #[serde(default)]
    pub max_settle_ms: Option<u64>,

    /// Settle curve ("viscous-fluid" or "decelerate-quad").
    #[serde(default)]
    pub easing: Option<Easing>,

    /// Page shown before any gesture.
    #[serde(default)]
    pub initial_page: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
/// The controller part is not validated here; that happens when the
/// controller is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Parameters for the gesture controller.
    pub controller: ControllerConfig,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pageswipe/pageswipe.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pageswipe").join("pageswipe.log")
    } else {
        PathBuf::from("pageswipe.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pageswipe/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pageswipe").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PAGESWIPE_CONFIG` environment variable
/// 3. Default path `~/.config/pageswipe/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(file) = config_file else {
        return defaults;
    };

    let base = defaults.controller;
    let thresholds = Thresholds {
        touch_slop: file.touch_slop.unwrap_or(base.thresholds.touch_slop),
        min_fling_velocity: file
            .min_fling_velocity
            .unwrap_or(base.thresholds.min_fling_velocity),
        max_fling_velocity: file
            .max_fling_velocity
            .unwrap_or(base.thresholds.max_fling_velocity),
    };
    let settle = SettleTiming {
        ms_per_unit: file.settle_ms_per_unit.unwrap_or(base.settle.ms_per_unit),
        min_duration_ms: file.min_settle_ms.unwrap_or(base.settle.min_duration_ms),
        max_duration_ms: file.max_settle_ms.unwrap_or(base.settle.max_duration_ms),
        easing: file.easing.unwrap_or(base.settle.easing),
    };

    ResolvedConfig {
        controller: ControllerConfig {
            axis: file.axis.unwrap_or(base.axis),
            thresholds,
            settle,
            initial_page: file.initial_page.unwrap_or(base.initial_page),
        },
        log_file_path: file.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PAGESWIPE_AXIS`: Override scroll axis
/// - `PAGESWIPE_TOUCH_SLOP`: Override touch slop
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvValue`] when a set variable cannot be
/// parsed.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(AXIS_ENV) {
        config.controller.axis = raw.parse().map_err(|e: crate::axis::UnknownAxis| {
            ConfigError::InvalidEnvValue {
                var: AXIS_ENV,
                value: raw.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    if let Ok(raw) = std::env::var(TOUCH_SLOP_ENV) {
        config.controller.thresholds.touch_slop =
            raw.trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: TOUCH_SLOP_ENV,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    axis_override: Option<Axis>,
    log_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(axis) = axis_override {
        config.controller.axis = axis;
    }

    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

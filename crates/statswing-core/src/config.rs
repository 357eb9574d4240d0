// Configuration loading and parsing (config/statswing.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::labels::StatTable;

pub const CONFIG_FILE: &str = "statswing.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// statswing.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub compare: CompareConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Player data CSV, relative to the working directory unless absolute.
    pub player_data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompareConfig {
    /// Stat keys shown by the head-to-head comparison.
    #[serde(default = "default_compare_stats")]
    pub stats: Vec<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            stats: default_compare_stats(),
        }
    }
}

fn default_compare_stats() -> Vec<String> {
    ["G", "PA", "HR", "R"].iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate a config document.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config, &StatTable::standard())?;
    Ok(config)
}

/// Load and validate `config/statswing.toml` under `base_dir`.
///
/// Does not copy defaults; see `load_config_in`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Copy `defaults/statswing.toml` to `config/statswing.toml` when the latter
/// is missing. An existing config is never overwritten. Returns the path
/// written, if any.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the project root",
                target.display(),
                source.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", source.display()),
    })?;
    Ok(Some(target))
}

/// Load config under `base_dir`. With `copy_defaults`, a missing
/// `config/statswing.toml` is first created from `defaults/`; without it,
/// nothing on disk is touched.
pub fn load_config_in(base_dir: &Path, copy_defaults: bool) -> Result<Config, ConfigError> {
    if copy_defaults {
        ensure_config_files(base_dir)?;
    }
    load_config_from(base_dir)
}

/// Load config relative to the current working directory.
pub fn load_config(copy_defaults: bool) -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd, copy_defaults)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config, stats: &StatTable) -> Result<(), ConfigError> {
    if config.data.player_data.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.player_data".into(),
            message: "must not be empty".into(),
        });
    }

    if config.compare.stats.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "compare.stats".into(),
            message: "must list at least one stat".into(),
        });
    }
    if let Some(unknown) = config.compare.stats.iter().find(|k| !stats.contains_key(k)) {
        return Err(ConfigError::ValidationError {
            field: "compare.stats".into(),
            message: format!("unknown stat key `{unknown}`"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

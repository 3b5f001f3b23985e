// Configuration loading and validation (config/lottery.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::roster::Team;

/// Name of the single config file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "lottery.toml";

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
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub lottery: LotteryConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LotteryConfig {
    /// Shown in the status bar and set as the terminal title.
    pub title: String,
    /// Whether weighted mode is on at startup.
    #[serde(default)]
    pub weighted_mode: bool,
    /// Fixed RNG seed for rehearsals. Draws are seeded from the OS when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevealConfig {
    /// Seconds between reveals.
    pub interval_secs: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig { interval_secs: 10 }
    }
}

impl RevealConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectsConfig {
    /// Whether the soundtrack indicator is driven at all.
    pub soundtrack: bool,
    /// How long the celebration overlay stays up.
    pub celebration_secs: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        EffectsConfig {
            soundtrack: true,
            celebration_secs: 8,
        }
    }
}

/// Teams seeded into the roster at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub teams: Vec<Team>,
    /// Optional CSV file (`name,ballots`) relative to the working directory.
    #[serde(default)]
    pub import_csv: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/lottery.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy any file in `defaults/` that is missing from `config/`. Returns the
/// files that were copied. `.example` files are skipped.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Upper bound for both timing fields, in seconds.
pub const MAX_DURATION_SECS: u64 = 3600;

fn validate_secs(field: &str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::ValidationError {
            field: field.into(),
            message: "must be greater than 0".into(),
        });
    }
    if secs > MAX_DURATION_SECS {
        return Err(ConfigError::ValidationError {
            field: field.into(),
            message: format!("must be at most {}", MAX_DURATION_SECS),
        });
    }
    Ok(())
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.lottery.title.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "lottery.title".into(),
            message: "must not be empty".into(),
        });
    }

    validate_secs("reveal.interval_secs", config.reveal.interval_secs)?;
    validate_secs("effects.celebration_secs", config.effects.celebration_secs)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

// Configuration loading and parsing (config/ffm.toml).

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::sources::SourceKind;

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

pub const CONFIG_FILE: &str = "ffm.toml";

/// Upper bound on the post-navigation settle delay.
pub const MAX_SETTLE_DELAY_MS: u64 = 60_000;

/// Smallest usable terminal cell width (room for one char plus "...").
pub const MIN_CELL_WIDTH: usize = 4;

// ---------------------------------------------------------------------------
// ffm.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub league: LeagueConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub league_id: String,
    /// Season year. When omitted, the current calendar year is used.
    #[serde(default)]
    pub season_id: Option<u32>,
    #[serde(default = "default_source")]
    pub source: String,
}

impl LeagueConfig {
    pub fn season(&self) -> u32 {
        self.season_id
            .unwrap_or_else(|| chrono::Local::now().year().max(0) as u32)
    }
}

fn default_source() -> String {
    "espn".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Read saved HTML pages from `snapshot_dir`.
    #[default]
    Snapshot,
    /// Fetch pages over HTTP with the stored session cookies.
    Live,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub mode: FetchMode,
    pub snapshot_dir: String,
    pub settle_delay_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            mode: FetchMode::Snapshot,
            snapshot_dir: "html_input".into(),
            settle_delay_ms: 2_000,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/124.0 Safari/537.36"
                .into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub output_dir: String,
    pub session_file: String,
    pub teams_file: String,
    pub log_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            output_dir: "output".into(),
            session_file: ".fantasy-football-manager/session.json".into(),
            teams_file: "html_input/teams_table.html".into(),
            log_dir: "logs".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_cell_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { max_cell_width: 30 }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/ffm.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config_in()` or `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Create `config/ffm.toml` from `defaults/ffm.toml` when it is missing.
///
/// Returns the created path, or `None` when a config is already in place. A
/// user's config is never overwritten.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let defaults = base_dir.join("defaults").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&defaults)
        .map_err(|e| copy_error("cannot read defaults", &defaults, e))?;
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| copy_error("cannot create", dir, e))?;
    }
    std::fs::write(&target, text).map_err(|e| copy_error("cannot write", &target, e))?;

    info!("created {} from defaults", target.display());
    Ok(Some(target))
}

fn copy_error(what: &str, path: &Path, err: std::io::Error) -> ConfigError {
    ConfigError::DefaultsCopyError {
        message: format!("{what} {}: {err}", path.display()),
    }
}

/// Create the config from defaults if needed, then load it.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_file(base_dir)?;
    load_config_from(base_dir)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league_id = config.league.league_id.trim();
    if league_id.is_empty() || !league_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::ValidationError {
            field: "league.league_id".into(),
            message: format!("must be a non-empty string of digits, got {league_id:?}"),
        });
    }

    if SourceKind::resolve(&config.league.source).is_err() {
        return Err(ConfigError::ValidationError {
            field: "league.source".into(),
            message: format!(
                "unknown source {:?}; expected one of {}",
                config.league.source,
                SourceKind::NAMES.join(", ")
            ),
        });
    }

    if config.fetch.settle_delay_ms > MAX_SETTLE_DELAY_MS {
        return Err(ConfigError::ValidationError {
            field: "fetch.settle_delay_ms".into(),
            message: format!(
                "must be at most {MAX_SETTLE_DELAY_MS}, got {}",
                config.fetch.settle_delay_ms
            ),
        });
    }

    if config.display.max_cell_width < MIN_CELL_WIDTH {
        return Err(ConfigError::ValidationError {
            field: "display.max_cell_width".into(),
            message: format!(
                "must be at least {MIN_CELL_WIDTH}, got {}",
                config.display.max_cell_width
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

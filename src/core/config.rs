//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navstack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavstackConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub middleware: MiddlewareConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MiddlewareConfig {
    pub log_actions: Option<bool>,
    pub log_level: Option<String>,
    pub log_prefix: Option<String>,
    pub analytics: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PersistenceConfig {
    pub state_file: Option<String>,
    pub restore_on_start: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "navstack.log";
pub const DEFAULT_ACTION_LOG_LEVEL: log::Level = log::Level::Debug;
pub const DEFAULT_STATE_FILE: &str = "state.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub log_actions: bool,
    pub action_log_level: log::Level,
    pub action_log_prefix: String,
    pub analytics: bool,
    pub state_file: PathBuf,
    pub restore_on_start: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&NavstackConfig::default(), None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.navstack`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navstack"))
}

/// Returns the path to `~/.navstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.navstack/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavstackConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavstackConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavstackConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NavstackConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<NavstackConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NavstackConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# navstack Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [logging]
# level = "info"                     # "off", "error", "warn", "info", "debug", "trace"
# file = "navstack.log"

# [middleware]
# log_actions = true                 # Log every dispatched action
# log_level = "debug"                # Level used for action lines
# log_prefix = "[navstack]"
# analytics = true                   # Emit one analytics event per action

# [persistence]
# state_file = "state.json"          # Relative to ~/.navstack/, or NAVSTACK_STATE_FILE
# restore_on_start = false
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
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
/// `cli_log_level` comes from the `--log-level` flag (None = not specified).
pub fn resolve(config: &NavstackConfig, cli_log_level: Option<&str>) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("NAVSTACK_LOG_LEVEL").ok())
        .or_else(|| config.logging.level.clone())
        .and_then(|s| parse_level_filter(&s))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = PathBuf::from(
        config
            .logging
            .file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
    );

    let action_log_level = config
        .middleware
        .log_level
        .as_deref()
        .and_then(parse_level_filter)
        .and_then(|f| f.to_level())
        .unwrap_or(DEFAULT_ACTION_LOG_LEVEL);

    // State file: env → config → default, relative names live under ~/.navstack/
    let state_file = std::env::var("NAVSTACK_STATE_FILE")
        .ok()
        .or_else(|| config.persistence.state_file.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
    let state_file = if state_file.is_relative() {
        config_dir().map(|d| d.join(&state_file)).unwrap_or(state_file)
    } else {
        state_file
    };

    ResolvedConfig {
        log_level,
        log_file,
        log_actions: config.middleware.log_actions.unwrap_or(true),
        action_log_level,
        action_log_prefix: config
            .middleware
            .log_prefix
            .clone()
            .unwrap_or_else(|| crate::middleware::logging::DEFAULT_PREFIX.to_string()),
        analytics: config.middleware.analytics.unwrap_or(true),
        state_file,
        restore_on_start: config.persistence.restore_on_start.unwrap_or(false),
    }
}

/// Parses a level name, case-insensitively. Unknown names are logged and
/// ignored.
fn parse_level_filter(name: &str) -> Option<LevelFilter> {
    match name.parse::<LevelFilter>() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Unknown log level '{}', ignoring", name);
            None
        }
    }
}

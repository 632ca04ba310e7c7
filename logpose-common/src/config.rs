//! Configuration loading and content root resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error; the service starts on defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the content root
pub const ENV_ROOT_FOLDER: &str = "LOGPOSE_ROOT_FOLDER";
/// Environment variable naming the HTTP port
pub const ENV_PORT: &str = "LOGPOSE_PORT";
/// Environment variable naming an explicit config file
pub const ENV_CONFIG: &str = "LOGPOSE_CONFIG";

/// Episode directory below the content root
pub const EPISODE_DIR: &str = "public/episode";
/// Static asset directory below the content root
pub const PUBLIC_DIR: &str = "public";

/// Number of cells in the progress grid (episodes aired so far)
pub const DEFAULT_TOTAL_EPISODES: u32 = 1136;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5730;
const DEFAULT_OVERRIDE_DIR: &str = "kill";
const DEFAULT_JOURNEY_FILE: &str = "data/journey.yaml";
const DEFAULT_PROGRESS_FILE: &str = "data/progress.yaml";

/// Bootstrap configuration as written in `config.toml`
///
/// Every field is optional; absent fields fall through to defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TomlConfig {
    /// Content root holding `public/` and `data/`
    pub root_folder: Option<PathBuf>,

    /// Address to bind the HTTP server to
    pub host: Option<String>,

    /// HTTP server port
    pub port: Option<u16>,

    /// Name of the override subdirectory inside the episode directory
    pub override_dir: Option<String>,

    /// Journey log, relative to the content root unless absolute
    pub journey_file: Option<PathBuf>,

    /// Progress record, relative to the content root unless absolute
    pub progress_file: Option<PathBuf>,

    /// Size of the progress grid
    pub total_episodes: Option<u32>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub root_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub override_dir: String,
    pub journey_file: PathBuf,
    pub progress_file: PathBuf,
    pub total_episodes: u32,
    pub log_level: String,
    /// Config file the settings were read from, if any
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(TomlConfig::default(), ConfigOverrides::default(), None, None)
    }
}

impl Config {
    /// Load configuration from CLI overrides, environment, and config file
    ///
    /// # Errors
    ///
    /// Returns error if an explicitly named config file is missing, if the
    /// config file cannot be parsed, or if `LOGPOSE_PORT` is not a port number.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let config_file = locate_config_file(overrides.config_path.as_deref())?;
        let toml_config = match &config_file {
            Some(path) => read_toml_config(path)?,
            None => TomlConfig::default(),
        };

        let env_root = std::env::var(ENV_ROOT_FOLDER).ok().map(PathBuf::from);
        let env_port = match std::env::var(ENV_PORT) {
            Ok(raw) => Some(raw.trim().parse::<u16>().map_err(|e| {
                Error::Config(format!("{} must be a port number, got {:?}: {}", ENV_PORT, raw, e))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            config_file,
            ..Self::resolve(toml_config, overrides, env_root, env_port)
        })
    }

    /// Log where the settings came from; call once tracing is installed
    pub fn log_source(&self) {
        match &self.config_file {
            Some(path) => info!("Loaded configuration from {}", path.display()),
            None => debug!("No config file found, using defaults"),
        }
    }

    /// Merge the configuration layers without touching the environment
    pub fn resolve(
        toml_config: TomlConfig,
        overrides: ConfigOverrides,
        env_root: Option<PathBuf>,
        env_port: Option<u16>,
    ) -> Self {
        let root_folder = overrides
            .root_folder
            .or(env_root)
            .or(toml_config.root_folder)
            .unwrap_or_else(|| PathBuf::from("."));

        let port = overrides
            .port
            .or(env_port)
            .or(toml_config.port)
            .unwrap_or(DEFAULT_PORT);

        let host = overrides
            .host
            .or(toml_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Self {
            root_folder,
            host,
            port,
            override_dir: toml_config
                .override_dir
                .unwrap_or_else(|| DEFAULT_OVERRIDE_DIR.to_string()),
            journey_file: toml_config
                .journey_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_JOURNEY_FILE)),
            progress_file: toml_config
                .progress_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRESS_FILE)),
            total_episodes: toml_config.total_episodes.unwrap_or(DEFAULT_TOTAL_EPISODES),
            log_level: toml_config.logging.level,
            config_file: None,
        }
    }

    /// Configuration rooted at `root_folder` with every other setting defaulted
    pub fn with_root(root_folder: impl Into<PathBuf>) -> Self {
        Self {
            root_folder: root_folder.into(),
            ..Self::default()
        }
    }

    /// Directory holding top-level episode files
    pub fn episode_dir(&self) -> PathBuf {
        self.root_folder.join(EPISODE_DIR)
    }

    /// Directory served as static assets
    pub fn public_dir(&self) -> PathBuf {
        self.root_folder.join(PUBLIC_DIR)
    }

    pub fn journey_path(&self) -> PathBuf {
        self.under_root(&self.journey_file)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.under_root(&self.progress_file)
    }

    fn under_root(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_folder.join(path)
        }
    }
}

/// Find the config file to read, if any
///
/// An explicit path (CLI, then `LOGPOSE_CONFIG`) must exist. The per-user
/// default location is only used when present.
fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

    if let Some(path) = explicit {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    Ok(dirs::config_dir()
        .map(|d| d.join("logpose").join("config.toml"))
        .filter(|p| p.exists()))
}

fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

//! Configuration loading and data directory resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is normal. A malformed one is logged and ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "OLIST_DATA_DIR";
/// Environment variable overriding the listen port
pub const ENV_PORT: &str = "OLIST_DASH_PORT";

/// Compiled defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDefaults {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("csv"),
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// Contents of `config.toml`; every key optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub data_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl DashConfig {
    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Platform config file location (`<config dir>/olist-dash/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("olist-dash").join("config.toml"))
}

/// Load the config file if one exists, falling back to an empty config
fn read_config_file(explicit: Option<&Path>) -> TomlConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using defaults");
                return TomlConfig::default();
            }
        },
    };

    match load_toml_config(&path) {
        Ok(config) => {
            debug!("Loaded config file {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Resolve the configuration from CLI, environment, config file and defaults
pub fn resolve_config(overrides: &ConfigOverrides) -> DashConfig {
    let file = read_config_file(overrides.config_file.as_deref());
    resolve_with(overrides, &file, &CompiledDefaults::default())
}

/// Resolution with an already-loaded config file
pub fn resolve_with(
    overrides: &ConfigOverrides,
    file: &TomlConfig,
    defaults: &CompiledDefaults,
) -> DashConfig {
    let data_dir = overrides
        .data_dir
        .clone()
        .or_else(|| std::env::var_os(ENV_DATA_DIR).map(PathBuf::from))
        .or_else(|| file.data_dir.clone())
        .unwrap_or_else(|| defaults.data_dir.clone());

    let env_port = std::env::var(ENV_PORT).ok().and_then(|raw| match raw.parse::<u16>() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!("Ignoring {}={}: not a valid port", ENV_PORT, raw);
            None
        }
    });

    let port = overrides
        .port
        .or(env_port)
        .or(file.port)
        .unwrap_or(defaults.port);

    let host = overrides
        .host
        .clone()
        .or_else(|| file.host.clone())
        .unwrap_or_else(|| defaults.host.clone());

    DashConfig {
        data_dir,
        host,
        port,
    }
}

//! Application configuration.
//!
//! Read from `stockflow.toml` and then overridden from the environment.
//! Every field has a default, so running without a file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{BucketZone, WindowPreset};
use crate::services::domain::{DEFAULT_FLOW_PADDING_MULTIPLIER, DEFAULT_MIN_ABS_FLOW_DOMAIN};
use crate::services::FlowSeriesOptions;

pub const CONFIG_FILE_NAME: &str = "stockflow.toml";
pub const CONFIG_PATH_ENV: &str = "STOCKFLOW_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("No {} found in standard locations", CONFIG_FILE_NAME)]
    NotFound,

    #[error("Invalid value for {name}: {message}")]
    InvalidEnv { name: String, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub chart: ChartSettings,
    pub seed: SeedSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chart defaults applied to every flow-series request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub default_preset: WindowPreset,
    pub flow_padding_multiplier: f64,
    pub min_abs_flow_domain: f64,
    pub bucket_zone: BucketZone,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_preset: WindowPreset::default(),
            flow_padding_multiplier: DEFAULT_FLOW_PADDING_MULTIPLIER,
            min_abs_flow_domain: DEFAULT_MIN_ABS_FLOW_DOMAIN,
            bucket_zone: BucketZone::default(),
        }
    }
}

impl ChartSettings {
    /// Options that request-level options fall back to.
    pub fn base_options(&self) -> FlowSeriesOptions {
        FlowSeriesOptions::new(self.default_preset)
            .with_flow_padding_multiplier(self.flow_padding_multiplier)
            .with_min_abs_flow_domain(self.min_abs_flow_domain)
            .with_zone(self.bucket_zone)
    }
}

/// Movements loaded into the in-memory repository at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    pub movements_file: Option<PathBuf>,
    pub item_name: String,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            movements_file: None,
            item_name: "Seed item".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the first `stockflow.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// File named by `STOCKFLOW_CONFIG`, else the default location, else
    /// defaults; then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match Self::from_default_location() {
                Ok(config) => config,
                Err(ConfigError::NotFound) => {
                    log::info!("No {} found, using defaults", CONFIG_FILE_NAME);
                    Self::default()
                }
                Err(e) => return Err(e),
            },
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT`, `STOCKFLOW_BUCKET_ZONE` and `STOCKFLOW_SEED_FILE`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidEnv {
                name: "PORT".to_string(),
                message: format!("'{}': {}", port, e),
            })?;
        }
        if let Some(zone) = lookup("STOCKFLOW_BUCKET_ZONE") {
            self.chart.bucket_zone = zone.parse().map_err(|message| ConfigError::InvalidEnv {
                name: "STOCKFLOW_BUCKET_ZONE".to_string(),
                message,
            })?;
        }
        if let Some(file) = lookup("STOCKFLOW_SEED_FILE") {
            self.seed.movements_file = Some(PathBuf::from(file));
        }
        Ok(())
    }
}

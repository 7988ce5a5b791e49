//! Application configuration layered from defaults, a TOML file and the environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::seed::SeedData;

/// Prefix for environment overrides, e.g. `SHIPPING_PORT=8080`.
pub const ENV_PREFIX: &str = "SHIPPING";

/// Directory under the user's config dir holding `config.toml`.
pub const DEFAULT_CONFIG_DIR: &str = "shipping-api";

/// Runtime configuration for the shipping API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// Default log level (`debug`, `info`, `warn`, `error`).
    pub log_level: String,
    /// Display label attached to booking prices.
    pub currency: String,
    /// Initial locations, rates and prices.
    pub seed: SeedData,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 80,
            log_level: "warn".to_string(),
            currency: "SEK".to_string(),
            seed: SeedData::default(),
        }
    }
}

impl AppConfig {
    /// `~/.config/shipping-api/config.toml` on Linux, or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(DEFAULT_CONFIG_DIR).join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist; otherwise the default path is read when
    /// present. Environment variables prefixed with [`ENV_PREFIX`] win over both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Some(path), true),
            None => Self::load_from(Self::default_path().as_deref(), false),
        }
    }

    /// Load from an optional file, failing if `required` and the file is absent.
    pub fn load_from(path: Option<&Path>, required: bool) -> Result<Self> {
        let defaults =
            Config::try_from(&AppConfig::default()).context("failed to encode default config")?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| match path {
                Some(path) => format!("failed to load config {}", path.display()),
                None => "failed to load config".to_string(),
            })?;

        config
            .try_deserialize()
            .context("failed to parse configuration")
    }
}

//! Command-line flags for the `shipping-api` binary.

use std::path::PathBuf;

use clap::Parser;
use shipping_core::AppConfig;

/// Quote and book shipments over HTTP.
#[derive(Debug, Parser)]
#[command(name = "shipping-api", version)]
pub struct Args {
    /// Log level: debug, info, warn or error.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Port to listen on.
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Override `config` with every flag that was given.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

//! Tracing subscriber setup.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Map a `--log-level` value to a filter.
///
/// Unknown values fall back to `warn`; the second element reports whether the
/// input was recognised.
pub fn parse_level(level: &str) -> (LevelFilter, bool) {
    match level {
        "debug" => (LevelFilter::DEBUG, true),
        "info" => (LevelFilter::INFO, true),
        "warn" => (LevelFilter::WARN, true),
        "error" => (LevelFilter::ERROR, true),
        _ => (LevelFilter::WARN, false),
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, overrides `level`.
pub fn init_logging(level: &str) -> Result<()> {
    let (default_level, known) = parse_level(level);
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init()?;

    if !known {
        tracing::warn!("unknown log level {level}, using warn");
    }
    Ok(())
}

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Installs the global tracing subscriber. `RUST_LOG` wins when set;
/// otherwise this crate logs at `default_level`.
///
/// Fails instead of panicking when a subscriber is already installed, so an
/// embedding application may own tracing setup.
pub fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
            default_level
        ))
    });
    install(filter)
}

/// Installs the global tracing subscriber filtered by `config.rust_log`,
/// which `Config::from_env` reads from `RUST_LOG` or `.env`.
pub fn init_tracing_from_config(config: &Config) -> Result<()> {
    install(config_filter(config)?)
}

fn config_filter(config: &Config) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.rust_log)
        .with_context(|| format!("Invalid RUST_LOG filter: {}", config.rust_log))
}

fn install(filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("A global tracing subscriber is already installed")
}

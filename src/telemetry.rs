//! Log setup for hosts. Filter comes from `LOG_LEVEL`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global subscriber writing to `log_file`. Fails if one is
/// already installed.
pub fn init(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("creating log file {}", log_file.display()))?;
    let filter = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
    let registry = tracing_subscriber::registry().with(filter).with(fmt_layer);
    registry
        .try_init()
        .context("installing the tracing subscriber")
}

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// With `log_file` set, output goes to that file instead of stderr so the
/// full-screen dashboard is not painted over.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            registry
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()?;
        }
        None => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
    }
    Ok(())
}

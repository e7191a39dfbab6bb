//! File-based tracing setup.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,starmoon=debug";

/// Sends tracing output to `path`, leaving the terminal to the UI.
///
/// Safe to call more than once; later calls keep the first subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init_file_logging(path: &Path) -> std::io::Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

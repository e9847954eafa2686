//! Boot — logging init and config load.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::load::LoadError;
use crate::conf::WorkbenchConfig;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr so stdout stays clean for generated output.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workbench=info,engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate configuration.
pub fn boot() -> Result<WorkbenchConfig, LoadError> {
    info!("Starting workbench v{}", env!("CARGO_PKG_VERSION"));

    let config = WorkbenchConfig::load()?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!(
        "Noise filter: defaults={}, extra_patterns={}",
        config.scan.use_default_patterns,
        config.scan.extra_patterns.len()
    );
    info!(
        "History: path={}, max_entries={}, max_bytes={}",
        config.history.path, config.history.max_entries, config.history.max_bytes
    );

    Ok(config)
}

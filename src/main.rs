//! HealthScope: terminal disease-risk screening.
//!
//! Main entry point for the terminal application.

use std::sync::Arc;

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use healthscope::adapters::artifact::ArtifactStore;
use healthscope::adapters::sanitize::SanitizingMakeWriter;
use healthscope::application::{Dispatcher, ModelSet};
use healthscope::config::AppConfig;
use healthscope::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Initialize logging.
    //
    // Writing logs to the terminal corrupts the TUI (alternate screen):
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let (writer, _guard) = if config.log_mode.use_file(std::io::stdout().is_terminal()) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting HealthScope...");

    // Refuse to start unless every model loads and verifies.
    let policy = config.integrity_policy()?;
    let store = ArtifactStore::open(&config.model_path, &policy).with_context(|| {
        format!(
            "Model directory {:?} unavailable. Set HEALTHSCOPE_MODEL_PATH to the directory holding the model artifacts.",
            config.model_path
        )
    })?;
    let models = ModelSet::load(&store).map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    let mut app = App::new(Dispatcher::new(Arc::new(models)));
    app.run()?;

    tracing::info!("HealthScope shutdown complete.");
    Ok(())
}

//! rangecard - A dual-handle range slider card for the terminal.
//!
//! This is the main binary that launches the TUI application.
//!
//! Usage: `rangecard [CONFIG]`. Without a path, the configuration is looked
//! up in the current directory and then in the user config directory.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use rangecard_config::{Config, persistence::resolve_config_path};
use rangecard_protocol::MemoryStore;
use rangecard_tui::{App, terminal};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `rangecard=debug`.
const LOG_ENV: &str = "RANGECARD_LOG";

/// Installs a file logger when `RANGECARD_LOG` is set.
///
/// Logs go to `<cache_dir>/rangecard/rangecard.log`; the terminal belongs to
/// the UI.
fn init_logging() -> anyhow::Result<Option<PathBuf>> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };

    let dir = dirs::cache_dir()
        .context("could not determine cache directory")?
        .join("rangecard");
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join("rangecard.log");
    let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(Some(path))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Some(path) = init_logging()? {
        tracing::info!(path = %path.display(), "logging enabled");
    }

    let config_path = resolve_config_path(std::env::args_os().nth(1).map(PathBuf::from));
    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load().await?,
    };
    let store = MemoryStore::with_values(config.states.clone());

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(config, store).with_config_path(config_path);
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}

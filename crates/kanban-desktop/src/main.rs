//! Kanban for Managers desktop shell entry point.
//!
//! Loads the configuration and the task board, then hosts the front-end:
//!
//! - In a native window with an embedded webview (feature `webview`).
//! - On the console otherwise, or with `--headless`: one JSON request per
//!   input line, one reply per output line.
//!
//! # Usage
//!
//! ```text
//! kanban-desktop [OPTIONS]
//!
//! Options:
//!   --config      <PATH>  Config file [default: platform config dir]
//!   --tasks-file  <PATH>  Task board file [default: tasks.json in config dir]
//!   --assets-dir  <PATH>  Directory holding elm.js and gui/main.css
//!   --headless            Use the console host even when a window is available
//!   --debug               Enable webview developer tools
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable            | Overrides         |
//! |---------------------|-------------------|
//! | `KANBAN_CONFIG`     | `--config`        |
//! | `TASK_FILE_PATH`    | `--tasks-file`    |
//! | `KANBAN_ASSETS_DIR` | `--assets-dir`    |
//! | `RUST_LOG`          | `[app] log_level` |

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kanban_desktop::application::{ActionHandler, RequestHandler, SystemClock, TaskCache};
use kanban_desktop::infrastructure::storage::config::{
    default_tasks_file, load_config, load_config_from, AppConfig,
};
use kanban_desktop::infrastructure::storage::tasks::JsonTaskStore;
use kanban_desktop::infrastructure::ui_bridge::console::{
    build_console_bridge, run_console, ConsoleProgram,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Kanban for Managers desktop shell.
#[derive(Debug, Parser)]
#[command(
    name = "kanban-desktop",
    about = "Task board for managers, hosted in a native webview",
    version
)]
struct Cli {
    /// Config file to read instead of the platform default.
    #[arg(long, env = "KANBAN_CONFIG")]
    config: Option<PathBuf>,

    /// Task board file.
    #[arg(long, env = "TASK_FILE_PATH")]
    tasks_file: Option<PathBuf>,

    /// Directory the page assets are read from.
    #[arg(long, env = "KANBAN_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Host the front-end on the console instead of in a window.
    #[arg(long)]
    headless: bool,

    /// Enable the webview developer tools.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Reads the config file and applies the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    fn load_app_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => load_config().context("failed to load config")?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(tasks_file) = &self.tasks_file {
            config.storage.tasks_file = Some(tasks_file.clone());
        }
        if let Some(dir) = &self.assets_dir {
            config.assets.dir = dir.clone();
        }
        config.window.debug |= self.debug;
    }
}

/// Task file from the config, or the default one in the config directory.
fn resolve_tasks_file(config: &AppConfig) -> anyhow::Result<PathBuf> {
    match &config.storage.tasks_file {
        Some(path) => Ok(path.clone()),
        None => default_tasks_file().context("no task file configured and no config directory"),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_app_config()?;

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.app.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = JsonTaskStore::new(resolve_tasks_file(&config)?);
    info!(tasks_file = %store.path().display(), "Kanban for Managers starting");

    let mut cache = TaskCache::new(store);
    cache.initialize();
    let handler: Box<dyn RequestHandler> = Box::new(ActionHandler::new(cache, SystemClock));

    #[cfg(feature = "webview")]
    if !cli.headless {
        use kanban_desktop::infrastructure::ui_bridge::page::{render_page, PageAssets};
        use kanban_desktop::infrastructure::ui_bridge::webview::run_webview;

        let assets = PageAssets::load(&config.assets).context("failed to load page assets")?;
        let page = render_page(&config.window.title, &assets, &config.bridge)?;
        return run_webview(&config, page, handler);
    }

    #[cfg(not(feature = "webview"))]
    if !cli.headless {
        info!("built without the `webview` feature; hosting the front-end on the console");
    }

    let (bridge, _table) = build_console_bridge(&config.bridge, handler, &ConsoleProgram::stdout())
        .context("failed to start console host")?;

    run_console(&bridge, BufReader::new(tokio::io::stdin()), async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler available: run until the input ends.
            std::future::pending::<()>().await;
        }
    })
    .await
    .context("console host failed")?;

    info!("Kanban for Managers stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        // Arrange / Act
        let cli = Cli::try_parse_from(["kanban-desktop"]).unwrap();

        // Assert
        assert!(!cli.headless);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_headless_flag() {
        let cli = Cli::parse_from(["kanban-desktop", "--headless"]);
        assert!(cli.headless);
    }

    #[test]
    fn test_tasks_file_override_replaces_configured_file() {
        // Arrange
        let cli = Cli::parse_from(["kanban-desktop", "--tasks-file", "/tmp/other.json"]);
        let mut config = AppConfig::default();
        config.storage.tasks_file = Some(PathBuf::from("/tmp/configured.json"));

        // Act
        cli.apply_overrides(&mut config);

        // Assert
        assert_eq!(
            resolve_tasks_file(&config).unwrap(),
            PathBuf::from("/tmp/other.json")
        );
    }

    #[test]
    fn test_assets_dir_override() {
        let cli = Cli::parse_from(["kanban-desktop", "--assets-dir", "/opt/kanban"]);
        let mut config = AppConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(
            config.assets.program_script_path(),
            PathBuf::from("/opt/kanban/elm.js")
        );
    }

    #[test]
    fn test_debug_flag_enables_devtools_but_never_disables_them() {
        let cli = Cli::parse_from(["kanban-desktop"]);
        let mut config = AppConfig::default();
        config.window.debug = true;

        cli.apply_overrides(&mut config);

        assert!(config.window.debug);
    }

    #[test]
    fn test_explicit_missing_config_file_yields_defaults() {
        let path = std::env::temp_dir()
            .join(format!("kanban-cli-{}", uuid::Uuid::new_v4()))
            .join("config.toml");
        let cli = Cli::parse_from([
            "kanban-desktop".into(),
            "--config".into(),
            path.into_os_string(),
        ]);

        let config = cli.load_app_config().unwrap();

        assert_eq!(config.window.title, "Kanban for Managers");
    }

    #[test]
    fn test_configured_tasks_file_is_used_without_override() {
        let mut config = AppConfig::default();
        config.storage.tasks_file = Some(PathBuf::from("board.json"));

        assert_eq!(resolve_tasks_file(&config).unwrap(), PathBuf::from("board.json"));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use greedy_snake::app::App;
use greedy_snake::error::{Error, Result};
use greedy_snake::input::InputHandler;
use greedy_snake::renderer::TerminalRenderer;
use greedy_snake::settings::{GameSettings, SettingsHandle, settings_path};
use greedy_snake::terminal_runtime::install_panic_hook;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const APP_DIR: &str = "greedy-snake";
const LOG_FILE: &str = "greedy-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file to load and save.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Directory for the log file.
    #[arg(long = "log-dir", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Disable file logging.
    #[arg(long = "no-log")]
    no_log: bool,

    /// Fixed seed for food placement.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = if cli.no_log {
        None
    } else {
        let dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
        Some(setup_logging(&dir)?)
    };

    let store = cli.settings.clone().unwrap_or_else(settings_path);
    let settings = SettingsHandle::new(load_settings(&store))
        .with_store(store)
        .with_seed(cli.seed);

    install_panic_hook();

    App::new(TerminalRenderer::new(), InputHandler::new(), settings).run()
}

fn load_settings(path: &Path) -> GameSettings {
    let mut settings = GameSettings::default();

    match settings.load_from_path(path) {
        Ok(()) => info!(path = %path.display(), "settings loaded"),
        Err(error) if error.is_not_found() => {
            info!(path = %path.display(), "no settings file, using defaults");
        }
        Err(error) => warn!(%error, "settings not loaded, using defaults"),
    }

    settings
}

fn setup_logging(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|error| Error::Logging(error.to_string()))?;

    info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}

fn default_log_dir() -> PathBuf {
    let mut dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push(APP_DIR);
    dir.push("logs");
    dir
}

#[cfg(test)]
mod tests {
    use std::fs;

    use greedy_snake::settings::GameSettings;

    use super::load_settings;

    #[test]
    fn load_settings_reads_the_store_or_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("greedy-snake-main-{}", std::process::id()));
        let path = dir.join("settings.ini");

        assert_eq!(load_settings(&path), GameSettings::default());

        fs::create_dir_all(&dir).expect("temp dir should be creatable");
        fs::write(&path, "gameSpeed=2\nborders=false\n").expect("settings should be writable");
        let loaded = load_settings(&path);
        assert_eq!(loaded.game_speed(), 2);
        assert!(!loaded.walls_enabled());

        let _ = fs::remove_dir_all(&dir);
    }
}

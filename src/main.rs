//! Pointage - library check-in kiosk and administration console.

use std::path::{Path, PathBuf};

use clap::Parser;
use eframe::egui;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use biblio_pointage as app;

use app::client::ApiClient;
use app::config::{API_URL_ENV, AppConfig, ConfigLoadResult};
use app::session::{self, FileSessionStore, SessionController};
use app::ui::PointageApp;

/// Library check-in kiosk and administration console.
#[derive(Parser)]
#[command(name = "biblio-pointage")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Override the API base URL
    #[arg(long)]
    api_url: Option<String>,
}

/// Log to stdout and to a daily file; the guard must outlive the app.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let stdout_layer = fmt::layer().with_target(false);

    let log_dir = session::data_dir().join("logs");
    match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&log_dir, "pointage.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(writer);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();
            tracing::info!("Logging to {}", log_dir.display());
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .init();
            tracing::warn!("Log directory unavailable ({}), logging to stdout only", e);
            None
        }
    }
}

/// Load config, falling back to defaults. Returns a warning to show when the file was unusable.
fn load_config(path: &Path) -> (AppConfig, Option<String>) {
    match AppConfig::try_load(path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Could not write default config: {}", e);
            }
            (config, None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            (AppConfig::default(), Some(format!("Configuration ignorée : {e}")))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    tracing::info!("Pointage starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let (mut config, mut warning) = load_config(&config_path);
    config.apply_overrides(cli.api_url, std::env::var(API_URL_ENV).ok());
    if let Err(e) = config.validate() {
        tracing::warn!("API URL override rejected: {}", e);
        config.api = AppConfig::default().api;
        warning = Some(format!("URL d'API ignorée : {e}"));
    }
    tracing::info!("API: {}", config.api.base_url);

    let api = ApiClient::new(&config.api)?;
    let session = SessionController::restore(Box::new(FileSessionStore::default_location()));

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Pointage Bibliothèque")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pointage Bibliothèque",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(PointageApp::new(&cc.egui_ctx, rt, config, api, session, warning)))
        }),
    )?;

    tracing::info!("Pointage stopped");
    Ok(())
}

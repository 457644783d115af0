//! MediCare Portal - Desktop patient portal for appointment booking.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use eframe::egui;
use medicare_portal as portal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use portal::backend::{PortalBackend, SimulatedBackend};
use portal::config::{AppConfig, ConfigLoadResult};
use portal::ui::App;

/// Desktop patient portal for booking hospital appointments.
#[derive(Parser)]
#[command(name = "medicare-portal")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Load configuration from this file instead
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start signed in as the demo patient
    #[arg(long)]
    skip_login: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines reach the file
    let (_guard, log_error) = match init_logging() {
        Ok(guard) => (Some(guard), None),
        Err(e) => {
            init_console_logging();
            (None, Some(e))
        }
    };
    if let Some(e) = log_error {
        tracing::warn!("File logging disabled: {:#}", e);
    }

    tracing::info!("MediCare Portal starting...");

    // Determine config path based on mode
    let config_path = match cli.config {
        Some(path) => path,
        None if cli.dev => {
            tracing::info!("Dev mode: loading config from current directory");
            PathBuf::from("config.toml")
        }
        None => AppConfig::default_path(),
    };
    tracing::info!("Config path: {:?}", config_path);

    let (config, startup_error) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Could not write default config: {}", e);
            }
            (config, None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            let message = format!("{e}\n\nDefault settings are in use for this session.");
            (AppConfig::default(), Some(message))
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let backend: Arc<dyn PortalBackend> = Arc::new(SimulatedBackend::from_config(&config));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{} - Patient Portal", config.hospital.name))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    let skip_login = cli.skip_login;
    eframe::run_native(
        "MediCare Portal",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            if config.ui.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            let mut app = App::new(config, config_path, rt, backend);
            app.error_message = startup_error;
            if skip_login {
                app.skip_login();
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {e}"))
}

/// Console plus rolling daily file logging.
fn init_logging() -> anyhow::Result<WorkerGuard> {
    let dirs = ProjectDirs::from("mw", "Mwaiwathu", "MediCare Portal")
        .context("Could not resolve a data directory")?;
    let log_dir = dirs.data_local_dir().join("logs");
    std::fs::create_dir_all(&log_dir).with_context(|| format!("Failed to create {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, "portal.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

fn init_console_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .try_init();
}

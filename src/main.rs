use anyhow::{Context, Result};
use clap::Parser;
use devreport::config::AppConfig;
use devreport::report;
use devreport::ui::{load_css, MainWindow};
use devreport::{Dashboard, DashboardState, Timing};
use devreport_core::Accessors;
use gtk4::prelude::*;
use gtk4::{glib, Application, ApplicationWindow};
use log::{error, info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::oneshot;

const APP_ID: &str = "org.devreport.DeviceReport";

/// devreport - battery, performance, display and device information at a glance
#[derive(Parser, Debug, Clone)]
#[command(name = "devreport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Override the performance/display refresh interval in milliseconds
    #[arg(short = 'i', long = "interval-ms", value_name = "MS")]
    interval_ms: Option<u64>,

    /// Print a single JSON report to stdout and exit
    #[arg(long = "once")]
    once: bool,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting devreport v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(&cli);
    if let Some(interval_ms) = cli.interval_ms {
        config.refresh_interval_ms = interval_ms;
    }

    let accessors = devreport_sources::linux_accessors(config.source_configs());

    if cli.once {
        if let Err(e) = print_report(&accessors) {
            error!("{:#}", e);
            std::process::exit(1);
        }
        return;
    }

    run_gui(config, accessors);
}

/// Config from `--config` if given, otherwise the default location.
/// Unreadable files fall back to defaults.
fn load_config(cli: &Cli) -> AppConfig {
    if let Some(ref path) = cli.config {
        match AppConfig::load_from_path(path) {
            Ok(config) => {
                info!("Loaded config from: {}", path.display());
                return config;
            }
            Err(e) => warn!("Failed to load config file '{}': {:#}", path.display(), e),
        }
    }

    AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {:#}", e);
        AppConfig::default()
    })
}

fn print_report(accessors: &Accessors) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
    let report = rt.block_on(report::collect(accessors));
    println!("{}", report.to_json().context("serializing report")?);
    Ok(())
}

fn run_gui(config: AppConfig, accessors: Accessors) {
    let state = DashboardState::new();
    let timing = Timing::from(&config);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    // Spawn tokio runtime owning the mounted dashboard
    let runtime_state = state.clone();
    let runtime_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime: {}", e);
                return;
            }
        };
        rt.block_on(async {
            let dashboard = Dashboard::mount(&accessors, runtime_state, timing);
            // Sender dropped or signalled: either way the window is gone
            let _ = shutdown_rx.await;
            drop(dashboard);
        });
    });

    let shutdown = Rc::new(RefCell::new(Some(shutdown_tx)));

    let app = Application::builder().application_id(APP_ID).build();
    {
        let shutdown = shutdown.clone();
        app.connect_activate(move |app| build_ui(app, &config, state.clone(), shutdown.clone()));
    }

    // Pass only the program name; arguments were already parsed
    app.run_with_args(&["devreport"]);

    if let Some(tx) = shutdown.borrow_mut().take() {
        let _ = tx.send(());
    }
    if runtime_thread.join().is_err() {
        error!("Runtime thread panicked");
    }
}

fn build_ui(
    app: &Application,
    config: &AppConfig,
    state: Arc<DashboardState>,
    shutdown: Rc<RefCell<Option<oneshot::Sender<()>>>>,
) {
    info!("Building UI");
    load_css();

    let main_window = MainWindow::new(state);

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Device Report")
        .default_width(config.window.width)
        .default_height(config.window.height)
        .child(&main_window.widget())
        .build();

    window.connect_close_request(move |_| {
        // Unmount the dashboard before the window goes away
        if let Some(tx) = shutdown.borrow_mut().take() {
            let _ = tx.send(());
        }
        glib::Propagation::Proceed
    });

    window.present();
}

mod capabilities;
mod cli_messages;
mod config;
mod consts;
mod events;
mod heading;
mod location;
mod logging;
mod readout;
mod reading;
mod release;
mod session;
mod ui;

use crate::capabilities::SystemWakeLock;
use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::replay::DEFAULT_INTERVAL_MS;
use crate::location::{SourceSpec, WatchOptions};
use crate::session::{SessionOptions, run_headless_mode, run_tui_mode, setup_session};
use crate::ui::UIConfig;
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the speedometer dashboard
    Start {
        /// gpsd address to watch (HOST:PORT). Overrides the configured source.
        #[arg(long, value_name = "ADDR", conflicts_with = "replay")]
        gpsd: Option<String>,

        /// Replay a JSON-lines recording instead of watching gpsd
        #[arg(long, value_name = "FILE")]
        replay: Option<PathBuf>,

        /// Pause between replayed lines, in milliseconds
        #[arg(long, value_name = "MS", default_value_t = DEFAULT_INTERVAL_MS)]
        replay_interval_ms: u64,

        /// Print one line per update instead of drawing the dashboard
        #[arg(long, action = ArgAction::SetTrue)]
        headless: bool,

        /// Offset altitudes by the first negative reading
        #[arg(long, action = ArgAction::SetTrue)]
        calibrate_altitude: bool,

        /// Keep the screen awake while the dashboard runs
        #[arg(long, action = ArgAction::SetTrue)]
        keep_awake: bool,

        /// Accept 2D fixes from gpsd
        #[arg(long, action = ArgAction::SetTrue)]
        low_accuracy: bool,

        /// Enable background colors
        #[arg(long = "with-background", action = ArgAction::SetTrue)]
        with_background: bool,

        /// Show the diagnostics panel
        #[arg(long, action = ArgAction::SetTrue)]
        diagnostics: bool,
    },
    /// Save defaults for `start`
    Configure {
        /// gpsd address to watch by default (HOST:PORT)
        #[arg(long, value_name = "ADDR")]
        gpsd: Option<String>,

        /// Apply the negative-altitude calibration by default
        #[arg(long, value_name = "BOOL")]
        calibrate_altitude: Option<bool>,

        /// Keep the screen awake by default
        #[arg(long, value_name = "BOOL")]
        keep_awake: Option<bool>,
    },
    /// Delete the saved configuration
    ClearConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_max_level();

    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            gpsd,
            replay,
            replay_interval_ms,
            headless,
            calibrate_altitude,
            keep_awake,
            low_accuracy,
            with_background,
            diagnostics,
        } => {
            let config = Config::load_or_default(&config_path)
                .map_err(|e| format!("Failed to load config: {}", e))?;

            let source = match (gpsd, replay) {
                (_, Some(path)) => SourceSpec::Replay { path },
                (Some(address), None) => format!("gpsd://{}", address).parse()?,
                (None, None) => config.source_spec()?,
            };

            let options = SessionOptions {
                watch: WatchOptions {
                    high_accuracy: !low_accuracy,
                },
                keep_awake: keep_awake || config.keep_awake,
                calibrate_altitude: calibrate_altitude || config.calibrate_altitude,
            };
            start(
                source,
                Duration::from_millis(replay_interval_ms),
                options,
                headless,
                UIConfig::new(with_background, diagnostics),
            )
            .await
        }
        Command::Configure {
            gpsd,
            calibrate_altitude,
            keep_awake,
        } => {
            let mut config = Config::load_or_default(&config_path)
                .map_err(|e| format!("Failed to load config: {}", e))?;
            if let Some(address) = gpsd {
                let source: SourceSpec = format!("gpsd://{}", address).parse()?;
                config.source = source.to_string();
            }
            if let Some(calibrate_altitude) = calibrate_altitude {
                config.calibrate_altitude = calibrate_altitude;
            }
            if let Some(keep_awake) = keep_awake {
                config.keep_awake = keep_awake;
            }
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!(
                "Configuration saved",
                "{} (source {}, calibrate altitude {}, keep awake {})",
                config_path.display(),
                config.source,
                config.calibrate_altitude,
                config.keep_awake
            );
            Ok(())
        }
        Command::ClearConfig => {
            if !config_path.exists() {
                print_cmd_warn!("No configuration to clear", "{}", config_path.display());
                return Ok(());
            }
            print_cmd_info!("Clearing configuration", "{}", config_path.display());
            Config::clear(&config_path).map_err(|e| format!("Failed to clear config: {}", e))?;
            print_cmd_success!("Configuration cleared", "");
            Ok(())
        }
    }
}

/// Starts the dashboard.
///
/// # Arguments
/// * `source` - Location source to watch.
/// * `replay_interval` - Pause between lines of a replay source.
/// * `options` - Subscription, wake lock and calibration options.
/// * `headless` - Print updates instead of running the TUI.
/// * `ui_config` - Presentation options for the TUI.
async fn start(
    source: SourceSpec,
    replay_interval: Duration,
    options: SessionOptions,
    headless: bool,
    ui_config: UIConfig,
) -> Result<(), Box<dyn Error>> {
    let mut source = source.build(replay_interval);
    let mut wake_locks = SystemWakeLock::new();
    let session = setup_session(source.as_mut(), &mut wake_locks, options).await;

    if headless {
        run_headless_mode(session).await
    } else {
        run_tui_mode(session, ui_config).await
    }
}

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::layout::Rect;
use tracing::Level;

use spatial_desk::config::DesktopConfig;
use spatial_desk::desktop::Desktop;
use spatial_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use spatial_desk::layout::CellMetrics;
use spatial_desk::runner::run_desktop;
use spatial_desk::tracing_sub;

#[derive(Parser, Debug)]
#[command(
    name = "spatial-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A spatial desktop with draggable windows, a dock and a guided tour"
)]
struct Cli {
    /// JSON file holding the tour flag and notes. In-memory when omitted.
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Show the first-run tour again.
    #[arg(long)]
    reset_tour: bool,

    /// Delay before the first-run tour appears.
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    tour_delay_ms: u64,

    /// Virtual pixels per terminal column.
    #[arg(long, value_name = "PX", default_value_t = 10)]
    cell_width: u16,

    /// Virtual pixels per terminal row.
    #[arg(long, value_name = "PX", default_value_t = 20)]
    cell_height: u16,

    /// Append log lines to this file as well as the in-app monitor.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "debug")]
    log_level: Level,

    /// Input poll interval.
    #[arg(long, value_name = "MS", default_value_t = 16)]
    poll_ms: u64,
}

impl TryFrom<&Cli> for DesktopConfig {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.cell_width == 0 || cli.cell_height == 0 {
            return Err("cell metrics must be at least 1x1 pixels".to_string());
        }
        if !(1..=1000).contains(&cli.poll_ms) {
            return Err("poll interval must be between 1 and 1000 ms".to_string());
        }
        Ok(Self {
            store_path: cli.store.clone(),
            reset_tour: cli.reset_tour,
            tour_delay: Duration::from_millis(cli.tour_delay_ms),
            cell_metrics: CellMetrics::new(cli.cell_width, cli.cell_height),
            log_file: cli.log_file.clone(),
            log_level: cli.log_level,
            poll_interval: Duration::from_millis(cli.poll_ms),
        })
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = DesktopConfig::try_from(&cli)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    tracing_sub::init(config.log_level, config.log_file.as_deref())?;

    let store = config.open_store().map_err(io::Error::other)?;
    let (width, height) = crossterm::terminal::size()?;
    let mut desktop = Desktop::new(store, &config, Rect::new(0, 0, width, height));
    tracing::info!(width, height, "desktop starting");

    let mut output = ConsoleOutputDriver::new()?;
    let result = run_desktop(
        &mut output,
        ConsoleInputDriver::new(),
        &mut desktop,
        config.poll_interval,
    );
    tracing::info!("desktop stopped");
    result
}

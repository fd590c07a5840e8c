use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use rollsweep::analysis::{UnitMode, convert};
use rollsweep::config::{DashboardConfig, TickPeriod};
use rollsweep::output::{
    LogOverview, OutputFormat, PlaybackLine, create_formatter, render_figure, render_summary,
};
use rollsweep::{Channel, PlaybackDriver, SweepDashboard, load_log};

#[derive(Parser, Debug)]
#[command(name = "rollsweep")]
#[command(about = "Replay and post-process roll attitude frequency sweep logs", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sweep log (CSV); overrides `log_path` from the config file
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Unit for angle and rate columns: radians, degrees
    #[arg(short, long, value_enum)]
    unit: Option<UnitMode>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log facts and per-channel statistics
    Summary,
    /// Step through the log one tick at a time
    Playback {
        /// Tick period (e.g., "1000", "500ms", "2s")
        #[arg(long)]
        tick_period: Option<TickPeriod>,

        /// Seconds of history behind the cursor
        #[arg(long)]
        history: Option<u32>,

        /// Wait one tick period between ticks
        #[arg(long)]
        realtime: bool,

        /// Stop after this many ticks even if the log continues
        #[arg(long)]
        max_ticks: Option<u64>,
    },
    /// Three-panel strip chart from a start time to the end of the log
    Strip {
        /// Start time in seconds; must match a row
        #[arg(long)]
        from: Option<f64>,
    },
    /// Time and frequency overlays of selected columns
    Spectrum {
        /// Start time in seconds; must match a row
        #[arg(long)]
        from: Option<f64>,

        /// Column to include (repeatable), by CSV name or alias
        #[arg(short = 'c', long = "channel")]
        channels: Vec<Channel>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(args: &Args) -> anyhow::Result<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    if let Some(unit) = args.unit {
        config.display.unit = unit;
    }
    if let Some(log) = &args.log {
        config.log_path = Some(log.clone());
    }

    match &args.command {
        Command::Playback {
            tick_period,
            history,
            ..
        } => {
            if let Some(period) = tick_period {
                config.playback.tick_period_ms = period.as_millis();
            }
            if let Some(history) = history {
                config.playback.history_seconds = *history;
            }
        }
        Command::Strip { from } => {
            if from.is_some() {
                config.post_process.start_time_s = *from;
            }
        }
        Command::Spectrum { from, channels } => {
            if from.is_some() {
                config.post_process.start_time_s = *from;
            }
            if !channels.is_empty() {
                config.post_process.channels = channels.clone();
            }
        }
        Command::Summary => {}
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let log_path = config
        .log_path
        .clone()
        .context("No sweep log given (use --log or set log_path in the config file)")?;
    let table = load_log(&log_path)
        .with_context(|| format!("Failed to load sweep log {}", log_path.display()))?;
    let unit = config.display.unit;

    match &args.command {
        Command::Summary => {
            let overview = LogOverview::new(&convert(&table, unit));
            print!("{}", render_summary(&overview, args.format));
        }
        Command::Playback {
            realtime,
            max_ticks,
            ..
        } => {
            let mut driver = PlaybackDriver::new(&table, &config.playback)
                .context("Cannot replay this log")?;
            let view = convert(&table, unit);
            let formatter = create_formatter(args.format, args.verbose > 0);
            if let Some(header) = formatter.header() {
                println!("{}", header);
            }

            let pause = Duration::from_millis(config.playback.tick_period_ms as u64);
            let mut tick = 0;
            loop {
                let frame = driver.tick(&table, tick)?;
                if let Some(line) = PlaybackLine::from_frame(&frame, &view, driver.is_halted()) {
                    println!("{}", formatter.format(&line));
                }
                tick += 1;
                if driver.is_halted() || max_ticks.is_some_and(|max| tick >= max) {
                    break;
                }
                if *realtime {
                    std::thread::sleep(pause);
                }
            }
        }
        Command::Strip { .. } => {
            let mut dashboard = SweepDashboard::new(&table);
            let request = dashboard.request_from_config(&config)?;
            let figures = dashboard.post_process(&request)?;
            print!("{}", render_figure(&figures.strip, args.format));
        }
        Command::Spectrum { .. } => {
            let mut dashboard = SweepDashboard::new(&table);
            let request = dashboard.request_from_config(&config)?;
            if request.channels.is_empty() {
                log::warn!("No channels selected; only the baseline is drawn");
            }
            let figures = dashboard.post_process(&request)?;
            match args.format {
                OutputFormat::Json => {
                    let both = serde_json::json!({
                        "time": figures.time,
                        "frequency": figures.frequency,
                    });
                    println!("{}", serde_json::to_string_pretty(&both)?);
                }
                format => {
                    print!("{}", render_figure(&figures.time, format));
                    print!("{}", render_figure(&figures.frequency, format));
                }
            }
        }
    }

    Ok(())
}

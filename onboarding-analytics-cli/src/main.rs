//! Onboarding Analytics CLI Application
//!
//! Command-line front end for the onboarding-analytics library. It can:
//! - List every tracking key the taxonomy produces
//! - Track a single event described by flags
//! - Replay a scripted onboarding session from a TOML file
//!
//! Events are written as JSON lines to stdout or a file.

use anyhow::{bail, Context, Result};
use clap::Parser;
use onboarding_analytics::{
    AnalyticsSink, EventTracker, EventType, Extension, OnboardingAction, OnboardingEvent,
    ParameterValue, Parameters, Screen,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

mod config;
mod output;

use config::{ScriptConfig, TrackMode};
use output::JsonLinesSink;

/// Onboarding Analytics - Track onboarding events as JSON lines
#[derive(Parser, Debug)]
#[command(name = "onboarding-analytics")]
#[command(about = "Track onboarding analytics events", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a tracking script (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Event category: general or first_start
    #[arg(long, default_value = "general")]
    category: String,

    /// Action name, e.g. screen_shown
    #[arg(short, long)]
    action: Option<String>,

    /// Screen label for screen-carrying actions, e.g. "Game Reward"
    #[arg(long)]
    screen: Option<Screen>,

    /// Extension for extension-carrying actions: iMessage or Keyboard
    #[arg(long)]
    extension: Option<Extension>,

    /// Extra parameter as key=value (can be repeated)
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Print every known tracking key and exit
    #[arg(long)]
    list: bool,

    /// Output file for JSON lines (default: stdout, overrides the script)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Omit timestamps from the output
    #[arg(long)]
    no_timestamp: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Onboarding Analytics CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using library v{}", onboarding_analytics::VERSION);

    if args.list {
        for key in EventType::all_keys() {
            println!("{}", key);
        }
        return Ok(());
    }

    if let Some(config_path) = &args.config {
        script_mode(config_path, &args)
    } else if let Some(action) = &args.action {
        single_event_mode(action, &args)
    } else {
        println!("Onboarding Analytics - No input specified");
        println!("\nQuick Start:");
        println!("  onboarding-analytics --action screen_shown --screen \"Game Reward\"");
        println!("  onboarding-analytics --category first_start --action start");
        println!("  onboarding-analytics --config session.toml");
        println!("\nUse --list to see every tracking key, --help for more options");
        Ok(())
    }
}

/// Track one event described on the command line
fn single_event_mode(action: &str, args: &Args) -> Result<()> {
    let action = OnboardingAction::from_parts(action, args.screen, args.extension)?;
    let event_type: EventType = OnboardingEvent::from_category(&args.category, action)?.into();

    let parameters = if args.params.is_empty() {
        None
    } else {
        Some(
            args.params
                .iter()
                .map(|(k, v)| (k.clone(), ParameterValue::from(v.as_str())))
                .collect::<Parameters>(),
        )
    };

    let sink = open_sink(args.output.as_ref(), !args.no_timestamp)?;
    let mut tracker = EventTracker::new(sink);
    tracker.track(event_type, parameters);

    log::info!("Tracked {}", event_type);
    Ok(())
}

/// Replay every step of a tracking script
fn script_mode(config_path: &PathBuf, args: &Args) -> Result<()> {
    log::info!("Loading script from: {:?}", config_path);
    let script: ScriptConfig = config::load_config(config_path)?;
    log::debug!("Script loaded: {} events", script.events.len());

    let path = args.output.as_ref().or(script.output.path.as_ref());
    let include_timestamp = script.output.include_timestamp && !args.no_timestamp;
    let mut tracker = EventTracker::new(open_sink(path, include_timestamp)?);

    for (index, step) in script.events.iter().enumerate() {
        let event_type = step
            .event_type()
            .with_context(|| format!("Invalid event #{}", index + 1))?;

        match step.mode {
            TrackMode::Track => tracker.track(event_type, step.parameters.clone()),
            TrackMode::Start => tracker.track_event_start(event_type),
            TrackMode::End => tracker.track_event_end(event_type),
        }
    }

    log::info!("Replayed {} scripted events", script.events.len());
    Ok(())
}

/// Open the JSON-lines sink on a file or stdout
fn open_sink(path: Option<&PathBuf>, include_timestamp: bool) -> Result<Box<dyn AnalyticsSink>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    };

    Ok(Box::new(JsonLinesSink::new(writer, include_timestamp)))
}

/// Parse a `key=value` parameter flag
fn parse_param(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("expected KEY=VALUE, got '{}'", raw),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

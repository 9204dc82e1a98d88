//! pageswipe - replay a recorded touch trace through the paging controller

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use pageswipe::axis::{Axis, AxisStrategy};
use pageswipe::config::loader::ResolvedConfig;
use pageswipe::controller::GestureController;
use pageswipe::model::{AppError, Viewport};
use pageswipe::replay::{replay_trace, write_records, DEFAULT_FRAME_INTERVAL_MS};

/// Replay a JSONL touch trace through a paged scroll controller and print
/// every event, animation frame and page change as JSONL
#[derive(Parser, Debug)]
#[command(name = "pageswipe")]
#[command(version)]
#[command(about = "Replay JSONL touch traces through a paged-scrolling gesture controller")]
pub struct Args {
    /// Path to JSONL trace file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Number of pages, each one viewport long
    #[arg(short, long, default_value_t = 5)]
    pub pages: usize,

    /// Viewport width
    #[arg(long, default_value_t = 300.0)]
    pub width: f64,

    /// Viewport height
    #[arg(long, default_value_t = 480.0)]
    pub height: f64,

    /// Scroll axis (overrides config file and PAGESWIPE_AXIS)
    #[arg(long, value_parser = ["horizontal", "vertical"])]
    pub axis: Option<String>,

    /// Milliseconds between animation frames (must be positive)
    #[arg(
        long,
        default_value_t = DEFAULT_FRAME_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub frame_ms: u64,

    /// Fail on the first malformed trace line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file =
            pageswipe::config::loader::load_config_with_precedence(args.config.clone())?;
        let merged = pageswipe::config::loader::merge_config(config_file);
        let with_env = pageswipe::config::loader::apply_env_overrides(merged)?;

        let axis_override = args.axis.as_deref().map(str::parse::<Axis>).transpose()?;
        pageswipe::config::loader::apply_cli_overrides(
            with_env,
            axis_override,
            args.log_file.clone(),
        )
    };

    pageswipe::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    run(&args, &config)?;
    Ok(())
}

fn run(args: &Args, config: &ResolvedConfig) -> Result<(), AppError> {
    let mut source = pageswipe::source::detect_input_source(args.file.clone())?;
    let lines = source.read_lines()?;

    let (events, errors) = pageswipe::parser::parse_trace(&lines);
    if let Some(first) = errors.first() {
        if args.strict {
            return Err(first.clone().into());
        }
        warn!(skipped = errors.len(), "trace contained malformed lines");
    }

    let viewport = Viewport::sized(args.width, args.height);
    let page_extent = config.controller.axis.viewport_extent(&viewport);
    let controller = GestureController::new(
        config.controller,
        vec![page_extent; args.pages],
        viewport,
    )?;

    let (records, controller) = replay_trace(controller, &events, args.frame_ms);
    info!(
        events = events.len(),
        final_page = controller.current_page(),
        final_offset = controller.current_offset(),
        "replay complete"
    );

    let stdout = std::io::stdout();
    write_records(stdout.lock(), &records)?;
    Ok(())
}

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;

use mazerace::app::{
    App, AppError, Settings,
    renderer::Renderer,
    stats::{format_table, rolling_average},
};

/// Race pathfinding brains through randomly generated perfect mazes
#[derive(Parser, Debug)]
#[command(name = "mazerace")]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells, walls included (odd values use the whole grid)
    #[arg(short = 'W', long, default_value_t = 21)]
    width: u16,

    /// Maze height in cells, walls included (odd values use the whole grid)
    #[arg(short = 'H', long, default_value_t = 21)]
    height: u16,

    /// Number of trials
    #[arg(short = 'n', long, default_value_t = 100)]
    trials: usize,

    /// Base random seed, for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Animate every trial in the terminal
    #[arg(short, long)]
    render: bool,

    /// Milliseconds per animation frame
    #[arg(long, default_value_t = 30)]
    tick_ms: u64,

    /// Window size of the rolling average in the summary
    #[arg(long, default_value_t = 10)]
    window: usize,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Install the global subscriber. The returned guard must live until exit so buffered file
/// logs get flushed.
fn init_logging(args: &Args) -> std::io::Result<Option<WorkerGuard>> {
    let level = match args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    match &args.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path.file_name().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "log path has no file name")
            })?;
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(false)
                .with_max_level(level)
                .init();
            Ok(Some(guard))
        }
        None => {
            // The renderer owns the screen, stderr output would tear the frames
            let level = if args.render { LevelFilter::OFF } else { level };
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(level)
                .init();
            Ok(None)
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    if args.window == 0 {
        return Err(AppError::InvalidSettings(
            "rolling-average window must be positive".to_string(),
        ));
    }
    let app = App::new(Settings {
        width: args.width,
        height: args.height,
        trials: args.trials,
        seed: args.seed,
        ..Settings::default()
    })?;

    let report = if args.render {
        let mut renderer = Renderer::new(Duration::from_millis(args.tick_ms));
        renderer.setup_terminal()?;
        let report = app.run_rendered(&mut renderer);
        Renderer::restore_terminal(&mut std::io::stdout())?;
        report?
    } else {
        app.run()?
    };

    let summaries = report.summaries();
    let rolling_last = (0..report.brains.len())
        .map(|i| rolling_average(&report.steps(i), args.window).last().copied())
        .collect::<Vec<_>>();

    println!(
        "\n{} trials on {}x{} mazes (base seed {})\n",
        report.trials.len(),
        args.width,
        args.height,
        app.base_seed()
    );
    print!("{}", format_table(&summaries, &rolling_last, args.window));
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

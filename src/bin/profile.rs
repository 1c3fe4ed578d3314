use std::time::Instant;

use mazerace::app::{App, AppError, Settings};

/// Headless run on large mazes for profiling. Usage: `profile [trials] [size]`
fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let trials = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(20);
    let size = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(255);

    let app = App::new(Settings {
        width: size,
        height: size,
        trials,
        seed: Some(0),
        ..Settings::default()
    })?;

    let started = Instant::now();
    let report = app.run()?;
    let elapsed = started.elapsed();

    let total_steps = report
        .trials
        .iter()
        .flat_map(|t| t.steps.iter())
        .sum::<usize>();
    println!(
        "{} trials of {}x{} in {:.2?} ({} agent steps)",
        report.trials.len(),
        size,
        size,
        elapsed,
        total_steps
    );
    Ok(())
}

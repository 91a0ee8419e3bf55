use maze_search::config::{Cli, Config};
use maze_search::ranking::Report;
use maze_search::render::{comparison_table, render_path};
use maze_search::stat::compare_algorithms;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if cli.config.is_none() {
        info!("No config file specified, using default config");
    }

    let maze = config.load_maze()?;
    info!(
        "Maze {}x{} | Start: {:?} | Goal: {:?}",
        maze.width(),
        maze.height(),
        maze.start(),
        maze.goal()
    );

    let comparison = compare_algorithms(&maze, &config.algorithms, config.timing_runs);
    for algorithm in &comparison.failures {
        warn!("{algorithm} found no path and is left out of the comparison");
    }

    for algorithm in &config.show {
        match comparison.get(*algorithm) {
            Some(metrics) => print!(
                "{}",
                render_path(&maze, &metrics.path, &format!("{algorithm} Algorithm"))
            ),
            None => warn!("No solution of {algorithm} to show"),
        }
    }

    let report = Report::new(&comparison);
    match report.best.and_then(|algorithm| comparison.get(algorithm)) {
        Some(best) => {
            print!("{}", comparison_table(&comparison.metrics, &report.scores));
            info!("Best algorithm: {}", best.algorithm);
            if config.show_best {
                let label = format!("BEST Algorithm ({})", best.algorithm);
                print!("{}", render_path(&maze, &best.path, &label));
            }
        }
        None => warn!("No algorithm reached the goal, nothing to rank"),
    }

    if let Some(output_path) = &config.output_path {
        let report = serde_json::to_string_pretty(&report)?;
        std::fs::write(output_path, report)
            .with_context(|| format!("cannot write report: {output_path}"))?;
        info!("Wrote comparison to {output_path}");
    }

    Ok(())
}

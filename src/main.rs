use clap::Parser;
use std::path::PathBuf;

mod charts;
mod config;
mod error;
mod family;
mod frequency;
mod loader;
mod models;
mod output;
mod ranking;
mod runner;
mod statistics;

use crate::config::AnalysisConfig;
use crate::output::OutputFormat;
use crate::runner::Runner;

/// AI Model Convergence CLI - Analyze how often independent models agree on categorical prompts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the study data JSON file
    data_file: PathBuf,

    /// Output format: plain or json
    #[arg(short, long, default_value = "plain")]
    output: OutputFormat,

    /// Optional TOML file with analysis options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to render charts into (overrides the config file)
    #[arg(long)]
    plots_dir: Option<String>,

    /// Verbose output - show progress for each analysis step
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if args.plots_dir.is_some() {
        config.plots_dir = args.plots_dir.clone();
    }

    let study = loader::load_study(&args.data_file)?;
    let runner = Runner::new(config, args.verbose);

    let report = runner.run(&study)?;

    output::print_report(&report, args.output);

    Ok(())
}

//! safezone CLI - Safe landing zones from terrain images

mod cli;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cli::Cli;
use safezone::terrain::{AreaReport, Pipeline};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{Level, info};

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, pipeline: &Pipeline) -> Result<AreaReport> {
    let output = cli.output_path();
    let start = Instant::now();

    let out = pipeline
        .run_file(&cli.input, &output, cli.run_options())
        .with_context(|| format!("Failed to process {}", cli.input.display()))?;

    info!(
        "{} safe zones, {} hazard blobs, saved to {}",
        out.safe_zones.len(),
        out.hazard_blobs.len(),
        output.display()
    );
    info!("Processing time: {:.2?}", start.elapsed());
    Ok(out.report)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    setup_logging(cli.verbose || cli.debug);

    let pipeline = match Pipeline::new(cli.pipeline_config()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            let _ = Cli::command().error(ErrorKind::ValueValidation, e).print();
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &pipeline) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

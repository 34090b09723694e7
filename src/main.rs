//! M30 Sensors - sensor identifier filtering & KM marker extraction
//!
//! Loads the semicolon-delimited M30 sensor files, either re-exporting the full
//! dataset or filtering `oldID` values and describing the result.

mod config;
mod data;
mod pipeline;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use config::Config;
use pipeline::Mode;

#[derive(Parser, Debug)]
#[command(author, version, about = "M30 sensor id filter and exporter", long_about = None)]
struct Cli {
    /// Exactly one extra argument, whatever its value, runs the full load:
    /// df_M30.csv is re-exported as df_M30_little.csv. Any other count runs
    /// the little load. Known flags such as --json or --config take precedence
    /// and are never counted here.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    trigger: Vec<String>,

    /// JSON config file with paths and filter settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the input and output files are resolved against
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Field delimiter of the CSV files
    #[arg(long)]
    delimiter: Option<char>,

    /// Print the description as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries the description
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;

    match Mode::from_args(&cli.trigger) {
        Mode::Full => {
            let report = pipeline::run_full(&config)?;
            info!(
                rows = report.rows_written,
                output = %report.output.display(),
                "full load exported"
            );
        }
        Mode::Little => {
            let description = pipeline::run_little(&config)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&description)?);
            } else {
                println!("{}", description.to_frame()?);
            }
        }
    }

    Ok(())
}

/// Error with its full cause chain on one line.
fn failure_message(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

//! Run modes: full export or filtered description.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::data::{write_csv, Filters, RecordLoader, RecordProcessor, KM_COLUMN};
use crate::stats::{describe, Description};

/// Which file is loaded and what happens to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Load the full dataset and re-export it unmodified
    Full,
    /// Load the reduced dataset, filter, derive KM and describe
    #[default]
    Little,
}

impl Mode {
    /// Exactly one extra argument selects the full load; its value is ignored.
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [_] => Mode::Full,
            _ => Mode::Little,
        }
    }
}

/// Outcome of a full-load run.
#[derive(Debug, Clone)]
pub struct FullReport {
    pub rows_read: usize,
    pub rows_written: usize,
    pub output: PathBuf,
}

/// Load the full dataset and write it back out as the reduced file.
pub fn run_full(config: &Config) -> Result<FullReport> {
    let input = config.full_input_path();
    let output = config.output_path();
    let loader = RecordLoader::new(config.delimiter_byte()?);

    info!("Loading database...");
    let mut df = loader
        .load(&input)
        .with_context(|| format!("loading {}", input.display()))?;
    info!(rows = df.height(), "Database loaded");

    info!(path = %output.display(), "Exporting new Dataframe");
    write_csv(&mut df, &output, config.delimiter_byte()?)
        .with_context(|| format!("exporting {}", output.display()))?;
    info!("Done.");

    Ok(FullReport {
        rows_read: df.height(),
        rows_written: df.height(),
        output,
    })
}

/// Load the reduced dataset, keep matching ids, derive KM and summarise.
pub fn run_little(config: &Config) -> Result<Description> {
    let input = config.little_input_path();
    let loader = RecordLoader::new(config.delimiter_byte()?);
    let filters = Filters {
        pattern: config.id_regex()?,
        length: config.id_length,
    };

    info!("Loading little-database...");
    let df = loader
        .load(&input)
        .with_context(|| format!("loading {}", input.display()))?;
    info!(rows = df.height(), "Little-Database loaded");

    let prepared = RecordProcessor::prepare(&df, &filters).context("filtering oldID")?;
    info!(
        kept = prepared.height(),
        dropped = df.height() - prepared.height(),
        "oldID filters applied"
    );

    // KM is a decimal-looking label, not a measurement
    Ok(describe(&prepared, &[KM_COLUMN])?)
}

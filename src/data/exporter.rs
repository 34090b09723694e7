//! CSV Exporter Module
//! Writes a record set back out as a delimited file.

use polars::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Write `df` with a header row and no index column, replacing any existing file.
///
/// The file is truncated and written in place.
pub fn write_csv(df: &mut DataFrame, path: &Path, delimiter: u8) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    CsvWriter::new(&mut writer)
        .include_header(true)
        .with_separator(delimiter)
        .finish(df)?;

    Ok(())
}

//! CSV Record Loader Module
//! Reads the delimited sensor files into a DataFrame using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::{ID_COLUMN, OLD_ID_COLUMN};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Required column '{column}' missing from {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },
}

/// Loads delimited files with every column kept as a string.
pub struct RecordLoader {
    delimiter: u8,
    required_columns: Vec<String>,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new(b';')
    }
}

impl RecordLoader {
    /// Loader requiring the `ID` and `oldID` columns.
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            required_columns: vec![ID_COLUMN.to_string(), OLD_ID_COLUMN.to_string()],
        }
    }

    pub fn with_required_columns(mut self, columns: &[&str]) -> Self {
        self.required_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Load a CSV file. Values are read verbatim, no type inference.
    pub fn load(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        // Schema length 0 reads every column as String
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(self.delimiter)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "csv parsed"
        );

        self.check_schema(&df, path)?;
        Ok(df)
    }

    fn check_schema(&self, df: &DataFrame, path: &Path) -> Result<(), LoaderError> {
        let names = column_names(df);
        for required in &self.required_columns {
            if !names.iter().any(|n| n == required) {
                return Err(LoaderError::MissingColumn {
                    column: required.clone(),
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

/// Column names of a DataFrame as owned strings.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

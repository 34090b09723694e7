//! Record Processor Module
//! Filters sensor identifiers and derives the KM marker column.

use polars::prelude::*;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::{KM_COLUMN, OLD_ID_COLUMN};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found")]
    MissingColumn(String),
}

/// Criteria applied to `oldID` before the KM marker is derived.
#[derive(Debug, Clone)]
pub struct Filters {
    pub pattern: Regex,
    pub length: usize,
}

/// Handles row filtering and column derivation.
pub struct RecordProcessor;

impl RecordProcessor {
    /// Pattern filter, then length filter, then append `KM`.
    pub fn prepare(df: &DataFrame, filters: &Filters) -> Result<DataFrame, ProcessorError> {
        let matched = Self::filter_by_pattern(df, OLD_ID_COLUMN, &filters.pattern)?;
        debug!(rows = matched.height(), pattern = %filters.pattern, "pattern filter applied");

        let sized = Self::filter_by_length(&matched, OLD_ID_COLUMN, filters.length)?;
        debug!(rows = sized.height(), length = filters.length, "length filter applied");

        Self::derive_km(&sized)
    }

    /// Keep rows whose value contains a match for `pattern`. Nulls are dropped.
    pub fn filter_by_pattern(
        df: &DataFrame,
        column: &str,
        pattern: &Regex,
    ) -> Result<DataFrame, ProcessorError> {
        let values = Self::string_column(df, column)?;
        let mask: BooleanChunked = values
            .into_iter()
            .map(|v| v.is_some_and(|s| pattern.is_match(s)))
            .collect();
        Ok(df.filter(&mask)?)
    }

    /// Keep rows whose value is exactly `length` characters long. Nulls are dropped.
    pub fn filter_by_length(
        df: &DataFrame,
        column: &str,
        length: usize,
    ) -> Result<DataFrame, ProcessorError> {
        let values = Self::string_column(df, column)?;
        let mask: BooleanChunked = values
            .into_iter()
            .map(|v| v.is_some_and(|s| s.chars().count() == length))
            .collect();
        Ok(df.filter(&mask)?)
    }

    /// Append the `KM` column computed from `oldID`.
    pub fn derive_km(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let km: Vec<Option<String>> = Self::string_column(df, OLD_ID_COLUMN)?
            .into_iter()
            .map(|v| v.map(km_marker))
            .collect();

        let mut out = df.clone();
        out.with_column(Series::new(KM_COLUMN.into(), km))?;
        Ok(out)
    }

    fn string_column<'a>(
        df: &'a DataFrame,
        column: &str,
    ) -> Result<&'a StringChunked, ProcessorError> {
        let col = df
            .column(column)
            .map_err(|_| ProcessorError::MissingColumn(column.to_string()))?;
        Ok(col.str()?)
    }
}

/// `oldID[3:5] + "." + oldID[5:6]`, sliced by character and clamped at the end.
pub fn km_marker(old_id: &str) -> String {
    format!("{}.{}", char_slice(old_id, 3, 5), char_slice(old_id, 5, 6))
}

fn char_slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

//! Descriptive Statistics Module
//! Per-column summaries (count, unique, top, freq and numeric moments) of a record set.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// Preferred label column of the rendered summary frame.
pub const STATISTIC_COLUMN: &str = "statistic";

const TEXT_ROWS: [&str; 4] = ["count", "unique", "top", "freq"];
const NUMERIC_ROWS: [&str; 7] = ["mean", "std", "min", "25%", "50%", "75%", "max"];

/// Moments and quantiles of a column whose values all parse as numbers.
#[derive(Debug, Clone, Serialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl NumericSummary {
    fn get(&self, statistic: &str) -> Option<f64> {
        match statistic {
            "mean" => Some(self.mean),
            "std" => Some(self.std),
            "min" => Some(self.min),
            "25%" => Some(self.p25),
            "50%" => Some(self.p50),
            "75%" => Some(self.p75),
            "max" => Some(self.max),
            _ => None,
        }
    }
}

/// Summary for a single column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: Option<usize>,
    pub numeric: Option<NumericSummary>,
}

impl ColumnSummary {
    fn cell(&self, statistic: &str) -> Option<String> {
        match statistic {
            "count" => Some(self.count.to_string()),
            "unique" => Some(self.unique.to_string()),
            "top" => self.top.clone(),
            "freq" => self.freq.map(|f| f.to_string()),
            other => self
                .numeric
                .as_ref()
                .and_then(|n| n.get(other))
                .map(|v| v.to_string()),
        }
    }
}

/// Summaries for every column of a record set, in column order.
#[derive(Debug, Clone, Serialize)]
pub struct Description {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl Description {
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == name)
    }

    /// Name for the label column that no summarised column already uses.
    pub fn label_column(&self) -> String {
        let mut label = STATISTIC_COLUMN.to_string();
        while self.column(&label).is_some() {
            label.insert(0, '_');
        }
        label
    }

    /// Render as a frame: one row per statistic, one column per summarised column.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let has_numeric = self.columns.iter().any(|c| c.numeric.is_some());
        let statistics: Vec<&str> = TEXT_ROWS
            .iter()
            .chain(NUMERIC_ROWS.iter().filter(|_| has_numeric))
            .copied()
            .collect();

        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(Column::new(self.label_column().into(), statistics.clone()));

        for summary in &self.columns {
            let cells: Vec<Option<String>> =
                statistics.iter().map(|s| summary.cell(s)).collect();
            columns.push(Column::new(summary.column.as_str().into(), cells));
        }

        DataFrame::new(columns)
    }
}

/// Summarise every column, one rayon task per column.
///
/// Columns named in `text_columns` never get numeric statistics.
pub fn describe(df: &DataFrame, text_columns: &[&str]) -> PolarsResult<Description> {
    let columns = df
        .get_columns()
        .par_iter()
        .map(|col| {
            let text_only = text_columns.contains(&col.name().as_str());
            summarize_column(col, text_only)
        })
        .collect::<PolarsResult<Vec<_>>>()?;

    Ok(Description {
        rows: df.height(),
        columns,
    })
}

fn summarize_column(col: &Column, text_only: bool) -> PolarsResult<ColumnSummary> {
    let as_text = col.cast(&DataType::String)?;
    let values = as_text.str()?;

    // value -> (frequency, first row seen)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut present: Vec<&str> = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        if let Some(v) = value {
            counts.entry(v).or_insert((0, row)).0 += 1;
            present.push(v);
        }
    }

    let top = counts
        .iter()
        .max_by(|(_, (fa, ra)), (_, (fb, rb))| fa.cmp(fb).then(rb.cmp(ra)))
        .map(|(v, (f, _))| (v.to_string(), *f));

    Ok(ColumnSummary {
        column: col.name().to_string(),
        count: present.len(),
        unique: counts.len(),
        freq: top.as_ref().map(|(_, f)| *f),
        top: top.map(|(v, _)| v),
        numeric: if text_only {
            None
        } else {
            numeric_summary(&present)
        },
    })
}

/// `None` unless there is at least one value and every value parses as a finite `f64`.
fn numeric_summary(values: &[&str]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let parsed: Vec<f64> = values
        .iter()
        .map(|v| v.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect::<Option<_>>()?;

    let mut sorted = parsed.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(NumericSummary {
        mean: parsed.iter().mean(),
        std: parsed.iter().std_dev(),
        min: sorted[0],
        p25: percentile(&sorted, 25.0),
        p50: percentile(&sorted, 50.0),
        p75: percentile(&sorted, 75.0),
        max: sorted[sorted.len() - 1],
    })
}

/// Calculate percentile using linear interpolation (NumPy compatible).
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new("ID".into(), ["1", "2", "3", "4"]),
            Column::new("oldID".into(), ["PM11231", "PM10451", "PM11231", "PM10451"]),
            Column::new("KM".into(), [Some("12.3"), Some("04.5"), Some("12.3"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn text_statistics() {
        let description = describe(&sample(), &[]).unwrap();
        assert_eq!(description.rows, 4);

        let old_id = description.column("oldID").unwrap();
        assert_eq!(old_id.count, 4);
        assert_eq!(old_id.unique, 2);
        // Tie on frequency goes to the value seen first
        assert_eq!(old_id.top.as_deref(), Some("PM11231"));
        assert_eq!(old_id.freq, Some(2));
        assert!(old_id.numeric.is_none());

        let km = description.column("KM").unwrap();
        assert_eq!(km.count, 3);
        assert_eq!(km.top.as_deref(), Some("12.3"));
        assert_eq!(km.freq, Some(2));
    }

    #[test]
    fn numeric_statistics() {
        let description = describe(&sample(), &[]).unwrap();
        let id = description.column("ID").unwrap().numeric.clone().unwrap();
        assert!((id.mean - 2.5).abs() < 1e-12);
        assert!((id.std - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!(id.min, 1.0);
        assert!((id.p25 - 1.75).abs() < 1e-12);
        assert!((id.p50 - 2.5).abs() < 1e-12);
        assert!((id.p75 - 3.25).abs() < 1e-12);
        assert_eq!(id.max, 4.0);
    }

    #[test]
    fn percentile_matches_numpy_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 50.0), 3.0);
        assert_eq!(percentile(&sorted, 25.0), 2.0);
        assert!((percentile(&[1.0, 2.0], 75.0) - 1.75).abs() < 1e-12);
        assert_eq!(percentile(&[7.0], 25.0), 7.0);
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn empty_frame_describes_without_error() {
        let df = DataFrame::new(vec![
            Column::new("ID".into(), Vec::<String>::new()),
            Column::new("oldID".into(), Vec::<String>::new()),
        ])
        .unwrap();

        let description = describe(&df, &[]).unwrap();
        assert_eq!(description.rows, 0);
        let old_id = description.column("oldID").unwrap();
        assert_eq!(old_id.count, 0);
        assert_eq!(old_id.unique, 0);
        assert!(old_id.top.is_none());
        assert!(old_id.freq.is_none());

        let frame = description.to_frame().unwrap();
        assert_eq!(frame.height(), TEXT_ROWS.len());
    }

    #[test]
    fn frame_rendering_layout() {
        let frame = describe(&sample(), &[]).unwrap().to_frame().unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), TEXT_ROWS.len() + NUMERIC_ROWS.len());

        let labels = frame.column(STATISTIC_COLUMN).unwrap().str().unwrap();
        assert_eq!(labels.get(2), Some("top"));
        assert_eq!(labels.get(4), Some("mean"));

        // Text columns leave numeric rows empty
        let old_id = frame.column("oldID").unwrap().str().unwrap();
        assert_eq!(old_id.get(0), Some("4"));
        assert_eq!(old_id.get(4), None);
    }

    #[test]
    fn label_column_avoids_input_names() {
        let df = DataFrame::new(vec![
            Column::new("oldID".into(), ["PM11231"]),
            Column::new("statistic".into(), ["a"]),
            Column::new("_statistic".into(), ["b"]),
        ])
        .unwrap();

        let description = describe(&df, &[]).unwrap();
        assert_eq!(description.label_column(), "__statistic");

        let frame = description.to_frame().unwrap();
        assert_eq!(frame.width(), 4);
        let top = frame.column("statistic").unwrap().str().unwrap();
        assert_eq!(top.get(2), Some("a"));
    }

    #[test]
    fn non_finite_and_text_only_columns_stay_textual() {
        let df = DataFrame::new(vec![
            Column::new("reading".into(), ["1.5", "NaN", "2"]),
            Column::new("limit".into(), ["inf", "3", "4"]),
            Column::new("KM".into(), ["12.3", "04.5", "12.3"]),
            Column::new("ID".into(), ["1", "2", "3"]),
        ])
        .unwrap();

        let description = describe(&df, &["KM"]).unwrap();
        assert!(description.column("reading").unwrap().numeric.is_none());
        assert!(description.column("limit").unwrap().numeric.is_none());
        assert!(description.column("KM").unwrap().numeric.is_none());
        assert_eq!(description.column("KM").unwrap().top.as_deref(), Some("12.3"));
        assert!(description.column("ID").unwrap().numeric.is_some());
    }

    #[test]
    fn description_serializes_to_json() {
        let description = describe(&sample(), &[]).unwrap();
        let json = serde_json::to_value(&description).unwrap();
        assert_eq!(json["rows"], 4);
        assert_eq!(json["columns"][1]["column"], "oldID");
        assert_eq!(json["columns"][1]["numeric"], serde_json::Value::Null);
        assert_eq!(json["columns"][0]["numeric"]["max"], 4.0);
    }
}

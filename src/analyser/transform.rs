//! Reshapes result rows into what each visualization reads.
//!
//! Input rows are never modified; every projection builds new rows.

use super::dates::{DateParser, from_epoch_millis};
use super::types::{ColumnInfo, Row, VisualizationType};
use super::values::{is_present, parse_float};
use crate::config::AnalysisSettings;
use serde_json::Value;

pub fn transform_rows(
    rows: &[Row],
    kind: VisualizationType,
    info: &ColumnInfo,
    settings: &AnalysisSettings,
    dates: &dyn DateParser,
) -> Vec<Row> {
    match kind {
        VisualizationType::Timeseries => with_display_dates(rows, info.primary_date(), dates),
        VisualizationType::Pie | VisualizationType::Bar => category_values(
            rows,
            info.primary_category(),
            info.primary_numeric(),
            &settings.unknown_category,
        ),
        VisualizationType::Ranking => ranked(rows, info.primary_numeric()),
        VisualizationType::Scatter | VisualizationType::Table | VisualizationType::Empty => {
            rows.to_vec()
        }
    }
}

/// Adds a `date` field holding the first date column rendered for display.
///
/// Values that cannot be read as a date are carried over unchanged; rows
/// where the column is missing or null get no `date` field.
pub fn with_display_dates(
    rows: &[Row],
    date_column: Option<&str>,
    dates: &dyn DateParser,
) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            let mut out = row.clone();
            let present = date_column
                .and_then(|column| row.get(column))
                .filter(|value| is_present(Some(*value)));
            let Some(original) = present else {
                return out;
            };
            let parsed = match original {
                Value::String(raw) => dates.parse(raw),
                Value::Number(n) => n.as_f64().and_then(from_epoch_millis),
                _ => None,
            };
            let display = parsed
                .map(|at| Value::String(dates.format(&at)))
                .unwrap_or_else(|| original.clone());
            out.insert("date".to_owned(), display);
            out
        })
        .collect()
}

/// `{ category, value, ..row }` rows for pie and bar charts.
///
/// Original fields are applied last, so a source column literally named
/// `category` or `value` keeps its own value.
pub fn category_values(
    rows: &[Row],
    category_column: Option<&str>,
    value_column: Option<&str>,
    unknown: &str,
) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            let category = category_column
                .and_then(|column| row.get(column))
                .filter(|value| is_present(Some(*value)) && value.as_str() != Some(""))
                .cloned()
                .unwrap_or_else(|| Value::String(unknown.to_owned()));
            let value = value_column
                .and_then(|column| row.get(column))
                .and_then(parse_float)
                .unwrap_or(0.0);

            let mut out = Row::new();
            out.insert("category".to_owned(), category);
            out.insert("value".to_owned(), number(value));
            for (key, field) in row {
                out.insert(key.clone(), field.clone());
            }
            out
        })
        .collect()
}

/// Rows sorted by `value_column` descending with a 1-based `rank` field.
///
/// The sort is stable: rows with equal values keep their input order.
/// Unparseable values rank as 0.
pub fn ranked(rows: &[Row], value_column: Option<&str>) -> Vec<Row> {
    let score = |row: &Row| {
        value_column
            .and_then(|column| row.get(column))
            .and_then(parse_float)
            .unwrap_or(0.0)
    };

    let mut sorted: Vec<&Row> = rows.iter().collect();
    sorted.sort_by(|a, b| score(b).total_cmp(&score(a)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let mut out = row.clone();
            out.insert("rank".to_owned(), Value::from(index + 1));
            out
        })
        .collect()
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

//! Full-dataset summary statistics.
//!
//! Unlike classification, these folds read every row. They always run over
//! the original rows, never over reshaped chart data, so the numbers do not
//! depend on the chosen visualization.

use super::types::{
    CategorySummary, ColumnInfo, ColumnKind, NumericSummary, Row, Statistics, TopValue,
};
use super::values::{display_key, is_present, parse_float};
use indexmap::IndexMap;

pub fn calculate_statistics(rows: &[Row], info: &ColumnInfo, top_values: usize) -> Statistics {
    let mut stats = Statistics {
        total_rows: rows.len(),
        total_columns: rows.first().map(|row| row.len()).unwrap_or(0),
        ..Statistics::default()
    };

    for column in &info.numeric {
        if let Some(summary) = analyse_numeric(rows, column) {
            stats.numeric_stats.insert(column.clone(), summary);
            stats.data_types.insert(column.clone(), ColumnKind::Numeric);
        }
    }

    for column in &info.categorical {
        stats
            .category_stats
            .insert(column.clone(), analyse_categorical(rows, column, top_values));
        stats
            .data_types
            .insert(column.clone(), ColumnKind::Categorical);
    }

    stats
}

/// Sum, mean and range over every parseable value. `None` when nothing parses.
pub fn analyse_numeric(rows: &[Row], column: &str) -> Option<NumericSummary> {
    let values = rows.iter().filter_map(|row| row.get(column).and_then(parse_float));

    let mut summary: Option<NumericSummary> = None;
    for value in values {
        let s = summary.get_or_insert(NumericSummary {
            sum: 0.0,
            avg: 0.0,
            min: value,
            max: value,
            count: 0,
        });
        s.sum += value;
        s.min = s.min.min(value);
        s.max = s.max.max(value);
        s.count += 1;
    }

    summary.map(|mut s| {
        s.avg = s.sum / s.count as f64;
        s
    })
}

/// Frequency summary of the non-null values of `column`.
pub fn analyse_categorical(rows: &[Row], column: &str, top_values: usize) -> CategorySummary {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in rows.iter().filter_map(|row| row.get(column)) {
        if is_present(Some(value)) {
            *counts.entry(display_key(value)).or_insert(0) += 1;
        }
    }

    let unique_count = counts.len();
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // Stable, so equal counts stay in first-seen order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    CategorySummary {
        unique_count,
        top_values: ranked
            .into_iter()
            .take(top_values)
            .map(|(value, count)| TopValue { value, count })
            .collect(),
    }
}

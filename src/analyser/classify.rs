//! Sample-based column classification.
//!
//! Each column is judged from its first `sample_size` rows only, so the cost
//! stays bounded for wide or long results. Checks run in priority order:
//! numeric, then date, then categorical by cardinality, with text as the
//! fallback.

use super::dates::DateParser;
use super::types::{ColumnInfo, ColumnKind, ColumnProfile, Row};
use super::values::{as_finite_number, distinct_key, is_present};
use crate::config::AnalysisSettings;
use serde_json::Value;
use std::collections::HashSet;

/// Column names in query order, taken from the first row.
pub fn column_names(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Non-null values of `column` among the first `sample_size` rows.
pub fn sample_values<'a>(rows: &'a [Row], column: &str, sample_size: usize) -> Vec<&'a Value> {
    rows.iter()
        .take(sample_size)
        .filter_map(|row| row.get(column))
        .filter(|value| is_present(Some(*value)))
        .collect()
}

/// Kind of a column given its sampled values, or `None` if the sample is empty.
pub fn classify_sample(
    sample: &[&Value],
    settings: &AnalysisSettings,
    dates: &dyn DateParser,
) -> Option<ColumnKind> {
    if sample.is_empty() {
        return None;
    }

    if sample.iter().all(|value| as_finite_number(value).is_some()) {
        return Some(ColumnKind::Numeric);
    }

    let looks_like_date = sample.iter().any(|value| match value {
        Value::String(s) => dates.parse(s).is_some(),
        _ => false,
    });
    if looks_like_date {
        return Some(ColumnKind::Date);
    }

    let distinct: HashSet<String> = sample.iter().map(|value| distinct_key(value)).collect();
    let limit = (settings.max_categories as f64).min(settings.category_ratio * sample.len() as f64);
    if distinct.len() as f64 <= limit {
        Some(ColumnKind::Categorical)
    } else {
        Some(ColumnKind::Text)
    }
}

/// Classifies every column of the first row. Columns with no sampled values are left out.
pub fn profile_columns(
    rows: &[Row],
    settings: &AnalysisSettings,
    dates: &dyn DateParser,
) -> Vec<ColumnProfile> {
    column_names(rows)
        .into_iter()
        .filter_map(|name| {
            let sample = sample_values(rows, &name, settings.sample_size);
            let kind = classify_sample(&sample, settings, dates);
            match kind {
                Some(kind) => tracing::debug!(
                    column = %name,
                    %kind,
                    sampled = sample.len(),
                    "classified column"
                ),
                None => tracing::debug!(column = %name, "column has no sampled values, skipping"),
            }
            kind.map(|kind| ColumnProfile { name, kind })
        })
        .collect()
}

pub fn classify_columns(
    rows: &[Row],
    settings: &AnalysisSettings,
    dates: &dyn DateParser,
) -> ColumnInfo {
    let total = rows.first().map(|row| row.len()).unwrap_or(0);
    ColumnInfo::from_profiles(&profile_columns(rows, settings, dates), total)
}

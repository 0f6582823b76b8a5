use crate::error::{QuerySightError, Result, ResultExt as _};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Thresholds and formats used by the analysis engine.
///
/// Every field has a default, so a settings file only needs to list the
/// values it overrides.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Number of leading rows inspected per column when classifying
    pub sample_size: usize,
    /// Upper bound on distinct sampled values for a categorical column
    pub max_categories: usize,
    /// Distinct sampled values must also stay within this share of the sample
    pub category_ratio: f64,
    /// Largest single-category result drawn as a pie chart
    pub pie_max_rows: usize,
    /// Largest category/value result drawn as a pie or bar chart
    pub category_chart_max_rows: usize,
    /// Scatter plots need strictly more rows than this
    pub scatter_min_rows: usize,
    /// Largest result drawn as a ranking table
    pub ranking_max_rows: usize,
    /// Number of most frequent values kept per categorical column
    pub top_values: usize,
    /// chrono patterns tried, in order, when recognising date strings
    pub date_formats: Vec<String>,
    /// chrono pattern used for the `date` field of time series rows
    pub date_display_format: String,
    /// Category label used when a pie/bar row has no category value
    pub unknown_category: String,
    /// Message attached to empty results
    pub empty_message: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sample_size: 10,
            max_categories: 10,
            category_ratio: 0.8,
            pie_max_rows: 8,
            category_chart_max_rows: 20,
            scatter_min_rows: 20,
            ranking_max_rows: 50,
            top_values: 5,
            date_formats: default_date_formats(),
            date_display_format: "%d.%m.%Y".to_owned(),
            unknown_category: "Unknown".to_owned(),
            empty_message: "Your query returned no results".to_owned(),
        }
    }
}

fn default_date_formats() -> Vec<String> {
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%b %d, %Y",
        "%B %d, %Y",
        "%d %b %Y",
        "%d %B %Y",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

impl AnalysisSettings {
    /// Rejects settings the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(QuerySightError::Config(
                "sample_size must be at least 1".to_owned(),
            ));
        }
        if !(self.category_ratio > 0.0 && self.category_ratio <= 1.0) {
            return Err(QuerySightError::Config(format!(
                "category_ratio must be in (0, 1], got {}",
                self.category_ratio
            )));
        }
        if self.pie_max_rows > self.category_chart_max_rows {
            return Err(QuerySightError::Config(format!(
                "pie_max_rows ({}) cannot exceed category_chart_max_rows ({})",
                self.pie_max_rows, self.category_chart_max_rows
            )));
        }
        let patterns = self
            .date_formats
            .iter()
            .chain(std::iter::once(&self.date_display_format));
        for pattern in patterns {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(QuerySightError::Config(format!(
                    "invalid date pattern: {pattern:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Default location of the settings file, e.g. `~/.config/querysight/settings.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("querysight").join("settings.json"))
}

/// Loads settings from `path`, falling back to defaults when the file does not exist.
pub fn load_settings(path: &Path) -> Result<AnalysisSettings> {
    if !path.exists() {
        tracing::debug!("No settings at {}, using defaults", path.display());
        return Ok(AnalysisSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: AnalysisSettings = serde_json::from_str(&content)
        .map_err(|e| QuerySightError::Config(format!("{}: {e}", path.display())))?;
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &AnalysisSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

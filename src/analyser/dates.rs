//! Date recognition and display.
//!
//! Parsing goes through the [`DateParser`] trait so that classification and
//! the time series transform do not depend on the process locale or time zone.
//! [`ChronoDateParser`] is the default implementation; tests and embedders can
//! supply their own.

use crate::config::AnalysisSettings;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub trait DateParser {
    /// Parses a calendar date (with optional time) from a raw cell string.
    fn parse(&self, raw: &str) -> Option<NaiveDateTime>;

    /// Renders a parsed date for display in chart rows.
    fn format(&self, at: &NaiveDateTime) -> String;
}

/// Pattern-list parser backed by chrono. All times are treated as UTC.
#[derive(Clone, Debug)]
pub struct ChronoDateParser {
    formats: Vec<String>,
    display_format: String,
}

impl ChronoDateParser {
    pub fn new(formats: Vec<String>, display_format: impl Into<String>) -> Self {
        Self {
            formats,
            display_format: display_format.into(),
        }
    }

    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self::new(
            settings.date_formats.clone(),
            settings.date_display_format.clone(),
        )
    }
}

impl Default for ChronoDateParser {
    fn default() -> Self {
        Self::from_settings(&AnalysisSettings::default())
    }
}

impl DateParser for ChronoDateParser {
    fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.naive_utc());
        }
        if let Ok(at) = DateTime::parse_from_rfc2822(raw) {
            return Some(at.naive_utc());
        }

        for format in &self.formats {
            if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(at);
            }
            if let Ok(day) = NaiveDate::parse_from_str(raw, format) {
                return day.and_hms_opt(0, 0, 0);
            }
        }

        // Month buckets such as "2024-03", common in GROUP BY results.
        if raw.len() == 7
            && let Ok(day) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        {
            return day.and_hms_opt(0, 0, 0);
        }

        None
    }

    fn format(&self, at: &NaiveDateTime) -> String {
        at.format(&self.display_format).to_string()
    }
}

/// Converts epoch milliseconds to a UTC date-time.
pub fn from_epoch_millis(millis: f64) -> Option<NaiveDateTime> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|at| at.naive_utc())
}

//! Data shape inference and visualization selection.
//!
//! Given the rows of a query result, the analyser:
//!
//! 1. classifies each column as numeric, date, categorical or text ([`classify`])
//! 2. picks a visualization from a fixed decision table ([`select`])
//! 3. reshapes the rows for that visualization ([`transform`])
//! 4. computes summary statistics over the original rows ([`profiling`])
//! 5. assembles everything into an [`Envelope`] ([`envelope`])
//!
//! The whole pipeline is synchronous and pure: the input is only read, and the
//! same input always yields the same envelope.

pub mod classify;
pub mod dates;
pub mod envelope;
pub mod profiling;
pub mod select;
pub mod transform;
pub mod types;
pub mod values;

pub use dates::{ChronoDateParser, DateParser};
pub use types::{
    CategorySummary, ChartConfig, ColumnInfo, ColumnKind, ColumnProfile, Envelope,
    NumericSummary, QueryResponse, Row, Statistics, TopValue, VisualizationRecord,
    VisualizationType,
};

use crate::config::AnalysisSettings;
use envelope::EnvelopeParts;

/// The analysis pipeline bound to a set of thresholds and a date parser.
pub struct Analyser<P = ChronoDateParser> {
    settings: AnalysisSettings,
    dates: P,
}

impl Analyser<ChronoDateParser> {
    pub fn new(settings: AnalysisSettings) -> Self {
        let dates = ChronoDateParser::from_settings(&settings);
        Self { settings, dates }
    }
}

impl Default for Analyser<ChronoDateParser> {
    fn default() -> Self {
        Self::new(AnalysisSettings::default())
    }
}

impl<P: DateParser> Analyser<P> {
    /// Uses a custom date parser instead of the chrono pattern list.
    pub fn with_date_parser(settings: AnalysisSettings, dates: P) -> Self {
        Self { settings, dates }
    }

    /// Runs the full pipeline over one query response.
    pub fn analyse(&self, response: &QueryResponse) -> Envelope {
        self.analyse_rows(response.rows(), &response.generated_sql)
    }

    pub fn analyse_rows(&self, rows: &[Row], generated_sql: &str) -> Envelope {
        if rows.is_empty() {
            tracing::info!("Query returned no rows");
            return envelope::empty_envelope(generated_sql, &self.settings.empty_message);
        }

        let column_info = classify::classify_columns(rows, &self.settings, &self.dates);
        let kind = select::select_visualization(&column_info, rows.len(), &self.settings);
        tracing::debug!(
            visualization = %kind,
            rows = rows.len(),
            numeric = column_info.numeric.len(),
            date = column_info.date.len(),
            categorical = column_info.categorical.len(),
            text = column_info.text.len(),
            "selected visualization"
        );

        let data = transform::transform_rows(rows, kind, &column_info, &self.settings, &self.dates);
        let statistics =
            profiling::calculate_statistics(rows, &column_info, self.settings.top_values);

        tracing::info!(
            "Analysed {} rows x {} columns as {}",
            rows.len(),
            column_info.total,
            kind
        );

        envelope::build_envelope(EnvelopeParts {
            kind,
            data,
            original: rows,
            generated_sql,
            column_info,
            statistics,
        })
    }
}

/// Analyses a response with the default settings and date parser.
pub fn analyse_response(response: &QueryResponse) -> Envelope {
    Analyser::<ChronoDateParser>::default().analyse(response)
}

use super::types::{
    ChartConfig, ColumnInfo, Envelope, Row, Statistics, VisualizationRecord, VisualizationType,
};

/// Envelope for a response with no rows. No other stage runs for these.
pub fn empty_envelope(generated_sql: &str, message: &str) -> Envelope {
    Envelope {
        kind: VisualizationType::Empty,
        data: Vec::new(),
        original_data: Vec::new(),
        generated_sql: generated_sql.to_owned(),
        column_info: ColumnInfo::default(),
        row_count: 0,
        statistics: Statistics::default(),
        primary_numeric_column: None,
        primary_category_column: None,
        primary_date_column: None,
        chart_config: None,
        message: Some(message.to_owned()),
    }
}

pub struct EnvelopeParts<'a> {
    pub kind: VisualizationType,
    pub data: Vec<Row>,
    pub original: &'a [Row],
    pub generated_sql: &'a str,
    pub column_info: ColumnInfo,
    pub statistics: Statistics,
}

pub fn build_envelope(parts: EnvelopeParts<'_>) -> Envelope {
    let EnvelopeParts {
        kind,
        data,
        original,
        generated_sql,
        column_info,
        statistics,
    } = parts;

    let chart_config = chart_config(kind, &column_info);
    Envelope {
        kind,
        data,
        original_data: original.to_vec(),
        generated_sql: generated_sql.to_owned(),
        row_count: original.len(),
        primary_numeric_column: column_info.primary_numeric().map(str::to_owned),
        primary_category_column: column_info.primary_category().map(str::to_owned),
        primary_date_column: column_info.primary_date().map(str::to_owned),
        column_info,
        statistics,
        chart_config,
        message: None,
    }
}

/// Axis keys for the renderer of `kind`, or `None` for tabular output.
pub fn chart_config(kind: VisualizationType, info: &ColumnInfo) -> Option<ChartConfig> {
    let config = |x: &str, y: &str| {
        Some(ChartConfig {
            x_key: x.to_owned(),
            y_key: y.to_owned(),
        })
    };

    match kind {
        VisualizationType::Timeseries => {
            config(info.primary_date().unwrap_or("date"), info.primary_numeric()?)
        }
        VisualizationType::Pie | VisualizationType::Bar => config("category", "value"),
        VisualizationType::Scatter => {
            let mut numeric = info.numeric.iter();
            let x = numeric.next()?;
            let y = numeric.next()?;
            config(x.as_str(), y.as_str())
        }
        VisualizationType::Ranking => config("rank", info.primary_numeric()?),
        VisualizationType::Table | VisualizationType::Empty => None,
    }
}

impl Envelope {
    /// The projection persisted with a chat message.
    pub fn to_record(&self) -> VisualizationRecord {
        VisualizationRecord {
            visualization_type: self.kind,
            data_json: self.data.clone(),
            chart_config: self.chart_config.clone(),
        }
    }
}

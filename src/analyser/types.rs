use crate::error::{QuerySightError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One result row: column name to scalar value, in query column order.
pub type Row = serde_json::Map<String, Value>;

/// A query response as delivered by the query backend.
///
/// `row_count` and `column_info` are accepted for compatibility but the
/// engine always recomputes them from `data`.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct QueryResponse {
    #[serde(default)]
    pub data: Option<Vec<Row>>,
    #[serde(default)]
    pub generated_sql: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_info: Option<Value>,
}

impl QueryResponse {
    pub fn new(data: Vec<Row>, generated_sql: impl Into<String>) -> Self {
        Self {
            row_count: Some(data.len()),
            data: Some(data),
            generated_sql: generated_sql.into(),
            column_info: None,
        }
    }

    /// Parses a response document. The top level must be a JSON object.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let kind = match value {
            Value::Object(_) => return Ok(serde_json::from_value(value)?),
            Value::Array(_) => "an array",
            Value::Null => "null",
            Value::Bool(_) | Value::Number(_) | Value::String(_) => "a scalar",
        };
        Err(QuerySightError::InvalidInput(format!(
            "expected an object with a `data` field, found {kind}"
        )))
    }

    /// Rows of the response, empty when `data` is absent.
    pub fn rows(&self) -> &[Row] {
        self.data.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Date,
    Categorical,
    Text,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::Categorical => "categorical",
            Self::Text => "text",
        }
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
}

/// Column names grouped by kind. The four lists are disjoint.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub struct ColumnInfo {
    pub numeric: Vec<String>,
    pub date: Vec<String>,
    pub text: Vec<String>,
    #[serde(rename = "category")]
    pub categorical: Vec<String>,
    /// Number of keys in the first row, classified or not
    pub total: usize,
}

impl ColumnInfo {
    pub fn from_profiles(profiles: &[ColumnProfile], total: usize) -> Self {
        let mut info = Self {
            total,
            ..Self::default()
        };
        for profile in profiles {
            let name = profile.name.clone();
            match profile.kind {
                ColumnKind::Numeric => info.numeric.push(name),
                ColumnKind::Date => info.date.push(name),
                ColumnKind::Categorical => info.categorical.push(name),
                ColumnKind::Text => info.text.push(name),
            }
        }
        info
    }

    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        let has = |list: &[String]| list.iter().any(|name| name == column);
        if has(&self.numeric) {
            Some(ColumnKind::Numeric)
        } else if has(&self.date) {
            Some(ColumnKind::Date)
        } else if has(&self.categorical) {
            Some(ColumnKind::Categorical)
        } else if has(&self.text) {
            Some(ColumnKind::Text)
        } else {
            None
        }
    }

    pub fn primary_numeric(&self) -> Option<&str> {
        self.numeric.first().map(String::as_str)
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.categorical.first().map(String::as_str)
    }

    pub fn primary_date(&self) -> Option<&str> {
        self.date.first().map(String::as_str)
    }
}

#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    Timeseries,
    Pie,
    Bar,
    Scatter,
    Ranking,
    Table,
    Empty,
}

impl std::fmt::Display for VisualizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl VisualizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeseries => "timeseries",
            Self::Pie => "pie",
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Ranking => "ranking",
            Self::Table => "table",
            Self::Empty => "empty",
        }
    }
}

#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Debug)]
pub struct NumericSummary {
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

#[derive(Clone, Deserialize, Serialize, PartialEq, Eq, Debug)]
pub struct TopValue {
    pub value: String,
    pub count: usize,
}

#[derive(Clone, Deserialize, Serialize, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub unique_count: usize,
    /// Most frequent values, counts descending, ties in first-seen order
    pub top_values: Vec<TopValue>,
}

#[derive(Clone, Deserialize, Serialize, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_rows: usize,
    pub total_columns: usize,
    pub data_types: IndexMap<String, ColumnKind>,
    pub numeric_stats: IndexMap<String, NumericSummary>,
    pub category_stats: IndexMap<String, CategorySummary>,
}

/// Axis keys a renderer reads from `Envelope::data`.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq, Debug)]
pub struct ChartConfig {
    pub x_key: String,
    pub y_key: String,
}

/// Presentation-ready result of analysing one query response.
#[derive(Clone, Deserialize, Serialize, PartialEq, Debug)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: VisualizationType,
    pub data: Vec<Row>,
    #[serde(rename = "originalData")]
    pub original_data: Vec<Row>,
    pub generated_sql: String,
    pub column_info: ColumnInfo,
    pub row_count: usize,
    pub statistics: Statistics,
    #[serde(
        rename = "primaryNumericColumn",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub primary_numeric_column: Option<String>,
    #[serde(
        rename = "primaryCategoryColumn",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub primary_category_column: Option<String>,
    #[serde(
        rename = "primaryDateColumn",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub primary_date_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chart_config: Option<ChartConfig>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

/// The reduced projection stored alongside a chat message.
#[derive(Clone, Deserialize, Serialize, PartialEq, Debug)]
pub struct VisualizationRecord {
    pub visualization_type: VisualizationType,
    pub data_json: Vec<Row>,
    pub chart_config: Option<ChartConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_info_from_profiles() {
        let profiles = vec![
            ColumnProfile {
                name: "region".to_owned(),
                kind: ColumnKind::Categorical,
            },
            ColumnProfile {
                name: "sales".to_owned(),
                kind: ColumnKind::Numeric,
            },
            ColumnProfile {
                name: "day".to_owned(),
                kind: ColumnKind::Date,
            },
        ];
        let info = ColumnInfo::from_profiles(&profiles, 4);
        assert_eq!(info.numeric, vec!["sales"]);
        assert_eq!(info.categorical, vec!["region"]);
        assert_eq!(info.primary_date(), Some("day"));
        assert_eq!(info.kind_of("sales"), Some(ColumnKind::Numeric));
        assert_eq!(info.kind_of("notes"), None);
        assert_eq!(info.total, 4);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_value(VisualizationType::Timeseries).unwrap(),
            "timeseries"
        );
        assert_eq!(
            serde_json::to_value(ColumnKind::Categorical).unwrap(),
            "categorical"
        );

        let info = ColumnInfo {
            categorical: vec!["city".to_owned()],
            total: 1,
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["category"][0], "city");

        let summary = CategorySummary {
            unique_count: 2,
            top_values: vec![],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["uniqueCount"], 2);
        assert!(json["topValues"].is_array());
    }

    #[test]
    fn test_query_response_without_data() {
        let response: QueryResponse =
            serde_json::from_str(r#"{ "generated_sql": "SELECT 1" }"#).unwrap();
        assert!(response.data.is_none());
        assert!(response.rows().is_empty());
        assert_eq!(response.generated_sql, "SELECT 1");
    }

    #[test]
    fn test_query_response_from_json() {
        let raw = r#"{ "data": [{"a": 1}], "generated_sql": "SELECT a" }"#;
        let response = QueryResponse::from_json(raw).unwrap();
        assert_eq!(response.rows().len(), 1);

        let err = QueryResponse::from_json(r#"[{"a": 1}]"#).unwrap_err();
        assert!(matches!(err, QuerySightError::InvalidInput(_)));
        assert!(err.to_string().contains("found an array"));

        let err = QueryResponse::from_json("{ not json").unwrap_err();
        assert!(matches!(err, QuerySightError::Json(_)));
    }
}

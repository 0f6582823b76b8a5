//! Integration tests for the full analysis workflow
//!
//! These tests run the complete pipeline on fixture query responses
//! and verify the end-to-end envelopes.

#![expect(clippy::unwrap_used, clippy::indexing_slicing)]

use querysight::analyser::{Analyser, ColumnKind, QueryResponse, VisualizationType};
use querysight::{AnalysisSettings, analyse_response};
use serde_json::{Value, json};
use std::path::PathBuf;

fn load_fixture(name: &str) -> QueryResponse {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name);
    let content = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_orders_by_status_is_pie() {
    let envelope = analyse_response(&load_fixture("orders_by_status.json"));

    assert_eq!(envelope.kind, VisualizationType::Pie);
    assert_eq!(envelope.column_info.categorical, vec!["status"]);
    assert_eq!(envelope.column_info.numeric, vec!["orders"]);
    assert_eq!(envelope.row_count, 6);

    assert_eq!(envelope.data[0]["category"], json!("paid"));
    assert_eq!(envelope.data[0]["value"], json!(42.0));

    let orders = envelope.statistics.numeric_stats.get("orders").unwrap();
    assert_eq!(orders.sum, 151.0);
    assert_eq!(orders.count, 6);

    let status = envelope.statistics.category_stats.get("status").unwrap();
    assert_eq!(status.unique_count, 3);
    assert_eq!(status.top_values[0].value, "paid");
    assert_eq!(status.top_values[0].count, 3);
}

#[test]
fn test_daily_revenue_is_timeseries() {
    let envelope = analyse_response(&load_fixture("daily_revenue.json"));

    assert_eq!(envelope.kind, VisualizationType::Timeseries);
    assert_eq!(envelope.primary_date_column.as_deref(), Some("order_date"));
    assert_eq!(envelope.primary_numeric_column.as_deref(), Some("revenue"));
    assert_eq!(envelope.data.len(), 14);
    assert_eq!(envelope.data[0]["date"], json!("01.03.2024"));
    assert_eq!(envelope.data[0]["order_date"], json!("2024-03-01"));
    assert!(envelope.original_data[0].get("date").is_none());

    let config = envelope.chart_config.unwrap();
    assert_eq!(config.x_key, "order_date");
    assert_eq!(config.y_key, "revenue");
}

#[test]
fn test_leaderboard_is_ranked() {
    let envelope = analyse_response(&load_fixture("leaderboard.json"));

    assert_eq!(envelope.kind, VisualizationType::Ranking);
    assert_eq!(envelope.column_info.text, vec!["player"]);

    let ranked: Vec<(Value, Value)> = envelope
        .data
        .iter()
        .map(|row| (row["player"].clone(), row["rank"].clone()))
        .collect();
    assert_eq!(ranked[0], (json!("Tural"), json!(1)));
    // Ties keep their input order.
    assert_eq!(ranked[1], (json!("Murad"), json!(2)));
    assert_eq!(ranked[2], (json!("Kamran"), json!(3)));
    assert_eq!(ranked[11], (json!("Orkhan"), json!(12)));

    assert_eq!(envelope.original_data[0]["player"], json!("Aysel"));
}

#[test]
fn test_product_prices_is_bar() {
    let envelope = analyse_response(&load_fixture("product_prices.json"));

    assert_eq!(envelope.kind, VisualizationType::Bar);
    assert_eq!(envelope.column_info.kind_of("price"), Some(ColumnKind::Numeric));
    assert_eq!(envelope.column_info.kind_of("sku"), Some(ColumnKind::Text));

    // A null price charts as zero.
    assert_eq!(envelope.data[2]["value"], json!(0.0));
    assert_eq!(envelope.data[2]["category"], json!("Garden"));

    // Values that do not parse are left out of the summary.
    let price = envelope.statistics.numeric_stats.get("price").unwrap();
    assert_eq!(price.count, 10);
    assert_eq!(price.min, 8.0);
    assert_eq!(price.max, 349.0);
    assert!((price.sum - 822.98).abs() < 1e-9);
}

#[test]
fn test_sensor_readings_is_scatter() {
    let envelope = analyse_response(&load_fixture("sensor_readings.json"));

    assert_eq!(envelope.kind, VisualizationType::Scatter);
    assert_eq!(envelope.data, envelope.original_data);
    let config = envelope.chart_config.unwrap();
    assert_eq!(config.x_key, "temperature");
    assert_eq!(config.y_key, "humidity");
}

#[test]
fn test_customers_is_table() {
    let envelope = analyse_response(&load_fixture("customers.json"));

    assert_eq!(envelope.kind, VisualizationType::Table);
    assert_eq!(envelope.column_info.text, vec!["full_name", "email"]);
    assert!(envelope.statistics.numeric_stats.is_empty());
    assert!(envelope.statistics.category_stats.is_empty());
    assert_eq!(envelope.statistics.total_columns, 2);
}

#[test]
fn test_empty_and_missing_data() {
    for fixture in ["empty.json", "no_data.json"] {
        let envelope = analyse_response(&load_fixture(fixture));
        assert_eq!(envelope.kind, VisualizationType::Empty, "{fixture}");
        assert_eq!(envelope.row_count, 0);
        assert!(envelope.message.is_some());
    }
}

#[test]
fn test_settings_change_selection() {
    let settings = AnalysisSettings {
        category_chart_max_rows: 10,
        ..AnalysisSettings::default()
    };
    let analyser = Analyser::new(settings);

    // Too many rows for a category chart, one numeric column: ranking.
    let envelope = analyser.analyse(&load_fixture("product_prices.json"));
    assert_eq!(envelope.kind, VisualizationType::Ranking);
}

#[test]
fn test_envelope_serializes_wire_names() {
    let envelope = analyse_response(&load_fixture("daily_revenue.json"));
    let json = serde_json::to_value(&envelope).unwrap();

    assert_eq!(json["type"], "timeseries");
    assert_eq!(json["row_count"], 14);
    assert_eq!(json["column_info"]["date"], json!(["order_date"]));
    assert_eq!(json["statistics"]["totalRows"], 14);
    assert_eq!(json["statistics"]["numericStats"]["revenue"]["count"], 14);
    assert_eq!(json["primaryDateColumn"], "order_date");
    let sql = "SELECT DATE(created_at) AS order_date, SUM(amount) AS revenue \
               FROM orders GROUP BY 1 ORDER BY 1";
    assert_eq!(json["generated_sql"], sql);
}

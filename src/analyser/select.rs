use super::types::{ColumnInfo, VisualizationType};
use crate::config::AnalysisSettings;

/// Picks a visualization from the classified columns and the row count.
///
/// Rules are evaluated top to bottom and the first match wins:
///
/// | Condition | Result |
/// |---|---|
/// | no rows | `Empty` |
/// | a date and a numeric column | `Timeseries` |
/// | as below, with one category column and at most `pie_max_rows` rows | `Pie` |
/// | category + numeric, at most `category_chart_max_rows` rows | `Bar` |
/// | two or more numeric columns, more than `scatter_min_rows` rows | `Scatter` |
/// | a numeric column, at most `ranking_max_rows` rows | `Ranking` |
/// | anything else | `Table` |
pub fn select_visualization(
    info: &ColumnInfo,
    row_count: usize,
    settings: &AnalysisSettings,
) -> VisualizationType {
    let has_numeric = !info.numeric.is_empty();

    if row_count == 0 {
        VisualizationType::Empty
    } else if !info.date.is_empty() && has_numeric {
        VisualizationType::Timeseries
    } else if !info.categorical.is_empty()
        && has_numeric
        && row_count <= settings.category_chart_max_rows
    {
        if info.categorical.len() == 1 && row_count <= settings.pie_max_rows {
            VisualizationType::Pie
        } else {
            VisualizationType::Bar
        }
    } else if info.numeric.len() >= 2 && row_count > settings.scatter_min_rows {
        VisualizationType::Scatter
    } else if has_numeric && row_count <= settings.ranking_max_rows {
        VisualizationType::Ranking
    } else {
        VisualizationType::Table
    }
}

//! # QuerySight - Visualization Selection for Query Results
//!
//! QuerySight looks at the rows a natural-language SQL assistant got back
//! from the database and decides how to show them. It infers a type for every
//! column, picks a chart from a fixed decision table, reshapes the rows for
//! that chart and attaches summary statistics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use querysight::analyser::{QueryResponse, analyse_response};
//!
//! # fn example() -> anyhow::Result<()> {
//! let json = r#"{
//!     "data": [{"region": "North", "total": 10}, {"region": "South", "total": 20}],
//!     "generated_sql": "SELECT region, SUM(amount) AS total FROM sales GROUP BY region"
//! }"#;
//! let response: QueryResponse = serde_json::from_str(json)?;
//!
//! let envelope = analyse_response(&response);
//! println!("Render as {}", envelope.kind);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: Column classification, chart selection and statistics
//!   - [`analyser::classify`]: Sample-based column typing
//!   - [`analyser::select`]: The visualization decision table
//! - [`config`]: Tunable thresholds loaded from a JSON settings file
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: `tracing` subscriber setup for the binary

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;

pub use analyser::{Analyser, Envelope, QueryResponse, VisualizationType, analyse_response};
pub use config::AnalysisSettings;

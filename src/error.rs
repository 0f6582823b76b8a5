//! Error handling for the querysight library.
//!
//! The analysis engine itself never fails: malformed values are filtered, not
//! fatal. Errors only come from the edges around it, such as reading a query
//! response from disk, decoding its JSON, or loading settings.
//!
//! ```
//! use querysight::error::QuerySightError;
//!
//! fn describe(err: &QuerySightError) -> &'static str {
//!     match err {
//!         QuerySightError::Io(_) => "io",
//!         QuerySightError::Json(_) => "json",
//!         QuerySightError::Config(_) => "config",
//!         _ => "other",
//!     }
//! }
//! ```
//!
//! The `ResultExt` trait adds `.context()` to any `Result` whose error converts
//! into [`QuerySightError`]:
//!
//! ```no_run
//! use querysight::error::ResultExt as _;
//!
//! fn load() -> querysight::error::Result<String> {
//!     let raw = std::fs::read_to_string("response.json").context("Failed to read response")?;
//!     Ok(raw)
//! }
//! ```

use std::fmt;

/// Main error type for querysight operations.
#[derive(Debug)]
pub enum QuerySightError {
    /// I/O errors (reading responses, writing settings)
    Io(std::io::Error),

    /// Malformed JSON documents
    Json(serde_json::Error),

    /// Settings could not be loaded or saved
    Config(String),

    /// Input was structurally unusable (e.g. not an object)
    InvalidInput(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for QuerySightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for QuerySightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuerySightError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for QuerySightError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<anyhow::Error> for QuerySightError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Result type alias for querysight operations.
pub type Result<T> = std::result::Result<T, QuerySightError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<QuerySightError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: QuerySightError = e.into();
            QuerySightError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: QuerySightError = e.into();
            QuerySightError::Other(format!("{}: {}", f(), err))
        })
    }
}

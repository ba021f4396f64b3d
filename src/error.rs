//! Error types for the catalog report engine.
//!
//! Data-quality problems never surface here: unparsable values become nulls
//! and incomplete records are filtered out. What remains are structural
//! failures (a required column is missing), I/O at the shell boundary, and
//! configuration mistakes.
//!
//! ```
//! use handset::error::CatalogError;
//!
//! fn describe(err: &CatalogError) -> String {
//!     match err {
//!         CatalogError::SchemaMismatch { missing } => format!("missing {}", missing.join(", ")),
//!         other => other.to_string(),
//!     }
//! }
//! # let err = CatalogError::SchemaMismatch { missing: vec!["Brand".to_owned()] };
//! # assert_eq!(describe(&err), "missing Brand");
//! ```

use std::fmt;

/// Main error type for catalog operations.
#[derive(Debug)]
pub enum CatalogError {
    /// I/O errors while reading the catalog or writing reports
    Io(std::io::Error),

    /// Polars failed while evaluating a stage
    DataProcessing(String),

    /// Required source columns are absent from the input table
    SchemaMismatch { missing: Vec<String> },

    /// Invalid report configuration
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::SchemaMismatch { missing } => write!(
                f,
                "Schema mismatch: required column(s) not found: {}",
                missing.join(", ")
            ),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<regex::Error> for CatalogError {
    fn from(err: regex::Error) -> Self {
        Self::Config(format!("invalid pattern: {err}"))
    }
}

impl From<polars::error::PolarsError> for CatalogError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

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
    E: Into<CatalogError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: CatalogError = e.into();
            CatalogError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: CatalogError = e.into();
            CatalogError::Other(format!("{}: {}", f(), err))
        })
    }
}

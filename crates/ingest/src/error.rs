//! Error types produced by the ingest crate.
//!
//! Ingest failures come in two tiers:
//!
//! | Error | Tier | Effect |
//! |-------|------|--------|
//! | [`IngestError`] | Terminal | The whole upload is rejected; no report is produced |
//! | [`ValidationFailure`] | Row-level | Collected into the report; the batch continues |
//!
//! # HTTP Status Code Mapping
//!
//! ```rust
//! use ingest::IngestError;
//!
//! let err = IngestError::Input("records missing".into());
//! assert_eq!(err.http_status_code(), 400);
//!
//! let err = IngestError::Parse("unbalanced quote".into());
//! assert_eq!(err.http_status_code(), 422);
//! ```
use thiserror::Error;

/// Terminal errors raised by the source adapters.
///
/// Any of these aborts the request before the batch processor runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The payload could not be tokenized (malformed CSV, malformed JSON,
    /// invalid UTF-8). Carries the underlying parser message.
    #[error("{0}")]
    Parse(String),

    /// The payload is well-formed but has the wrong shape, e.g. a JSON body
    /// without a non-empty `records` array.
    #[error("{0}")]
    Input(String),

    /// The upload holds more rows than the configured ceiling.
    #[error("upload contains {got} records; the limit is {limit}")]
    TooManyRecords {
        /// Configured [`IngestConfig::max_records`](crate::IngestConfig::max_records).
        limit: usize,
        /// Rows found in the upload.
        got: usize,
    },
}

impl IngestError {
    /// Returns true when the request itself was malformed in shape, as
    /// opposed to failing while being parsed.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            IngestError::Input(_) | IngestError::TooManyRecords { .. }
        )
    }

    /// Suggested HTTP status code.
    ///
    /// - `Input`: 400
    /// - `TooManyRecords`: 413
    /// - `Parse`: 422
    pub fn http_status_code(&self) -> u16 {
        match self {
            IngestError::Input(_) => 400,
            IngestError::TooManyRecords { .. } => 413,
            IngestError::Parse(_) => 422,
        }
    }
}

/// A single record failed sanitization.
///
/// The only row-level sanitization failure is a missing `name` or
/// `supplier`. Everything else degrades to a default.
///
/// ```rust
/// use ingest::ValidationFailure;
///
/// let failure = ValidationFailure::MissingRequired { row: 4 };
/// assert_eq!(failure.to_string(), r#"Row 4: "name" and "supplier" are required."#);
/// assert_eq!(failure.row(), 4);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationFailure {
    #[error("Row {row}: \"name\" and \"supplier\" are required.")]
    MissingRequired { row: usize },
}

impl ValidationFailure {
    /// Spreadsheet row the failure refers to.
    pub fn row(&self) -> usize {
        match self {
            ValidationFailure::MissingRequired { row } => *row,
        }
    }
}

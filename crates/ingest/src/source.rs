//! Source adapters: turn an uploaded CSV file or a JSON body into raw records.
//!
//! Adapter failures are terminal. A CSV file that cannot be tokenized or a
//! JSON body without a usable `records` array rejects the whole upload; no
//! row is processed.
//!
//! # CSV
//!
//! ```rust
//! use ingest::{parse_csv, Field, IngestConfig};
//!
//! let text = "name,supplier,colour\n Deal , Acme ,red\n\nOther,Acme,blue\n";
//! let rows = parse_csv(text, &IngestConfig::default()).unwrap();
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].get(Field::Name).as_text().as_deref(), Some("Deal"));
//! ```
//!
//! # JSON
//!
//! ```rust
//! use ingest::{parse_json_payload, IngestConfig, IngestError};
//!
//! let cfg = IngestConfig::default();
//! let rows = parse_json_payload(br#"{"records":[{"name":"Deal","supplier":"Acme"}]}"#, &cfg).unwrap();
//! assert_eq!(rows.len(), 1);
//!
//! let err = parse_json_payload(br#"{"records":[]}"#, &cfg).unwrap_err();
//! assert!(matches!(err, IngestError::Input(_)));
//! ```
use serde_json::Value;
use tracing::debug;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::types::{Field, RawRecord};

/// Message returned when a JSON body lacks a non-empty `records` array.
pub const RECORDS_REQUIRED: &str = "Request body must include a non-empty \"records\" array.";

/// Parses CSV text. The first line is the header; blank lines are skipped;
/// headers and values are trimmed; columns outside the vocabulary are ignored.
///
/// Every data row must have as many fields as the header.
pub fn parse_csv(text: &str, cfg: &IngestConfig) -> Result<Vec<RawRecord>, IngestError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(cfg.delimiter_byte())
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(text.as_bytes());

    let columns: Vec<Option<Field>> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(Field::from_name)
        .collect();

    let ignored = columns.iter().filter(|c| c.is_none()).count();
    if ignored > 0 {
        debug!(ignored, "csv_unrecognized_columns");
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let mut raw = RawRecord::new();
        for (column, value) in columns.iter().zip(row.iter()) {
            if let Some(field) = column {
                raw.set(*field, value);
            }
        }
        records.push(raw);
    }

    enforce_record_limit(records.len(), cfg)?;
    Ok(records)
}

/// Parses raw upload bytes as UTF-8 CSV.
pub fn parse_csv_bytes(bytes: &[u8], cfg: &IngestConfig) -> Result<Vec<RawRecord>, IngestError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| IngestError::Parse(format!("upload is not valid UTF-8: {err}")))?;
    parse_csv(text, cfg)
}

/// Parses a JSON request body shaped as `{ "records": [ {...}, ... ] }`.
///
/// Malformed JSON is a [`IngestError::Parse`]; an empty body or one without
/// a non-empty `records` array is an [`IngestError::Input`].
pub fn parse_json_payload(bytes: &[u8], cfg: &IngestConfig) -> Result<Vec<RawRecord>, IngestError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::Input(RECORDS_REQUIRED.into()));
    }
    let body: Value = serde_json::from_slice(bytes)
        .map_err(|err| IngestError::Parse(format!("invalid JSON body: {err}")))?;
    parse_json_records(&body, cfg)
}

/// Same checks as [`parse_json_payload`] on an already decoded body.
pub fn parse_json_records(body: &Value, cfg: &IngestConfig) -> Result<Vec<RawRecord>, IngestError> {
    let records = body
        .get("records")
        .and_then(Value::as_array)
        .filter(|records| !records.is_empty())
        .ok_or_else(|| IngestError::Input(RECORDS_REQUIRED.into()))?;

    enforce_record_limit(records.len(), cfg)?;
    Ok(records.iter().map(RawRecord::from_json_value).collect())
}

fn enforce_record_limit(got: usize, cfg: &IngestConfig) -> Result<(), IngestError> {
    match cfg.max_records {
        Some(limit) if got > limit => Err(IngestError::TooManyRecords { limit, got }),
        _ => Ok(()),
    }
}

fn csv_error(err: csv::Error) -> IngestError {
    IngestError::Parse(err.to_string())
}

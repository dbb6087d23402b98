//! Workspace umbrella crate for bulk contract intake.
//!
//! This crate stitches the source adapters and the batch processor together
//! so callers can turn an uploaded CSV file or JSON body into a
//! [`BatchReport`] with a single call.

pub use ingest::{
    BatchReport, Clock, ConfigError, Contract, Field, FieldValue, FixedClock, HEADER_ROW_OFFSET,
    IngestConfig, IngestEnv, IngestError, MergePlan, RECORDS_REQUIRED, RandomSource, RawRecord,
    SeededRandom, SystemClock, TEMPLATE_FILE_NAME, ThreadRandom, ValidationError,
    ValidationFailure, display_row, parse_csv, parse_csv_bytes, parse_date, parse_json_payload,
    parse_json_records, parse_number, partition_known, process, sanitize, template_csv,
};

use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Upload encodings accepted by the intake pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Json => "json",
        }
    }

    /// Infers the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<SourceFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An upload was rejected before any row was processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{format} upload rejected: {source}")]
pub struct IntakeError {
    format: SourceFormat,
    source: IngestError,
}

impl IntakeError {
    pub fn new(format: SourceFormat, source: IngestError) -> Self {
        Self { format, source }
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn ingest_error(&self) -> &IngestError {
        &self.source
    }

    /// True when the upload had the wrong shape (missing `records`, too many
    /// rows), false when it failed to parse.
    pub fn is_bad_request(&self) -> bool {
        self.source.is_bad_request()
    }
}

/// Metrics observer for intake stages.
pub trait IntakeMetrics: Send + Sync {
    fn record_adapter(
        &self,
        format: SourceFormat,
        latency: Duration,
        result: Result<(), IngestError>,
    );
    fn record_batch(&self, format: SourceFormat, latency: Duration, report: &BatchReport);
}

/// Install or clear the global intake metrics recorder.
pub fn set_intake_metrics(recorder: Option<Arc<dyn IntakeMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn IntakeMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn IntakeMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn IntakeMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn IntakeMetrics>,
    format: SourceFormat,
    start: Instant,
}

impl MetricsSpan {
    fn start(format: SourceFormat) -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            format,
            start: Instant::now(),
        })
    }

    fn record_adapter(self, result: Result<(), IngestError>) {
        self.recorder
            .record_adapter(self.format, self.start.elapsed(), result);
    }

    fn record_batch(self, report: &BatchReport) {
        self.recorder
            .record_batch(self.format, self.start.elapsed(), report);
    }
}

/// Parse CSV text and process every row.
pub fn import_csv(text: &str, env: &IngestEnv<'_>) -> Result<BatchReport, IntakeError> {
    let rows = adapt(SourceFormat::Csv, || parse_csv(text, env.config))?;
    Ok(run_batch(SourceFormat::Csv, &rows, env))
}

/// Parse a JSON body (`{ "records": [...] }`) and process every record.
pub fn import_json(bytes: &[u8], env: &IngestEnv<'_>) -> Result<BatchReport, IntakeError> {
    let rows = adapt(SourceFormat::Json, || parse_json_payload(bytes, env.config))?;
    Ok(run_batch(SourceFormat::Json, &rows, env))
}

/// Dispatch raw upload bytes to the adapter for `format`.
pub fn import(
    bytes: &[u8],
    format: SourceFormat,
    env: &IngestEnv<'_>,
) -> Result<BatchReport, IntakeError> {
    match format {
        SourceFormat::Csv => {
            let rows = adapt(SourceFormat::Csv, || parse_csv_bytes(bytes, env.config))?;
            Ok(run_batch(SourceFormat::Csv, &rows, env))
        }
        SourceFormat::Json => import_json(bytes, env),
    }
}

fn adapt(
    format: SourceFormat,
    parse: impl FnOnce() -> Result<Vec<RawRecord>, IngestError>,
) -> Result<Vec<RawRecord>, IntakeError> {
    let span = MetricsSpan::start(format);
    match parse() {
        Ok(rows) => {
            if let Some(span) = span {
                span.record_adapter(Ok(()));
            }
            Ok(rows)
        }
        Err(err) => {
            warn!(format = %format, error = %err, "intake_rejected");
            if let Some(span) = span {
                span.record_adapter(Err(err.clone()));
            }
            Err(IntakeError::new(format, err))
        }
    }
}

fn run_batch(format: SourceFormat, rows: &[RawRecord], env: &IngestEnv<'_>) -> BatchReport {
    let span = MetricsSpan::start(format);
    let report = process(rows, env);
    if let Some(span) = span {
        span.record_batch(&report);
    }
    report
}

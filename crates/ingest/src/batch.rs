//! Batch processing: sanitize every row in order and collect a report.
//!
//! A failing row never stops the batch. The first row holding a given
//! reference number wins; later rows with the same reference are reported as
//! duplicates and dropped.
use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info};

use crate::env::IngestEnv;
use crate::sanitize::{display_row, sanitize};
use crate::types::{BatchReport, RawRecord, ValidationError};

/// Processes one upload.
///
/// `errors` and `records` each keep input order, and
/// `inserted + failed == raw.len()`.
///
/// ```rust
/// use ingest::{process, Field, IngestConfig, IngestEnv, RawRecord};
///
/// let config = IngestConfig::default();
/// let env = IngestEnv::system(&config);
/// let rows = vec![
///     RawRecord::new().with(Field::Name, "A").with(Field::Supplier, "S").with(Field::ReferenceNumber, "R-1"),
///     RawRecord::new().with(Field::Name, "B").with(Field::Supplier, "S").with(Field::ReferenceNumber, "R-1"),
///     RawRecord::new().with(Field::Supplier, "S"),
/// ];
///
/// let report = process(&rows, &env);
/// assert_eq!(report.inserted, 1);
/// assert_eq!(report.failed, 2);
/// assert_eq!(report.errors[0].row, 3);
/// assert_eq!(report.errors[1].row, 4);
/// ```
pub fn process(raw: &[RawRecord], env: &IngestEnv<'_>) -> BatchReport {
    let start = Instant::now();
    let mut seen_references: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();

    for (index, record) in raw.iter().enumerate() {
        let row = display_row(index);
        let contract = match sanitize(record, index, env) {
            Ok(contract) => contract,
            Err(failure) => {
                debug!(row, error = %failure, "row_rejected");
                errors.push(ValidationError {
                    row,
                    message: failure.to_string(),
                });
                continue;
            }
        };

        if seen_references.contains(&contract.reference_number) {
            let message = format!(
                "Row {row}: duplicate reference number \"{}\" inside upload.",
                contract.reference_number
            );
            debug!(row, reference = %contract.reference_number, "row_duplicate_reference");
            errors.push(ValidationError { row, message });
            continue;
        }

        seen_references.insert(contract.reference_number.clone());
        records.push(contract);
    }

    let report = BatchReport {
        inserted: records.len(),
        failed: errors.len(),
        errors,
        records,
    };

    info!(
        rows = raw.len(),
        inserted = report.inserted,
        failed = report.failed,
        elapsed_micros = start.elapsed().as_micros(),
        "batch_processed"
    );
    report
}

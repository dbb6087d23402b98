//! Contract Ingest Layer
//!
//! This is where bulk uploads of supplier contracts enter the system. We take
//! a CSV file or a JSON body, turn every row into a typed raw record, clean it
//! up into a canonical [`Contract`], and hand back a [`BatchReport`] saying
//! what was accepted and what was rejected and why.
//!
//! ## What we do here
//!
//! - **Parse uploads** - CSV with a header row, or JSON `{ "records": [...] }`.
//!   A file we can't tokenize rejects the whole upload.
//! - **Sanitize rows** - Trim text, parse loose dates and numbers, fill
//!   defaults for type, status and review date, synthesize ids and
//!   reference numbers when missing.
//! - **Validate the batch** - Rows without `name` or `supplier` are rejected,
//!   and so are repeated reference numbers. One bad row never sinks the rest.
//! - **Stay testable** - "Now" and randomness come in through [`IngestEnv`],
//!   so tests freeze them with [`FixedClock`] and [`SeededRandom`].
//! - **Log everything** - Structured logs via tracing for batch summaries
//!   and row rejections.
//!
//! ## Main entry points
//!
//! [`parse_csv`] / [`parse_json_payload`] produce raw records, and
//! [`process`] turns them into a [`BatchReport`].
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ingest::{parse_csv, process, FixedClock, IngestConfig, IngestEnv, SeededRandom};
//!
//! let config = IngestConfig::default();
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
//! let random = SeededRandom::new(1);
//! let env = IngestEnv::new(&config, &clock, &random);
//!
//! let csv = "name,supplier,type,contractValue,referenceNumber\n\
//!            Food Supply,Brakes,food,65000,REF-001\n\
//!            ,Bidfood,food,,REF-002\n";
//!
//! let rows = parse_csv(csv, &config).unwrap();
//! let report = process(&rows, &env);
//!
//! assert_eq!(report.inserted, 1);
//! assert_eq!(report.failed, 1);
//! assert_eq!(report.records[0].contract_value, Some(65000.0));
//! assert_eq!(report.errors[0].message, r#"Row 3: "name" and "supplier" are required."#);
//! ```
mod batch;
mod config;
mod env;
mod error;
mod known;
mod sanitize;
mod source;
mod template;
mod types;
mod values;

pub use crate::batch::process;
pub use crate::config::{ConfigError, IngestConfig};
pub use crate::env::{
    Clock, FixedClock, IngestEnv, RandomSource, SeededRandom, SystemClock, ThreadRandom,
};
pub use crate::error::{IngestError, ValidationFailure};
pub use crate::known::{MergePlan, partition_known};
pub use crate::sanitize::{HEADER_ROW_OFFSET, display_row, sanitize};
pub use crate::source::{
    RECORDS_REQUIRED, parse_csv, parse_csv_bytes, parse_json_payload, parse_json_records,
};
pub use crate::template::{TEMPLATE_FILE_NAME, template_csv};
pub use crate::types::{BatchReport, Contract, Field, FieldValue, RawRecord, ValidationError};
pub use crate::values::{parse_date, parse_number};

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    use super::*;

    const NOW_MILLIS: i64 = 1_704_067_200_000;

    fn frozen_env<'a>(
        config: &'a IngestConfig,
        clock: &'a FixedClock,
        random: &'a SeededRandom,
    ) -> IngestEnv<'a> {
        IngestEnv::new(config, clock, random)
    }

    #[test]
    fn csv_upload_end_to_end() {
        let config = IngestConfig::default();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let random = SeededRandom::new(3);
        let env = frozen_env(&config, &clock, &random);

        let csv = "name,supplier,endDate,status,durationMonths,area\n\
                   Cleaning,Acme,not-a-date,,twelve,  \n";
        let rows = parse_csv(csv, &config).unwrap();
        let report = process(&rows, &env);

        assert_eq!(report.inserted, 1);
        let contract = &report.records[0];
        assert_eq!(contract.id, NOW_MILLIS);
        assert_eq!(contract.contract_type, "other");
        assert_eq!(contract.status, "active");
        assert_eq!(contract.end_date, None);
        assert_eq!(contract.duration_months, None);
        assert_eq!(contract.area, None);
        assert_eq!(contract.last_reviewed, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(contract.reference_number.starts_with("AUTO-1704067200000-"));
    }

    #[test]
    fn json_upload_end_to_end() {
        let config = IngestConfig::default();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let random = SeededRandom::new(3);
        let env = frozen_env(&config, &clock, &random);

        let body = json!({
            "records": [
                {"id": 42, "name": "Deal", "supplier": "Acme", "contractValue": 1000, "referenceNumber": "R-1"},
                {"name": "Other", "supplier": "Acme", "referenceNumber": "R-1"},
                "not an object"
            ]
        });
        let rows = parse_json_records(&body, &config).unwrap();
        let report = process(&rows, &env);

        assert_eq!(report.inserted, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.records[0].id, 42);
        assert_eq!(report.errors[0].row, 3);
        assert!(report.errors[0].message.contains("duplicate reference number"));
        assert_eq!(report.errors[1].row, 4);
        assert!(report.errors[1].message.contains("are required"));
    }

    #[test]
    fn report_serializes_with_wire_shape() {
        let config = IngestConfig::default();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let random = SeededRandom::new(3);
        let env = frozen_env(&config, &clock, &random);

        let rows = vec![RawRecord::new().with(Field::Name, "Only name")];
        let report = process(&rows, &env);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["inserted"], 0);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["errors"][0]["row"], 2);
        assert_eq!(value["records"], json!([]));
    }
}

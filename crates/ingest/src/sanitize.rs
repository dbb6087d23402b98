//! Record sanitization: one raw row in, one canonical [`Contract`] out.
//!
//! # Rules
//!
//! ```text
//! RawRecord
//!        │
//!        ▼
//! ┌──────────────────────────────────────────────┐
//! │ 1. name, supplier      trimmed, required     │
//! │ 2. id                  explicit integer, or  │
//! │                        clock millis + offset │
//! │ 3. type, status        trimmed, lower-cased, │
//! │                        defaulted             │
//! │ 4. endDate             best-effort, or null  │
//! │    lastReviewed        best-effort, or today │
//! │ 5. contractValue,      decimal, or null      │
//! │    durationMonths                            │
//! │ 6. area, reminder,     trimmed, or null      │
//! │    internalContact,                          │
//! │    notes                                     │
//! │ 7. referenceNumber     trimmed, or           │
//! │                        <prefix>-<millis>-<n> │
//! └──────────────────────────────────────────────┘
//!        │
//!        ▼
//! Contract
//! ```
//!
//! Only rule 1 can fail. Negative and zero amounts are accepted unchanged.
use crate::env::IngestEnv;
use crate::error::ValidationFailure;
use crate::types::{Contract, Field, RawRecord};
use crate::values::{date_value, integer_value, number_value, text_value};

/// Spreadsheet offset between a zero-based batch index and the row number
/// shown to users: the header occupies row 1, so data starts at row 2.
pub const HEADER_ROW_OFFSET: usize = 2;

/// Spreadsheet row number for a zero-based batch index.
///
/// ```rust
/// assert_eq!(ingest::display_row(0), 2);
/// ```
pub fn display_row(index: usize) -> usize {
    index + HEADER_ROW_OFFSET
}

/// Sanitizes the record at zero-based position `index` of its batch.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use ingest::{sanitize, Field, FixedClock, IngestConfig, IngestEnv, RawRecord, SeededRandom};
///
/// let config = IngestConfig::default();
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
/// let random = SeededRandom::new(1);
/// let env = IngestEnv::new(&config, &clock, &random);
///
/// let raw = RawRecord::new()
///     .with(Field::Name, "  Laundry ")
///     .with(Field::Supplier, "Johnsons")
///     .with(Field::Status, "ACTIVE");
///
/// let contract = sanitize(&raw, 0, &env).unwrap();
/// assert_eq!(contract.name, "Laundry");
/// assert_eq!(contract.status, "active");
/// assert_eq!(contract.contract_type, "other");
/// assert!(contract.reference_number.starts_with("AUTO-"));
///
/// let err = sanitize(&RawRecord::new(), 3, &env).unwrap_err();
/// assert_eq!(err.row(), 5);
/// ```
pub fn sanitize(
    raw: &RawRecord,
    index: usize,
    env: &IngestEnv<'_>,
) -> Result<Contract, ValidationFailure> {
    let cfg = env.config;
    let strip = cfg.strip_control_chars;
    let text = |field: Field| text_value(raw.get(field), strip);

    let (Some(name), Some(supplier)) = (text(Field::Name), text(Field::Supplier)) else {
        return Err(ValidationFailure::MissingRequired {
            row: display_row(index),
        });
    };

    let id = integer_value(raw.get(Field::Id))
        .unwrap_or_else(|| synthesize_id(env.clock.now_millis(), index));

    let contract_type = text(Field::Type)
        .map(|t| t.to_lowercase())
        .unwrap_or_else(|| cfg.default_type.to_lowercase());
    let status = text(Field::Status)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| cfg.default_status.to_lowercase());

    let end_date = date_value(raw.get(Field::EndDate));
    let last_reviewed =
        date_value(raw.get(Field::LastReviewed)).unwrap_or_else(|| env.clock.today());

    let reference_number =
        text(Field::ReferenceNumber).unwrap_or_else(|| synthesize_reference(env));

    Ok(Contract {
        id,
        name,
        supplier,
        contract_type,
        end_date,
        status,
        contract_value: number_value(raw.get(Field::ContractValue)),
        duration_months: number_value(raw.get(Field::DurationMonths)),
        area: text(Field::Area),
        reminder: text(Field::Reminder),
        internal_contact: text(Field::InternalContact),
        reference_number,
        notes: text(Field::Notes),
        last_reviewed,
    })
}

/// Distinct per row of one batch even when every row is processed within the
/// same millisecond.
fn synthesize_id(now_millis: i64, index: usize) -> i64 {
    now_millis.saturating_add(i64::try_from(index).unwrap_or(i64::MAX))
}

fn synthesize_reference(env: &IngestEnv<'_>) -> String {
    let cfg = env.config;
    format!(
        "{}-{}-{}",
        cfg.reference_prefix,
        env.clock.now_millis(),
        env.random.below(cfg.reference_suffix_bound)
    )
}

//! Core data model types for the ingest crate.
//!
//! These types describe the shape of an upload before and after sanitization.
//! Raw input is held in a typed intermediate form ([`RawRecord`] of
//! [`FieldValue`]s) so the sanitizer never has to guess what a loosely typed
//! JSON or CSV cell meant.
//!
//! # Type Hierarchy
//!
//! ```text
//! RawRecord                      (one uploaded row)
//! └── Field -> FieldValue
//!     ├── Absent
//!     ├── Text(String)
//!     └── Number(f64)
//!
//!         ↓ sanitize()
//!
//! Contract                       (canonical business record)
//!
//!         ↓ process()
//!
//! BatchReport
//! ├── inserted / failed
//! ├── errors: Vec<ValidationError>
//! └── records: Vec<Contract>
//! ```
//!
//! # Examples
//!
//! ```rust
//! use ingest::{Field, FieldValue, RawRecord};
//!
//! let raw = RawRecord::new()
//!     .with(Field::Name, "Food Supply Contract")
//!     .with(Field::Supplier, "Brakes")
//!     .with(Field::ContractValue, 65000.0);
//!
//! assert_eq!(raw.get(Field::Name).as_text().as_deref(), Some("Food Supply Contract"));
//! assert_eq!(raw.get(Field::ContractValue).as_text().as_deref(), Some("65000"));
//! assert!(raw.get(Field::Notes).is_absent());
//! ```
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fixed column vocabulary understood by the adapters.
///
/// Names are matched exactly (case-sensitive). Columns or JSON keys outside
/// this vocabulary are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "supplier")]
    Supplier,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "endDate")]
    EndDate,
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "contractValue")]
    ContractValue,
    #[serde(rename = "durationMonths")]
    DurationMonths,
    #[serde(rename = "area")]
    Area,
    #[serde(rename = "reminder")]
    Reminder,
    #[serde(rename = "internalContact")]
    InternalContact,
    #[serde(rename = "referenceNumber")]
    ReferenceNumber,
    #[serde(rename = "notes")]
    Notes,
    #[serde(rename = "lastReviewed")]
    LastReviewed,
}

impl Field {
    /// Every recognised field, in vocabulary order.
    pub const ALL: [Field; 14] = [
        Field::Id,
        Field::Name,
        Field::Supplier,
        Field::Type,
        Field::EndDate,
        Field::Status,
        Field::ContractValue,
        Field::DurationMonths,
        Field::Area,
        Field::Reminder,
        Field::InternalContact,
        Field::ReferenceNumber,
        Field::Notes,
        Field::LastReviewed,
    ];

    /// The columns offered in the upload template. `id` is accepted on input
    /// but never advertised.
    pub const TEMPLATE_COLUMNS: [Field; 13] = [
        Field::Name,
        Field::Supplier,
        Field::Type,
        Field::EndDate,
        Field::Status,
        Field::ContractValue,
        Field::DurationMonths,
        Field::Area,
        Field::Reminder,
        Field::InternalContact,
        Field::ReferenceNumber,
        Field::Notes,
        Field::LastReviewed,
    ];

    /// Wire name of the field as it appears in CSV headers and JSON keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Supplier => "supplier",
            Field::Type => "type",
            Field::EndDate => "endDate",
            Field::Status => "status",
            Field::ContractValue => "contractValue",
            Field::DurationMonths => "durationMonths",
            Field::Area => "area",
            Field::Reminder => "reminder",
            Field::InternalContact => "internalContact",
            Field::ReferenceNumber => "referenceNumber",
            Field::Notes => "notes",
            Field::LastReviewed => "lastReviewed",
        }
    }

    /// Resolves a header or key to a field. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single raw cell after boundary parsing.
///
/// CSV cells are always [`FieldValue::Text`]. JSON strings become `Text`,
/// JSON numbers become `Number`, and everything else (`null`, booleans,
/// arrays, objects) is treated as [`FieldValue::Absent`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Absent,
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Converts a decoded JSON value into the typed intermediate form.
    pub fn from_json(value: &Value) -> FieldValue {
        match value {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Number(n) => n.as_f64().map_or(FieldValue::Absent, FieldValue::Number),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                FieldValue::Absent
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Textual view of the value. Integral numbers render without a
    /// fractional part (`1000`, not `1000.0`).
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Absent => None,
            FieldValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            FieldValue::Number(n) => Some(Cow::Owned(n.to_string())),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Text)
    }
}

/// One untyped input row before validation.
///
/// Fields that were never supplied read back as [`FieldValue::Absent`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    fields: BTreeMap<Field, FieldValue>,
}

static ABSENT: FieldValue = FieldValue::Absent;

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &FieldValue {
        self.fields.get(&field).unwrap_or(&ABSENT)
    }

    /// Sets a field. A later value for the same field replaces the earlier one.
    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
        self.fields.insert(field, value.into());
    }

    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Number of fields carrying a value.
    pub fn len(&self) -> usize {
        self.fields.values().filter(|v| !v.is_absent()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a record from one element of a JSON `records` array.
    ///
    /// Non-object elements produce an empty record, which the sanitizer then
    /// rejects for missing required fields.
    pub fn from_json_value(value: &Value) -> RawRecord {
        let mut record = RawRecord::new();
        if let Value::Object(map) = value {
            for (key, value) in map {
                if let Some(field) = Field::from_name(key) {
                    record.set(field, FieldValue::from_json(value));
                }
            }
        }
        record
    }
}

/// The canonical, validated business record for a supply agreement.
///
/// Serialized with the camelCase wire names the dashboard consumes; dates are
/// emitted as `YYYY-MM-DD` strings and missing optionals as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Provisional identifier. Either the uploaded numeric id or
    /// `clock_millis + batch offset`.
    pub id: i64,
    pub name: String,
    pub supplier: String,
    #[serde(rename = "type")]
    pub contract_type: String,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub contract_value: Option<f64>,
    pub duration_months: Option<f64>,
    pub area: Option<String>,
    pub reminder: Option<String>,
    pub internal_contact: Option<String>,
    /// Unique within one batch report.
    pub reference_number: String,
    pub notes: Option<String>,
    pub last_reviewed: NaiveDate,
}

/// A row-level failure. `row` uses spreadsheet numbering (header is row 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub message: String,
}

/// Aggregate result of processing one upload.
///
/// `inserted + failed` always equals the number of submitted rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub inserted: usize,
    pub failed: usize,
    pub errors: Vec<ValidationError>,
    pub records: Vec<Contract>,
}

impl BatchReport {
    /// Total number of rows this report accounts for.
    pub fn total(&self) -> usize {
        self.inserted + self.failed
    }
}

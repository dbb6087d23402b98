//! Downloadable CSV template for bulk uploads.
//!
//! The header is derived from [`Field::TEMPLATE_COLUMNS`], so the template
//! always matches what the CSV adapter accepts.
use std::io;

use csv::{Terminator, WriterBuilder};

use crate::types::Field;

/// Suggested file name for the template download.
pub const TEMPLATE_FILE_NAME: &str = "contract-upload-template.csv";

const SAMPLE_ROW: [&str; 13] = [
    "Sample Contract",
    "Supplier Ltd",
    "food",
    "2024-12-31",
    "active",
    "50000",
    "12",
    "North Region",
    "1-month",
    "Alex Smith",
    "REF-123",
    "Optional notes go here",
    "2024-01-15",
];

/// Renders the header line and one sample row, newline-terminated.
///
/// ```rust
/// use ingest::{parse_csv, template_csv, Field, IngestConfig};
///
/// let text = template_csv(b',').unwrap();
/// assert!(text.starts_with("name,supplier,type,endDate,"));
///
/// let rows = parse_csv(&text, &IngestConfig::default()).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get(Field::ReferenceNumber).as_text().as_deref(), Some("REF-123"));
/// ```
pub fn template_csv(delimiter: u8) -> io::Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(Field::TEMPLATE_COLUMNS.map(Field::as_str))?;
    writer.write_record(SAMPLE_ROW)?;

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lists_template_columns_in_order() {
        let text = template_csv(b',').unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "name,supplier,type,endDate,status,contractValue,durationMonths,area,reminder,internalContact,referenceNumber,notes,lastReviewed"
        );
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn sample_row_fits_header() {
        assert_eq!(SAMPLE_ROW.len(), Field::TEMPLATE_COLUMNS.len());
    }

    #[test]
    fn cells_containing_the_delimiter_are_quoted() {
        let text = template_csv(b' ').unwrap();
        assert!(text.contains("\"Sample Contract\""));
        assert!(text.contains("\"North Region\""));
        assert!(text.contains(" food "));
    }

    #[test]
    fn semicolon_template_parses_back_with_the_same_delimiter() {
        let text = template_csv(b';').unwrap();
        assert!(text.starts_with("name;supplier;type;"));
        assert!(!text.contains('\r'));

        let cfg = crate::IngestConfig {
            delimiter: ';',
            ..Default::default()
        };
        let rows = crate::parse_csv(&text, &cfg).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get(Field::Notes).as_text().as_deref(),
            Some("Optional notes go here")
        );
    }
}

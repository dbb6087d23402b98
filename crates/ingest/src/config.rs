//! Configuration types for the ingest pipeline.
//!
//! [`IngestConfig`] controls how uploads are tokenized and how missing values
//! are defaulted. It is cheap to clone and deserializes from any serde format
//! (the server loads it as the `ingest` table of its own configuration).
//!
//! # Quick Start
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig::default();
//! config.validate().expect("defaults are valid");
//! assert_eq!(config.delimiter, ',');
//! assert_eq!(config.reference_prefix, "AUTO");
//! ```
//!
//! # Semicolon-separated exports
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig {
//!     delimiter: ';',
//!     max_records: Some(10_000),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for ingest behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Version of the configuration schema.
    ///
    /// Default: `1`
    pub version: u32,

    /// CSV field delimiter. Must be a single ASCII character other than a
    /// quote or line break.
    ///
    /// Default: `','`
    pub delimiter: char,

    /// Whether to remove non-whitespace control characters from text cells
    /// before trimming. Line breaks and tabs inside a cell are kept.
    ///
    /// Default: `true`
    pub strip_control_chars: bool,

    /// Maximum number of rows accepted in one upload. Larger uploads are
    /// rejected before any row is processed.
    ///
    /// Default: `None` (unlimited; the transport layer's byte limit applies)
    pub max_records: Option<usize>,

    /// Prefix for synthesized reference numbers (`<prefix>-<millis>-<n>`).
    ///
    /// Default: `"AUTO"`
    pub reference_prefix: String,

    /// Exclusive upper bound of the random suffix in synthesized reference
    /// numbers.
    ///
    /// Default: `10000`
    pub reference_suffix_bound: u32,

    /// Contract type used when the upload leaves `type` blank.
    ///
    /// Default: `"other"`
    pub default_type: String,

    /// Contract status used when the upload leaves `status` blank.
    ///
    /// Default: `"active"`
    pub default_status: String,
}

/// Errors that can occur when validating an [`IngestConfig`].
///
/// These are start-up problems and should stop the service before it takes
/// traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("delimiter {0:?} must be a single ASCII character other than a quote or line break")]
    InvalidDelimiter(char),

    #[error("reference_prefix must not be empty")]
    EmptyReferencePrefix,

    #[error("reference_suffix_bound must be greater than zero")]
    ZeroSuffixBound,

    #[error("{0} must not be empty")]
    EmptyDefault(&'static str),

    #[error("max_records must be greater than zero when set")]
    ZeroMaxRecords,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            delimiter: ',',
            strip_control_chars: true,
            max_records: None,
            reference_prefix: "AUTO".into(),
            reference_suffix_bound: 10_000,
            default_type: "other".into(),
            default_status: "active".into(),
        }
    }
}

impl IngestConfig {
    /// Validates internal consistency of this configuration.
    ///
    /// ```rust
    /// use ingest::{ConfigError, IngestConfig};
    ///
    /// let bad = IngestConfig { delimiter: '"', ..Default::default() };
    /// assert_eq!(bad.validate(), Err(ConfigError::InvalidDelimiter('"')));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        if self.reference_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyReferencePrefix);
        }
        if self.reference_suffix_bound == 0 {
            return Err(ConfigError::ZeroSuffixBound);
        }
        if self.default_type.trim().is_empty() {
            return Err(ConfigError::EmptyDefault("default_type"));
        }
        if self.default_status.trim().is_empty() {
            return Err(ConfigError::EmptyDefault("default_status"));
        }
        if self.max_records == Some(0) {
            return Err(ConfigError::ZeroMaxRecords);
        }
        Ok(())
    }

    /// Delimiter as the single byte the CSV reader expects.
    ///
    /// Callers should [`validate`](Self::validate) first; a non-ASCII
    /// delimiter falls back to a comma.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .unwrap_or(b',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = IngestConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.delimiter_byte(), b',');
        assert_eq!(cfg.default_type, "other");
        assert_eq!(cfg.default_status, "active");
    }

    #[test]
    fn rejects_bad_delimiters() {
        for delimiter in ['"', '\n', 'é'] {
            let cfg = IngestConfig {
                delimiter,
                ..Default::default()
            };
            assert_eq!(cfg.validate(), Err(ConfigError::InvalidDelimiter(delimiter)));
        }
    }

    #[test]
    fn rejects_empty_prefix_and_zero_bounds() {
        let cfg = IngestConfig {
            reference_prefix: "  ".into(),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyReferencePrefix));

        let cfg = IngestConfig {
            reference_suffix_bound: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSuffixBound));

        let cfg = IngestConfig {
            max_records: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxRecords));
    }

    #[test]
    fn partial_json_config_fills_defaults() {
        let cfg: IngestConfig = serde_json::from_str(r#"{"delimiter": ";"}"#).unwrap();
        assert_eq!(cfg.delimiter_byte(), b';');
        assert_eq!(cfg.reference_prefix, "AUTO");
        assert!(cfg.strip_control_chars);
    }
}

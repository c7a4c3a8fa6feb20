//! Error types for dotgrid-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dotgrid-viz operations.
///
/// Layout itself only ever fails with [`Error::InvalidRecord`] or
/// [`Error::InvalidConfig`], and always before any marker is produced.
#[derive(Error, Debug)]
pub enum Error {
    /// A record carries a count that cannot be turned into whole marker units.
    #[error("Invalid record ({category}/{group}): {reason}")]
    InvalidRecord {
        /// Category of the offending record.
        category: String,
        /// Group of the offending record.
        group: String,
        /// What is wrong with the count.
        reason: String,
    },

    /// Layout geometry or capacity is out of range.
    #[error("Invalid config field `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// YAML configuration could not be parsed.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// 1-based line of the error (0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_record(category: &str, group: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            category: category.to_string(),
            group: group.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_display() {
        let err = Error::invalid_record("Sheep", "Otago", "count -1 is negative");
        let msg = err.to_string();
        assert!(msg.contains("Sheep/Otago"));
        assert!(msg.contains("negative"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::invalid_config("row_capacity", "must be at least 1");
        assert!(err.to_string().contains("`row_capacity`"));
    }

    #[test]
    fn test_config_parse_display() {
        let err = Error::ConfigParse {
            line: 4,
            message: "bad".to_string(),
        };
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}

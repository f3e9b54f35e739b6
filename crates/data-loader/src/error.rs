//! Errors raised while reading the ratings files and the movie catalog.
//!
//! Every failure points back at the input: parse failures carry the file
//! name and 1-based line number, so a bad row in a ratings CSV can be
//! found without re-running anything.

use thiserror::Error;

/// Why a ratings file, the catalog, or a split request was rejected
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// A required CSV is missing from the data directory
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A userId, movieId or rating column did not parse
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Parsed, but not usable (e.g. a NaN rating)
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Row is missing required columns
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Bad caller input, such as a split fraction outside [0, 1]
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Result alias used across the data-loader crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_locate_the_bad_row() {
        let err = DataLoadError::ParseError {
            file: "recommendation-ratings-train.csv".to_string(),
            line: 12,
            reason: "Invalid rating: x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parse error at line 12 in recommendation-ratings-train.csv: Invalid rating: x"
        );

        let err = DataLoadError::FieldCountMismatch {
            expected: 3,
            found: 2,
            line: 4,
        };
        assert_eq!(err.to_string(), "Expected 3 fields but found 2 in line 4");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DataLoadError = io.into();
        assert!(matches!(err, DataLoadError::IoError(_)));
    }
}

//! Error types and path context for measurement operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all measurement operations
#[derive(Debug)]
pub enum MeasurementError {
    /// Failed to read or parse an object list from the filesystem
    InputLoad {
        /// Path to the input document
        path: PathBuf,
        /// Underlying JSON parsing error
        source: serde_json::Error,
    },

    /// Object records don't meet ingestion requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Delimited table could not be written
    TableWrite {
        /// Destination of the table
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying CSV writer error
        source: csv::Error,
    },
}

impl fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputLoad { path, source } => {
                write!(f, "Failed to load objects from '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::TableWrite {
                path,
                operation,
                source,
            } => {
                write!(f, "Table error during {operation} on '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for MeasurementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::TableWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for measurement results
pub type Result<T> = std::result::Result<T, MeasurementError>;

/// Attaches the path and operation to failed filesystem and table calls
pub trait WithPath<T> {
    /// Convert a failure into a [`MeasurementError`] naming the path
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| MeasurementError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl<T> WithPath<T> for std::result::Result<T, csv::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| MeasurementError::TableWrite {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for MeasurementError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MeasurementError {
    MeasurementError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> MeasurementError {
    MeasurementError::InvalidSourceData {
        reason: reason.to_string(),
    }
}

//! Error types shared across the dashboard pipeline.

use std::fmt;

/// A dataset could not be constructed or loaded.
///
/// The caller decides the fallback; the dashboard pipeline substitutes an
/// empty dataset and surfaces the message as a page warning.
#[derive(Debug, Clone)]
pub struct DataLoadError {
    message: String,
}

impl DataLoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DataLoadError {}

/// An aggregation was asked for on input it is undefined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsError {
    /// The record slice has no rows at all (argmax/argmin undefined).
    EmptyDataset,
    /// A required partition of the records matched no rows.
    EmptyPartition(&'static str),
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::EmptyDataset => write!(f, "No participant records to aggregate."),
            MetricsError::EmptyPartition(which) => {
                write!(f, "Empty partition: {which}.")
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Terminal-facing error: message plus process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<DataLoadError> for AppError {
    fn from(err: DataLoadError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl From<MetricsError> for AppError {
    fn from(err: MetricsError) -> Self {
        AppError::new(4, err.to_string())
    }
}

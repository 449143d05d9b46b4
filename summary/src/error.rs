//! Error types for aggregation.

use thiserror::Error;

/// Errors returned by the aggregation engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// No sheet in the whole input exposes the required columns.
    #[error(
        "No valid data found in the input file. Make sure it contains sheets with 'Status', 'Speed', and 'Name' columns."
    )]
    NoValidData,
}

/// Convenience alias for results with [`SummaryError`].
pub type Result<T> = std::result::Result<T, SummaryError>;

use thiserror::Error;

use crate::types::TableName;

/// Error type for table acquisition failures.
///
/// The aggregation fold itself never fails; malformed values degrade to
/// defaults instead. Errors surface only at the acquisition boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The table could not be reached or refused the fetch.
    #[error("table '{table}' is unavailable: {reason}")]
    TableUnavailable {
        /// Name of the failing table.
        table: TableName,
        /// Backend-provided failure description.
        reason: String,
    },
    /// The table answered, but its pages or counts contradict each other.
    #[error("table '{table}' returned inconsistent state: {details}")]
    TableInconsistent {
        /// Name of the failing table.
        table: TableName,
        /// What diverged, for the fetch report.
        details: String,
    },
}

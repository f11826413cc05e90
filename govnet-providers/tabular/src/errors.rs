//! Error types for the tabular loader.

use std::io;
use std::path::PathBuf;

use arrow_schema::ArrowError;
use thiserror::Error;

/// Errors raised while loading or filtering the governance tables.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TableError {
    /// A table file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A table file could not be decoded against its schema.
    #[error("failed to decode `{path}`: {source}")]
    Decode {
        /// Path of the malformed table.
        path: PathBuf,
        /// Underlying Arrow error.
        #[source]
        source: ArrowError,
    },
    /// A required column was absent from a decoded batch.
    #[error("column `{column}` is missing from `{table}`")]
    MissingColumn {
        /// Table the column belongs to.
        table: &'static str,
        /// Name of the missing column.
        column: &'static str,
    },
    /// A column decoded to an unexpected Arrow type.
    #[error("column `{column}` in `{table}` has an unexpected type")]
    InvalidColumnType {
        /// Table the column belongs to.
        table: &'static str,
        /// Name of the offending column.
        column: &'static str,
    },
    /// An outcome label was neither `Pass` nor `Fail`.
    #[error("row {row} of `{table}` has an unknown outcome `{label}`")]
    UnknownOutcome {
        /// Table the row belongs to.
        table: &'static str,
        /// Zero-based row index within the table.
        row: usize,
        /// The unrecognized label.
        label: String,
    },
    /// A balance cell did not parse as an unsigned integer.
    #[error("row {row} of `{table}` has an unparsable balance `{value}`")]
    InvalidBalance {
        /// Table the row belongs to.
        table: &'static str,
        /// Zero-based row index within the table.
        row: usize,
        /// The raw cell content.
        value: String,
    },
    /// The requested organization name does not appear in the tables.
    #[error("organization `{name}` not found")]
    UnknownOrganization {
        /// Name the caller asked for.
        name: String,
    },
    /// A window cutoff was not a `dd/mm/yyyy` date.
    #[error("`{provided}` is not a dd/mm/yyyy date: {source}")]
    InvalidDate {
        /// Raw value supplied by the caller.
        provided: String,
        /// Underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },
}

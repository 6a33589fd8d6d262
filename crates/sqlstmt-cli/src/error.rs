//! Error types for the command-line front end.

use sqlstmt_core::ParseError;

/// Errors that end a `sqlstmt` run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The SQL input could not be read.
    #[error("Cannot read {origin}: {source}")]
    Read {
        /// File path, or `<stdin>`.
        origin: String,
        source: std::io::Error,
    },

    /// The SQL input was read but is not valid for the chosen dialect.
    #[error("{origin}: {source}")]
    Parse {
        /// File path, or `<stdin>`.
        origin: String,
        source: ParseError,
    },
}

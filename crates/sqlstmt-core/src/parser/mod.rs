//! Parser façade shared by the dialect crates.

mod error;
mod options;

pub use error::ParseError;
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};

use crate::ast::Stmt;
use crate::dialect::DialectKind;

/// One entry point per dialect: text in, statements or a positioned error out.
///
/// Implementations hold no per-call state; every call builds its own grammar
/// engine and dispatcher, so a parser can be shared across threads.
pub trait SqlParser: Send + Sync {
    /// The dialect stamped on every node this parser produces.
    fn dialect(&self) -> DialectKind;

    /// Parses `sql` into one statement per top-level statement slot.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntax error; no partial result is kept.
    fn parse_with(&self, sql: &str, options: &ParseOptions) -> Result<Vec<Stmt>, ParseError>;

    /// Parses `sql` with default options.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntax error.
    fn parse(&self, sql: &str) -> Result<Vec<Stmt>, ParseError> {
        self.parse_with(sql, &ParseOptions::default())
    }
}

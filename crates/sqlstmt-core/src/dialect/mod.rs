//! SQL Dialect support.
//!
//! Each grammar has its own lexical conventions and reserved words. The
//! [`Dialect`] trait carries those switches into the shared [`crate::Lexer`]
//! and grammar cursor; the dialect crates provide the implementations.

use core::fmt;

use serde::Serialize;

use crate::lexer::Keyword;

/// Identifies which grammar produced a tree or AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    MySql,
    PostgreSql,
}

impl DialectKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the tag stamped on every node parsed with this dialect.
    fn kind(&self) -> DialectKind;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Whether `"..."` is a string literal rather than a quoted identifier.
    fn double_quoted_strings(&self) -> bool {
        false
    }

    /// Whether backslash escapes are honoured inside string literals.
    fn backslash_escapes(&self) -> bool {
        false
    }

    /// Whether `#` starts a line comment.
    fn hash_comments(&self) -> bool {
        false
    }

    /// Whether `--` must be followed by whitespace to start a comment.
    fn dash_comment_needs_space(&self) -> bool {
        false
    }

    /// Whether block comments nest.
    fn nested_block_comments(&self) -> bool {
        false
    }

    /// Whether `$tag$...$tag$` strings and `$1` parameters are recognized.
    fn dollar_quoting(&self) -> bool {
        false
    }

    /// Whether `@name` and `@@name` lex as variables.
    fn at_variables(&self) -> bool {
        false
    }

    /// Whether arbitrary operator character runs lex as a single operator.
    fn custom_operators(&self) -> bool {
        false
    }

    /// Returns true when `keyword` can never be used as a bare identifier.
    fn is_reserved(&self, keyword: Keyword) -> bool;
}

//! # sqlstmt-pgsql
//!
//! PostgreSQL grammar engine and dispatcher for `sqlstmt-core`.
//!
//! # How PostgreSQL differs from other dialects
//!
//! - **Strings and quoting**: `"..."` always quotes an identifier. Strings
//!   come as `'...'`, `E'...'` with escapes, and dollar-quoted
//!   `$tag$...$tag$` bodies.
//! - **Operators**: `::` casts, and any run of operator characters is an
//!   operator of its own (`@>`, `->>`, `~*`, ...).
//! - **Set operations**: `INTERSECT` binds tighter than `UNION` and
//!   `EXCEPT`; all three become union parts carrying their keyword text.
//! - **Limits**: `LIMIT ALL`, `OFFSET n ROWS` and the standard
//!   `FETCH FIRST n ROWS ONLY` form.
//! - **`UPDATE ... FROM` and `DELETE ... USING`** join extra tables; they
//!   are listed after the target table.
//! - **`RETURNING`** and **`ON CONFLICT`** are kept as raw clauses.
//!
//! ## Example
//!
//! ```rust
//! use sqlstmt_core::{SqlParser, Stmt};
//! use sqlstmt_pgsql::PgParser;
//!
//! let stmts = PgParser::new()
//!     .parse("SELECT a FROM t1 INTERSECT SELECT b FROM t2")
//!     .unwrap();
//! let Stmt::UnionSelect(union) = &stmts[0] else { panic!() };
//! assert_eq!(union.union_parts[0].union_type, "INTERSECT");
//! ```

mod dialect;
mod dispatch;
pub mod grammar;

pub use dialect::PostgresDialect;
pub use dispatch::PgDispatcher;
pub use grammar::{parse_tree, PgRule};

use sqlstmt_core::{DialectKind, ParseError, ParseOptions, SqlParser, Stmt};
use tracing::debug;

/// PostgreSQL statement parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct PgParser;

impl PgParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlParser for PgParser {
    fn dialect(&self) -> DialectKind {
        DialectKind::PostgreSql
    }

    fn parse_with(&self, sql: &str, options: &ParseOptions) -> Result<Vec<Stmt>, ParseError> {
        let tree = parse_tree(sql, options).inspect_err(|err| {
            debug!(
                line = err.line,
                column = err.column,
                message = %err.message,
                "postgresql parse failed"
            );
        })?;
        let stmts = PgDispatcher::new(sql, options.baseline_line).dispatch(&tree);
        debug!(statements = stmts.len(), "postgresql parse finished");
        Ok(stmts)
    }
}

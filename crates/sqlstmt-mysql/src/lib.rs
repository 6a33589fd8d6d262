//! # sqlstmt-mysql
//!
//! MySQL grammar engine and dispatcher for `sqlstmt-core`.
//!
//! # How MySQL differs from other dialects
//!
//! - **Identifier quoting**: backticks quote identifiers; `"..."` is a
//!   string literal unless `ANSI_QUOTES` is set.
//! - **Comments**: `#` starts a line comment, and `--` only does when it is
//!   followed by whitespace.
//! - **Variables**: `@user_var` and `@@system_var` are expression atoms;
//!   `@v := expr` assigns inline.
//! - **`LIMIT offset, count`**: the two-argument form puts the offset first.
//! - **Multi-table `UPDATE`/`DELETE`**: both statements accept a join list;
//!   `DELETE t1 FROM t1 JOIN t2 ...` names its targets separately.
//! - **`INSERT ... ON DUPLICATE KEY UPDATE`** and `INSERT ... SET`.
//!
//! ## Example
//!
//! ```rust
//! use sqlstmt_core::{SqlParser, Stmt};
//! use sqlstmt_mysql::MySqlParser;
//!
//! let stmts = MySqlParser::new()
//!     .parse("SELECT a FROM t1 UNION ALL SELECT b FROM t2")
//!     .unwrap();
//! let Stmt::UnionSelect(union) = &stmts[0] else { panic!() };
//! assert_eq!(union.union_parts[0].union_type, "UNION ALL");
//! ```

mod dialect;
mod dispatch;
pub mod grammar;

pub use dialect::MySqlDialect;
pub use dispatch::MySqlDispatcher;
pub use grammar::{parse_tree, MySqlRule};

use sqlstmt_core::{DialectKind, ParseError, ParseOptions, SqlParser, Stmt};
use tracing::debug;

/// MySQL statement parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlParser;

impl MySqlParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlParser for MySqlParser {
    fn dialect(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn parse_with(&self, sql: &str, options: &ParseOptions) -> Result<Vec<Stmt>, ParseError> {
        let tree = parse_tree(sql, options).inspect_err(|err| {
            debug!(
                line = err.line,
                column = err.column,
                message = %err.message,
                "mysql parse failed"
            );
        })?;
        let stmts = MySqlDispatcher::new(sql, options.baseline_line).dispatch(&tree);
        debug!(statements = stmts.len(), "mysql parse finished");
        Ok(stmts)
    }
}

//! MySQL dialect implementation.

use sqlstmt_core::dialect::{Dialect, DialectKind};
use sqlstmt_core::Keyword;

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn double_quoted_strings(&self) -> bool {
        true // unless ANSI_QUOTES is set
    }

    fn backslash_escapes(&self) -> bool {
        true
    }

    fn hash_comments(&self) -> bool {
        true
    }

    fn dash_comment_needs_space(&self) -> bool {
        true
    }

    fn at_variables(&self) -> bool {
        true
    }

    fn is_reserved(&self, keyword: Keyword) -> bool {
        !matches!(
            keyword,
            Keyword::Offset
                | Keyword::Full
                | Keyword::Value
                | Keyword::Truncate
                | Keyword::End
                | Keyword::Any
                | Keyword::Some
                | Keyword::First
                | Keyword::Next
                | Keyword::Only
                | Keyword::Returning
                | Keyword::Begin
                | Keyword::Commit
                | Keyword::Rollback
                | Keyword::Start
                | Keyword::Savepoint
                | Keyword::Over
                | Keyword::Array
                | Keyword::Ilike
                | Keyword::Similar
                | Keyword::User
                | Keyword::Do
                | Keyword::Handler
                | Keyword::Merge
                | Keyword::Copy
                | Keyword::Comment
                | Keyword::Conflict
                | Keyword::Vacuum
                | Keyword::Reset
                | Keyword::Prepare
                | Keyword::Execute
                | Keyword::Deallocate
                | Keyword::Escape
                | Keyword::Repair
                | Keyword::Cast
        )
    }
}

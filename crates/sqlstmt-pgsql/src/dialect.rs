//! PostgreSQL dialect implementation.

use sqlstmt_core::dialect::{Dialect, DialectKind};
use sqlstmt_core::Keyword;

/// PostgreSQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::PostgreSql
    }

    fn nested_block_comments(&self) -> bool {
        true
    }

    fn dollar_quoting(&self) -> bool {
        true
    }

    fn custom_operators(&self) -> bool {
        true
    }

    /// Reserved and type/function-name keywords, plus `SET`, `INSERT`,
    /// `UPDATE` and `DELETE`, which would otherwise read as table aliases.
    fn is_reserved(&self, keyword: Keyword) -> bool {
        matches!(
            keyword,
            Keyword::Select
                | Keyword::From
                | Keyword::Where
                | Keyword::Group
                | Keyword::Having
                | Keyword::Order
                | Keyword::Limit
                | Keyword::Offset
                | Keyword::Fetch
                | Keyword::Only
                | Keyword::Distinct
                | Keyword::All
                | Keyword::As
                | Keyword::Asc
                | Keyword::Desc
                | Keyword::With
                | Keyword::Window
                | Keyword::For
                | Keyword::Join
                | Keyword::Inner
                | Keyword::Cross
                | Keyword::Left
                | Keyword::Right
                | Keyword::Full
                | Keyword::Outer
                | Keyword::Natural
                | Keyword::Lateral
                | Keyword::On
                | Keyword::Using
                | Keyword::Union
                | Keyword::Intersect
                | Keyword::Except
                | Keyword::Into
                | Keyword::Values
                | Keyword::Insert
                | Keyword::Update
                | Keyword::Delete
                | Keyword::Set
                | Keyword::Returning
                | Keyword::Default
                | Keyword::Create
                | Keyword::Table
                | Keyword::Grant
                | Keyword::Check
                | Keyword::Analyze
                | Keyword::Do
                | Keyword::Not
                | Keyword::And
                | Keyword::Or
                | Keyword::In
                | Keyword::Is
                | Keyword::Null
                | Keyword::True
                | Keyword::False
                | Keyword::Exists
                | Keyword::Between
                | Keyword::Like
                | Keyword::Ilike
                | Keyword::Similar
                | Keyword::Collate
                | Keyword::Binary
                | Keyword::Interval
                | Keyword::Case
                | Keyword::When
                | Keyword::Then
                | Keyword::Else
                | Keyword::End
                | Keyword::Cast
                | Keyword::Row
                | Keyword::Array
                | Keyword::Any
                | Keyword::Some
                | Keyword::To
                | Keyword::User
        )
    }
}

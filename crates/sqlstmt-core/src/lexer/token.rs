//! Token types for the SQL lexer.

use serde::Serialize;

use super::Span;

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// SQL keywords recognized by the lexer.
        ///
        /// Whether a keyword may also serve as an identifier is decided per
        /// dialect by [`crate::dialect::Dialect::is_reserved`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Parses a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the canonical upper-case spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    // Queries
    Select => "SELECT",
    From => "FROM",
    Where => "WHERE",
    Group => "GROUP",
    By => "BY",
    Having => "HAVING",
    Order => "ORDER",
    Limit => "LIMIT",
    Offset => "OFFSET",
    Fetch => "FETCH",
    First => "FIRST",
    Next => "NEXT",
    Only => "ONLY",
    Distinct => "DISTINCT",
    Distinctrow => "DISTINCTROW",
    All => "ALL",
    As => "AS",
    Asc => "ASC",
    Desc => "DESC",
    With => "WITH",
    Recursive => "RECURSIVE",
    Window => "WINDOW",
    Over => "OVER",
    For => "FOR",
    Of => "OF",
    Lock => "LOCK",
    Unlock => "UNLOCK",

    // Joins and set operations
    Join => "JOIN",
    Inner => "INNER",
    Cross => "CROSS",
    Left => "LEFT",
    Right => "RIGHT",
    Full => "FULL",
    Outer => "OUTER",
    Natural => "NATURAL",
    StraightJoin => "STRAIGHT_JOIN",
    Lateral => "LATERAL",
    On => "ON",
    Using => "USING",
    Union => "UNION",
    Intersect => "INTERSECT",
    Except => "EXCEPT",

    // Data manipulation
    Insert => "INSERT",
    Into => "INTO",
    Values => "VALUES",
    Value => "VALUE",
    Replace => "REPLACE",
    Update => "UPDATE",
    Set => "SET",
    Delete => "DELETE",
    Returning => "RETURNING",
    Default => "DEFAULT",
    Conflict => "CONFLICT",
    LowPriority => "LOW_PRIORITY",
    HighPriority => "HIGH_PRIORITY",
    Delayed => "DELAYED",
    Ignore => "IGNORE",
    Partition => "PARTITION",
    Call => "CALL",
    Do => "DO",
    Handler => "HANDLER",
    Load => "LOAD",
    Merge => "MERGE",
    Copy => "COPY",

    // Data definition
    Create => "CREATE",
    Alter => "ALTER",
    Drop => "DROP",
    Truncate => "TRUNCATE",
    Rename => "RENAME",
    Comment => "COMMENT",
    Database => "DATABASE",
    Schema => "SCHEMA",
    Table => "TABLE",
    Index => "INDEX",
    Key => "KEY",
    Force => "FORCE",

    // Expressions
    Not => "NOT",
    And => "AND",
    Or => "OR",
    Xor => "XOR",
    In => "IN",
    Is => "IS",
    Null => "NULL",
    True => "TRUE",
    False => "FALSE",
    Exists => "EXISTS",
    Between => "BETWEEN",
    Like => "LIKE",
    Ilike => "ILIKE",
    Similar => "SIMILAR",
    Regexp => "REGEXP",
    Rlike => "RLIKE",
    Escape => "ESCAPE",
    Collate => "COLLATE",
    Binary => "BINARY",
    Interval => "INTERVAL",
    Case => "CASE",
    When => "WHEN",
    Then => "THEN",
    Else => "ELSE",
    End => "END",
    Cast => "CAST",
    Row => "ROW",
    Rows => "ROWS",
    Array => "ARRAY",
    Div => "DIV",
    Mod => "MOD",
    Any => "ANY",
    Some => "SOME",
    If => "IF",
    To => "TO",
    User => "USER",

    // Administration, utility and transactions
    Show => "SHOW",
    Describe => "DESCRIBE",
    Explain => "EXPLAIN",
    Use => "USE",
    Grant => "GRANT",
    Revoke => "REVOKE",
    Kill => "KILL",
    Analyze => "ANALYZE",
    Optimize => "OPTIMIZE",
    Repair => "REPAIR",
    Check => "CHECK",
    Vacuum => "VACUUM",
    Reset => "RESET",
    Begin => "BEGIN",
    Start => "START",
    Commit => "COMMIT",
    Rollback => "ROLLBACK",
    Savepoint => "SAVEPOINT",
    Release => "RELEASE",
    Prepare => "PREPARE",
    Execute => "EXECUTE",
    Deallocate => "DEALLOCATE",
}

/// Token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals. Their raw text is recovered from the token span.
    /// Integer literal.
    Integer,
    /// Decimal or exponent literal.
    Float,
    /// String literal in any of the dialect's quoting forms.
    String,
    /// Hexadecimal literal (`0x1F`, `X'1F'`).
    HexString,
    /// Bit literal (`0b01`, `B'01'`).
    BitString,

    // Names
    /// Unquoted identifier.
    Identifier(String),
    /// Quoted identifier, unescaped.
    QuotedIdentifier(String),
    /// Keyword.
    Keyword(Keyword),
    /// User or system variable (`@x`, `@@session.x`).
    Variable,
    /// Positional parameter (`$1`).
    Parameter,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Eq,
    NullSafeEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Concat,
    LogicalAnd,
    BitAnd,
    BitOr,
    BitNot,
    Bang,
    LeftShift,
    RightShift,
    Arrow,
    LongArrow,
    Assign,
    /// A free-form operator the dialect allows but has no dedicated kind.
    Operator,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Dot,
    Colon,
    DoubleColon,
    Question,

    // Special
    Eof,
    Error(String),
}

impl TokenKind {
    /// Describes the token kind in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        let text = match self {
            Self::Integer | Self::Float => "number",
            Self::String | Self::HexString | Self::BitString => "string",
            Self::Identifier(_) | Self::QuotedIdentifier(_) => "identifier",
            Self::Keyword(kw) => return kw.as_str().to_string(),
            Self::Variable => "variable",
            Self::Parameter => "parameter",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Caret => "'^'",
            Self::Eq => "'='",
            Self::NullSafeEq => "'<=>'",
            Self::NotEq => "'<>'",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Concat => "'||'",
            Self::LogicalAnd => "'&&'",
            Self::BitAnd => "'&'",
            Self::BitOr => "'|'",
            Self::BitNot => "'~'",
            Self::Bang => "'!'",
            Self::LeftShift => "'<<'",
            Self::RightShift => "'>>'",
            Self::Arrow => "'->'",
            Self::LongArrow => "'->>'",
            Self::Assign => "':='",
            Self::Operator => "operator",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Colon => "':'",
            Self::DoubleColon => "'::'",
            Self::Question => "'?'",
            Self::Eof => "end of input",
            Self::Error(_) => "invalid token",
        };
        text.to_string()
    }
}

/// A token with its kind and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Returns the raw source text of the token.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }
}

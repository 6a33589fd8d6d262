//! # sqlstmt-core
//!
//! Shared building blocks for turning SQL text into a statement-level AST.
//!
//! The pipeline is the same for every dialect:
//!
//! 1. The [`Lexer`] tokenizes the text under a [`Dialect`]'s lexical rules.
//! 2. A dialect grammar drives a [`grammar::TokenCursor`] and records a
//!    concrete syntax tree ([`cst::SyntaxTree`]).
//! 3. A dialect dispatcher walks the tree with a [`dispatch::DispatchContext`]
//!    and emits [`ast::Stmt`] values.
//!
//! The dialect crates (`sqlstmt-mysql`, `sqlstmt-pgsql`) implement
//! [`SqlParser`], the single "text in, statements or error out" entry point.
//!
//! ## Example
//!
//! ```ignore
//! use sqlstmt_core::SqlParser;
//! use sqlstmt_mysql::MySqlParser;
//!
//! let stmts = MySqlParser::new().parse("SELECT a, b FROM t WHERE id = 1")?;
//! assert_eq!(stmts.len(), 1);
//! ```

pub mod ast;
pub mod cst;
pub mod dialect;
pub mod dispatch;
pub mod grammar;
pub mod lexer;
pub mod parser;

pub use ast::Stmt;
pub use dialect::{Dialect, DialectKind};
pub use lexer::{Keyword, Lexer, LineIndex, Position, Span, Token, TokenKind};
pub use parser::{ParseError, ParseOptions, SqlParser, DEFAULT_MAX_DEPTH};

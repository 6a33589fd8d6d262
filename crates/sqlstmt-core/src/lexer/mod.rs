//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream
//! of tokens, plus the span and position types shared by every later stage.

mod span;
mod token;
mod tokenizer;

pub use span::{LineIndex, Position, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;

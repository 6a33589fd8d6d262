//! SQL Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::dialect::Dialect;

/// Characters PostgreSQL allows in free-form operators.
const OPERATOR_CHARS: &str = "+-*/<>=~!@#%^&|`?";

/// Characters that let a PostgreSQL operator end in `+` or `-`.
const OPERATOR_TAIL_CHARS: &str = "~!@#%^&|`?";

/// A lexer that tokenizes SQL input according to a [`Dialect`].
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// Lexical switches of the grammar being parsed.
    dialect: &'a dyn Dialect,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub fn new(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            input,
            dialect,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    /// Returns the character `n` positions ahead without advancing.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Returns true if the remaining input starts with `prefix`.
    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    /// Skips whitespace and comments.
    ///
    /// Returns an error token for an unterminated block comment.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.starts_with("--") && self.dash_comment_starts() {
                self.skip_line();
                continue;
            }

            if self.peek() == Some('#') && self.dialect.hash_comments() {
                self.skip_line();
                continue;
            }

            if self.starts_with("/*") {
                self.start = self.pos;
                self.advance();
                self.advance();
                let mut depth = 1usize;
                loop {
                    if self.starts_with("*/") {
                        self.advance();
                        self.advance();
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    } else if self.starts_with("/*") && self.dialect.nested_block_comments() {
                        self.advance();
                        self.advance();
                        depth += 1;
                    } else if self.advance().is_none() {
                        return Some(self.error("Unterminated block comment"));
                    }
                }
                continue;
            }

            return None;
        }
    }

    fn dash_comment_starts(&self) -> bool {
        !self.dialect.dash_comment_needs_space()
            || self.peek_nth(2).map_or(true, char::is_whitespace)
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Creates a span from start to current position.
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(text.to_string()))
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    // Doubled quote is an escaped quote
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return self.error("Unterminated quoted identifier"),
            }
        }

        if value.is_empty() {
            return self.error("Empty quoted identifier");
        }
        self.make_token(TokenKind::QuotedIdentifier(value))
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('0') {
            match self.peek_next() {
                Some('x' | 'X') if self.peek_nth(2).is_some_and(|c| c.is_ascii_hexdigit()) => {
                    self.advance();
                    self.advance();
                    while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.advance();
                    }
                    return self.make_token(TokenKind::HexString);
                }
                Some('b' | 'B') if self.peek_nth(2).is_some_and(|c| c == '0' || c == '1') => {
                    self.advance();
                    self.advance();
                    while self.peek().is_some_and(|c| c == '0' || c == '1') {
                        self.advance();
                    }
                    return self.make_token(TokenKind::BitString);
                }
                _ => {}
            }
        }

        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Check for decimal point
        if self.peek() == Some('.') && !self.peek_next().is_some_and(char::is_alphabetic) {
            is_float = true;
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Check for exponent
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let signed = self.peek_next().is_some_and(|c| c == '+' || c == '-');
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_nth(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.advance(); // consume e/E
                if signed {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        if is_float {
            self.make_token(TokenKind::Float)
        } else {
            self.make_token(TokenKind::Integer)
        }
    }

    /// Scans a string literal whose opening quote is the current character.
    fn scan_string(&mut self, quote: char, backslash_escapes: bool) -> Token {
        self.advance(); // consume opening quote

        loop {
            match self.advance() {
                Some('\\') if backslash_escapes => {
                    if self.advance().is_none() {
                        return self.error("Unterminated string literal");
                    }
                }
                Some(c) if c == quote => {
                    // Doubled quote is an escaped quote
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {}
                None => return self.error("Unterminated string literal"),
            }
        }

        self.make_token(TokenKind::String)
    }

    /// Scans a prefixed literal such as `X'1F'`, `B'01'`, `N'text'` or `E'text'`.
    fn scan_prefixed_string(&mut self, prefix_len: usize, kind: &TokenKind) -> Token {
        for _ in 0..prefix_len {
            self.advance();
        }
        let escapes = self.dialect.backslash_escapes()
            || self.input[self.start..self.pos].eq_ignore_ascii_case("e");
        let token = self.scan_string('\'', escapes);
        if matches!(token.kind, TokenKind::Error(_)) {
            token
        } else {
            self.make_token(kind.clone())
        }
    }

    /// Returns the literal kind for an identifier-looking prefix directly followed by a quote.
    fn string_prefix(&self) -> Option<(usize, TokenKind)> {
        let c = self.peek()?;
        match (c, self.peek_next()) {
            ('x' | 'X', Some('\'')) => Some((1, TokenKind::HexString)),
            ('b' | 'B', Some('\'')) => Some((1, TokenKind::BitString)),
            ('n' | 'N', Some('\'')) => Some((1, TokenKind::String)),
            ('e' | 'E', Some('\'')) if self.dialect.dollar_quoting() => {
                Some((1, TokenKind::String))
            }
            ('u' | 'U', Some('&'))
                if self.dialect.dollar_quoting() && self.peek_nth(2) == Some('\'') =>
            {
                Some((2, TokenKind::String))
            }
            _ => None,
        }
    }

    /// Scans `$1` parameters and `$tag$...$tag$` strings.
    fn scan_dollar(&mut self) -> Token {
        self.advance(); // consume $
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            return self.make_token(TokenKind::Parameter);
        }

        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        if self.peek() != Some('$') {
            return self.error("Unexpected character: $");
        }
        self.advance();
        let delimiter = self.input[self.start..self.pos].to_string();
        match self.input[self.pos..].find(&delimiter) {
            Some(end) => {
                self.pos += end + delimiter.len();
                self.make_token(TokenKind::String)
            }
            None => {
                self.pos = self.input.len();
                self.error("Unterminated dollar-quoted string")
            }
        }
    }

    /// Scans `@name`, `@'quoted name'` and `@@scope.name` variables.
    fn scan_variable(&mut self) -> Token {
        self.advance(); // consume @
        if self.peek() == Some('@') {
            self.advance();
        }
        match self.peek() {
            Some(quote @ ('\'' | '"' | '`')) => {
                let token = self.scan_string(quote, true);
                if matches!(token.kind, TokenKind::Error(_)) {
                    return token;
                }
            }
            Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => {
                while self
                    .peek()
                    .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'))
                {
                    self.advance();
                }
            }
            _ => return self.error("Expected variable name after '@'"),
        }
        self.make_token(TokenKind::Variable)
    }

    /// Scans a free-form operator following PostgreSQL's lexing rules.
    fn scan_custom_operator(&mut self) -> Token {
        let rest = &self.input[self.pos..];
        let mut len = rest
            .char_indices()
            .find(|(_, c)| !OPERATOR_CHARS.contains(*c))
            .map_or(rest.len(), |(i, _)| i);

        // A comment start ends the operator
        for marker in ["--", "/*"] {
            if let Some(at) = rest[..len].find(marker) {
                if at > 0 {
                    len = len.min(at);
                }
            }
        }

        let mut text = &rest[..len];
        if text.len() > 1 && !text.contains(|c: char| OPERATOR_TAIL_CHARS.contains(c)) {
            while text.len() > 1 && (text.ends_with('+') || text.ends_with('-')) {
                text = &text[..text.len() - 1];
            }
        }
        self.pos += text.len().max(1);

        let kind = match text {
            "+" => TokenKind::Plus,
            "-" => TokenKind::Minus,
            "*" => TokenKind::Star,
            "/" => TokenKind::Slash,
            "%" => TokenKind::Percent,
            "^" => TokenKind::Caret,
            "=" => TokenKind::Eq,
            "<>" | "!=" => TokenKind::NotEq,
            "<" => TokenKind::Lt,
            "<=" => TokenKind::LtEq,
            ">" => TokenKind::Gt,
            ">=" => TokenKind::GtEq,
            "||" => TokenKind::Concat,
            "&&" => TokenKind::LogicalAnd,
            "&" => TokenKind::BitAnd,
            "|" => TokenKind::BitOr,
            "~" => TokenKind::BitNot,
            "!" => TokenKind::Bang,
            "<<" => TokenKind::LeftShift,
            ">>" => TokenKind::RightShift,
            "->" => TokenKind::Arrow,
            "->>" => TokenKind::LongArrow,
            "?" => TokenKind::Question,
            _ => TokenKind::Operator,
        };
        self.make_token(kind)
    }

    /// Scans one of the fixed operators of grammars without free-form operators.
    fn scan_fixed_operator(&mut self) -> Token {
        const OPERATORS: &[(&str, TokenKind)] = &[
            ("<=>", TokenKind::NullSafeEq),
            ("->>", TokenKind::LongArrow),
            ("<=", TokenKind::LtEq),
            ("<>", TokenKind::NotEq),
            ("<<", TokenKind::LeftShift),
            (">=", TokenKind::GtEq),
            (">>", TokenKind::RightShift),
            ("!=", TokenKind::NotEq),
            ("->", TokenKind::Arrow),
            ("&&", TokenKind::LogicalAnd),
            ("||", TokenKind::Concat),
            ("<", TokenKind::Lt),
            (">", TokenKind::Gt),
            ("=", TokenKind::Eq),
            ("!", TokenKind::Bang),
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("*", TokenKind::Star),
            ("/", TokenKind::Slash),
            ("%", TokenKind::Percent),
            ("^", TokenKind::Caret),
            ("&", TokenKind::BitAnd),
            ("|", TokenKind::BitOr),
            ("~", TokenKind::BitNot),
            ("?", TokenKind::Question),
        ];
        for (text, kind) in OPERATORS {
            if self.starts_with(text) {
                self.pos += text.len();
                return self.make_token(kind.clone());
            }
        }
        let c = self.advance().unwrap_or_default();
        self.error(format!("Unexpected character: {c}"))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_whitespace_and_comments() {
            return error;
        }
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            // Single-character tokens
            '(' | ')' | '[' | ']' | ',' | ';' => {
                self.advance();
                self.make_token(match c {
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    '[' => TokenKind::LeftBracket,
                    ']' => TokenKind::RightBracket,
                    ',' => TokenKind::Comma,
                    _ => TokenKind::Semicolon,
                })
            }

            '.' if self.peek_next().is_some_and(|c| c.is_ascii_digit())
                && !self.follows_name() =>
            {
                self.scan_number()
            }
            '.' => {
                self.advance();
                self.make_token(TokenKind::Dot)
            }

            ':' => {
                self.advance();
                if self.peek() == Some(':') {
                    self.advance();
                    self.make_token(TokenKind::DoubleColon)
                } else if self.peek() == Some('=') && self.dialect.at_variables() {
                    self.advance();
                    self.make_token(TokenKind::Assign)
                } else {
                    self.make_token(TokenKind::Colon)
                }
            }

            // String literals
            '\'' => self.scan_string('\'', self.dialect.backslash_escapes()),
            '"' if self.dialect.double_quoted_strings() => {
                self.scan_string('"', self.dialect.backslash_escapes())
            }

            // Quoted identifiers
            '"' | '`' if c == self.dialect.identifier_quote() || c == '"' => {
                self.scan_quoted_identifier(c)
            }

            '$' if self.dialect.dollar_quoting() => self.scan_dollar(),
            '@' if self.dialect.at_variables() => self.scan_variable(),

            // Numbers
            c if c.is_ascii_digit() => self.scan_number(),

            // Identifiers, keywords and prefixed literals
            c if c.is_alphabetic() || c == '_' => {
                if let Some((prefix_len, kind)) = self.string_prefix() {
                    self.scan_prefixed_string(prefix_len, &kind)
                } else {
                    self.scan_identifier()
                }
            }

            c if OPERATOR_CHARS.contains(c) => {
                if self.dialect.custom_operators() {
                    self.scan_custom_operator()
                } else {
                    self.scan_fixed_operator()
                }
            }

            _ => {
                self.advance();
                self.error(format!("Unexpected character: {c}"))
            }
        }
    }

    /// Returns true if the character before the current position ends a name.
    fn follows_name(&self) -> bool {
        self.input[..self.pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '"' | '`' | ')'))
    }

    /// Tokenizes the entire input and returns all tokens, ending with `Eof`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

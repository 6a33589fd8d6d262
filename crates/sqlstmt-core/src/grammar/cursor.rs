//! Token cursor shared by the dialect grammar engines.

use crate::cst::{Checkpoint, Rule, SyntaxTree, TreeBuilder};
use crate::dialect::Dialect;
use crate::lexer::{Keyword, Lexer, LineIndex, Token, TokenKind};
use crate::parser::{ParseError, ParseOptions};

/// Walks a fully lexed token buffer while recording a concrete syntax tree.
///
/// Grammar engines drive it with `start`/`bump`/`finish`; lookahead never
/// consumes, so alternatives are chosen before any node is opened.
pub struct TokenCursor<'a, R> {
    source: &'a str,
    dialect: &'a dyn Dialect,
    lines: LineIndex<'a>,
    /// Never empty: the lexer always ends the buffer with `Eof`.
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
    builder: TreeBuilder<R>,
}

impl<'a, R: Rule> TokenCursor<'a, R> {
    /// Lexes `source` and positions the cursor on the first token.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error of the input.
    pub fn new(
        source: &'a str,
        dialect: &'a dyn Dialect,
        options: &ParseOptions,
    ) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source, dialect).tokenize();
        let lines = LineIndex::new(source, options.baseline_line);

        if let Some(token) = tokens.iter().find(|t| matches!(t.kind, TokenKind::Error(_))) {
            let message = match &token.kind {
                TokenKind::Error(message) => message.clone(),
                _ => String::new(),
            };
            return Err(ParseError::new(
                message,
                token.span,
                lines.position(token.span.start),
            ));
        }

        Ok(Self {
            source,
            dialect,
            lines,
            tokens,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
            builder: TreeBuilder::new(),
        })
    }

    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// The token `n` positions ahead; clamps to `Eof`.
    #[must_use]
    pub fn nth(&self, n: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + n).min(last)]
    }

    #[must_use]
    pub fn current(&self) -> &Token {
        self.nth(0)
    }

    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[must_use]
    pub fn nth_kind(&self, n: usize) -> &TokenKind {
        &self.nth(n).kind
    }

    /// Raw text of the token `n` positions ahead.
    #[must_use]
    pub fn nth_text(&self, n: usize) -> &'a str {
        self.nth(n).span.slice(self.source)
    }

    /// Checks if the current token matches the given kind.
    #[must_use]
    pub fn at(&self, kind: &TokenKind) -> bool {
        self.nth_at(0, kind)
    }

    /// Checks the kind of the token `n` positions ahead, ignoring payloads.
    #[must_use]
    pub fn nth_at(&self, n: usize, kind: &TokenKind) -> bool {
        core::mem::discriminant(self.nth_kind(n)) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    #[must_use]
    pub fn at_keyword(&self, keyword: Keyword) -> bool {
        self.nth_keyword(0, keyword)
    }

    #[must_use]
    pub fn nth_keyword(&self, n: usize, keyword: Keyword) -> bool {
        self.nth(n).is(keyword)
    }

    #[must_use]
    pub fn at_any_keyword(&self, keywords: &[Keyword]) -> bool {
        self.current()
            .as_keyword()
            .is_some_and(|kw| keywords.contains(&kw))
    }

    /// Checks for a contextual word: an unquoted identifier or keyword
    /// spelled `word` (case-insensitive).
    #[must_use]
    pub fn nth_word(&self, n: usize, word: &str) -> bool {
        match self.nth_kind(n) {
            TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                self.nth_text(n).eq_ignore_ascii_case(word)
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn at_word(&self, word: &str) -> bool {
        self.nth_word(0, word)
    }

    #[must_use]
    pub fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// True at `;` or end of input.
    #[must_use]
    pub fn at_statement_end(&self) -> bool {
        matches!(self.kind(), TokenKind::Semicolon | TokenKind::Eof)
    }

    /// True if the token `n` positions ahead can be used as an identifier:
    /// a bare or quoted name, or a keyword the dialect does not reserve.
    #[must_use]
    pub fn nth_is_identifier(&self, n: usize) -> bool {
        match self.nth_kind(n) {
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => true,
            TokenKind::Keyword(kw) => !self.dialect.is_reserved(*kw),
            _ => false,
        }
    }

    #[must_use]
    pub fn at_identifier(&self) -> bool {
        self.nth_is_identifier(0)
    }

    /// Moves the current token into the open production.
    pub fn bump(&mut self) {
        if self.at_eof() {
            return;
        }
        let token = self.tokens[self.pos].clone();
        self.builder.token(token);
        self.pos += 1;
    }

    /// Bumps `n` tokens.
    pub fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    /// Bumps the current token if it has the given kind.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Bumps the current token if it is the given keyword.
    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.at_keyword(keyword) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Bumps the current token if it is the given contextual word.
    pub fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    ///
    /// # Errors
    ///
    /// Returns an "unexpected token" error positioned at the current token.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    /// Expects the current token to be the given keyword.
    ///
    /// # Errors
    ///
    /// Returns an "unexpected token" error positioned at the current token.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects an identifier and bumps it.
    ///
    /// # Errors
    ///
    /// Returns an "unexpected token" error positioned at the current token.
    pub fn expect_identifier(&mut self) -> Result<(), ParseError> {
        if self.at_identifier() {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    pub fn start(&mut self, rule: R) {
        self.builder.start_node(rule);
    }

    pub fn start_at(&mut self, checkpoint: Checkpoint, rule: R) {
        self.builder.start_node_at(checkpoint, rule);
    }

    pub fn finish(&mut self) {
        self.builder.finish_node();
    }

    /// Enters one level of nesting.
    ///
    /// # Errors
    ///
    /// Fails once the configured maximum depth is exceeded.
    pub fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error_here(format!(
                "Statement is nested too deeply (limit {})",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Leaves one level of nesting.
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// An error with `message` positioned at the current token.
    #[must_use]
    pub fn error_here(&self, message: impl Into<String>) -> ParseError {
        let span = self.current().span;
        ParseError::new(message, span, self.lines.position(span.start))
    }

    /// An "unexpected token" error positioned at the current token.
    #[must_use]
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        let position = self.lines.position(token.span.start);
        if token.is_eof() {
            ParseError::unexpected_eof(expected, token.span, position)
        } else {
            ParseError::unexpected(expected, token.text(self.source), token.span, position)
        }
    }

    /// Lookahead index of the `)` closing the `(` at lookahead `n`.
    #[must_use]
    pub fn matching_paren(&self, n: usize) -> Option<usize> {
        if !self.nth_at(n, &TokenKind::LeftParen) {
            return None;
        }
        let mut depth = 0usize;
        let mut i = n;
        loop {
            match self.nth_kind(i) {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
            i += 1;
        }
    }

    /// Lookahead index just past the `END` closing the `CASE` at lookahead `n`.
    #[must_use]
    pub fn case_extent(&self, n: usize) -> Option<usize> {
        if !self.nth_keyword(n, Keyword::Case) {
            return None;
        }
        let mut open = 0usize;
        let mut i = n;
        loop {
            match self.nth_kind(i) {
                TokenKind::Keyword(Keyword::Case) => open += 1,
                TokenKind::Keyword(Keyword::End) => {
                    open -= 1;
                    if open == 0 {
                        return Some(i + 1);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
            i += 1;
        }
    }

    /// True if the token `n` positions ahead can follow a `.` in a dotted
    /// name. Reserved words are allowed there.
    #[must_use]
    pub fn nth_is_name_part(&self, n: usize) -> bool {
        matches!(
            self.nth_kind(n),
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) | TokenKind::Keyword(_)
        )
    }

    /// Decides whether the `(` at lookahead `n` opens a subquery.
    ///
    /// The innermost of any run of opening parentheses must be followed by
    /// one of `starts`; each enclosing level only counts as a query when the
    /// inner group is followed by `)` or a keyword that continues a query
    /// (`UNION`, `ORDER`, `LIMIT`, ...), so `((SELECT 1) + 1)` is not one.
    #[must_use]
    pub fn nth_is_subquery(&self, n: usize, starts: &[Keyword]) -> bool {
        let mut first = n;
        while self.nth_at(first, &TokenKind::LeftParen) {
            first += 1;
        }
        let starts_query = self
            .nth(first)
            .as_keyword()
            .is_some_and(|kw| starts.contains(&kw));
        if first == n || !starts_query {
            return false;
        }
        if first - n > self.max_depth {
            // Deeper than the parser will accept; let the depth check report it.
            return true;
        }
        let mut level = first - 1;
        while level > n {
            let Some(close) = self.matching_paren(level) else {
                return false;
            };
            let continues = match self.nth_kind(close + 1) {
                TokenKind::RightParen => true,
                TokenKind::Keyword(kw) => matches!(
                    kw,
                    Keyword::Union
                        | Keyword::Except
                        | Keyword::Intersect
                        | Keyword::Order
                        | Keyword::Limit
                        | Keyword::Offset
                        | Keyword::Fetch
                        | Keyword::For
                        | Keyword::Lock
                ),
                _ => false,
            };
            if !continues {
                return false;
            }
            level -= 1;
        }
        true
    }

    /// Scans ahead to the end of the current statement or enclosing
    /// parenthesis and reports whether any token at paren depth 0
    /// satisfies `pred`.
    #[must_use]
    pub fn top_level_any(&self, pred: impl Fn(&Token) -> bool) -> bool {
        let mut depth = 0usize;
        for token in &self.tokens[self.pos..] {
            match token.kind {
                TokenKind::LeftParen | TokenKind::LeftBracket => depth += 1,
                TokenKind::RightParen | TokenKind::RightBracket => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                TokenKind::Semicolon | TokenKind::Eof if depth == 0 => return false,
                TokenKind::Eof => return false,
                _ if depth == 0 && pred(token) => return true,
                _ => {}
            }
        }
        false
    }

    /// Bumps a parenthesized (or bracketed) group including its delimiters.
    ///
    /// # Errors
    ///
    /// Fails if the group is not closed before the end of input.
    pub fn bump_group(&mut self) -> Result<(), ParseError> {
        let opener = self.kind().clone();
        if !matches!(opener, TokenKind::LeftParen | TokenKind::LeftBracket) {
            return Err(self.unexpected("'('"));
        }
        self.bump();
        self.bump_balanced_until(|_| false)?;
        let closer = if opener == TokenKind::LeftParen {
            TokenKind::RightParen
        } else {
            TokenKind::RightBracket
        };
        self.expect(&closer)
    }

    /// Bumps tokens, keeping parentheses and brackets balanced, until
    /// `stop` holds at depth 0, the statement ends, or an unmatched
    /// closing delimiter is reached (which is left unconsumed).
    ///
    /// # Errors
    ///
    /// Fails on mismatched delimiters or a group left open at end of input.
    pub fn bump_balanced_until(&mut self, stop: impl Fn(&Self) -> bool) -> Result<(), ParseError> {
        let mut closers: Vec<TokenKind> = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Eof => {
                    return match closers.last() {
                        Some(closer) => Err(self.unexpected(&closer.describe())),
                        None => Ok(()),
                    };
                }
                TokenKind::LeftParen => closers.push(TokenKind::RightParen),
                TokenKind::LeftBracket => closers.push(TokenKind::RightBracket),
                kind @ (TokenKind::RightParen | TokenKind::RightBracket) => match closers.last() {
                    None => return Ok(()),
                    Some(closer) if closer == kind => {
                        closers.pop();
                    }
                    Some(closer) => return Err(self.unexpected(&closer.describe())),
                },
                TokenKind::Semicolon if closers.is_empty() => return Ok(()),
                _ if closers.is_empty() && stop(self) => return Ok(()),
                _ => {}
            }
            self.bump();
        }
    }

    /// Bumps a `CASE ... END` run, honouring nested `CASE` and parentheses.
    ///
    /// # Errors
    ///
    /// Fails if the expression is not closed before the statement ends.
    pub fn bump_case(&mut self) -> Result<(), ParseError> {
        self.expect_keyword(Keyword::Case)?;
        let mut open = 1usize;
        loop {
            self.bump_balanced_until(|p| {
                p.at_keyword(Keyword::Case) || p.at_keyword(Keyword::End)
            })?;
            if self.at_keyword(Keyword::Case) {
                open += 1;
            } else if self.at_keyword(Keyword::End) {
                open -= 1;
                if open == 0 {
                    self.bump();
                    return Ok(());
                }
            } else {
                return Err(self.unexpected("END"));
            }
            self.bump();
        }
    }

    /// Finishes the tree.
    ///
    /// # Errors
    ///
    /// Fails if tokens remain or no production was recorded.
    pub fn into_tree(mut self) -> Result<SyntaxTree<R>, ParseError> {
        if !self.at_eof() {
            return Err(self.unexpected("end of input"));
        }
        self.builder.set_offset(self.source.len());
        let error = self.error_here("Empty syntax tree");
        let root = self.builder.finish().ok_or(error)?;
        Ok(SyntaxTree::new(root, self.tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectKind;
    use crate::lexer::Span;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestRule {
        Root,
        Group,
    }

    impl Rule for TestRule {
        fn name(self) -> &'static str {
            match self {
                Self::Root => "Root",
                Self::Group => "Group",
            }
        }
    }

    struct Plain;

    impl Dialect for Plain {
        fn name(&self) -> &'static str {
            "plain"
        }

        fn kind(&self) -> DialectKind {
            DialectKind::MySql
        }

        fn is_reserved(&self, keyword: Keyword) -> bool {
            !matches!(keyword, Keyword::Offset)
        }
    }

    fn cursor<'a>(sql: &'a str, dialect: &'a Plain) -> TokenCursor<'a, TestRule> {
        TokenCursor::new(sql, dialect, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_lexical_error_reported_first() {
        let err = TokenCursor::<TestRule>::new("SELECT 'open", &Plain, &ParseOptions::default())
            .err()
            .unwrap();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 8);
    }

    #[test]
    fn test_identifier_excludes_reserved_keywords() {
        let p = cursor("offset select name", &Plain);
        assert!(p.nth_is_identifier(0));
        assert!(!p.nth_is_identifier(1));
        assert!(p.nth_is_identifier(2));
        assert!(p.nth_word(2, "NAME"));
    }

    #[test]
    fn test_subquery_detection() {
        let p = cursor("((SELECT 1) UNION (SELECT 2))", &Plain);
        assert!(p.nth_is_subquery(0, &[Keyword::Select]));
        let p = cursor("((SELECT 1) + 1)", &Plain);
        assert!(!p.nth_is_subquery(0, &[Keyword::Select]));
        assert!(p.nth_is_subquery(1, &[Keyword::Select]));
        let p = cursor("(a, b)", &Plain);
        assert!(!p.nth_is_subquery(0, &[Keyword::Select]));
    }

    #[test]
    fn test_top_level_any_skips_groups() {
        let p = cursor("SELECT (SELECT 1 UNION SELECT 2)", &Plain);
        assert!(!p.top_level_any(|t| t.is(Keyword::Union)));
        let p = cursor("SELECT 1 UNION SELECT 2", &Plain);
        assert!(p.top_level_any(|t| t.is(Keyword::Union)));
    }

    #[test]
    fn test_case_extent() {
        let p = cursor("CASE WHEN a THEN CASE b WHEN 1 THEN 2 END END x", &Plain);
        assert_eq!(p.case_extent(0), Some(12));
    }

    #[test]
    fn test_records_tree() {
        let mut p = cursor("(a) ;", &Plain);
        p.start(TestRule::Root);
        p.start(TestRule::Group);
        p.bump_group().unwrap();
        p.finish();
        assert!(p.at_statement_end());
        p.bump();
        p.finish();
        let tree = p.into_tree().unwrap();
        assert_eq!(tree.root().span(), Span::new(0, 5));
        assert_eq!(tree.root().child(TestRule::Group).unwrap().span(), Span::new(0, 3));
    }

    #[test]
    fn test_depth_bound() {
        let dialect = Plain;
        let options = ParseOptions::default().with_max_depth(2);
        let mut p: TokenCursor<'_, TestRule> = TokenCursor::new("x", &dialect, &options).unwrap();
        assert!(p.enter().is_ok());
        assert!(p.enter().is_ok());
        let err = p.enter().unwrap_err();
        assert!(err.message.contains("nested too deeply"));
    }

    #[test]
    fn test_unbalanced_group_is_an_error() {
        let mut p = cursor("(a (b)", &Plain);
        p.start(TestRule::Root);
        let err = p.bump_group().unwrap_err();
        assert!(err.message.starts_with("Unexpected end of input"));
    }
}

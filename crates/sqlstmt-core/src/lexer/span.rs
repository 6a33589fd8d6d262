//! Source location tracking for tokens, tree nodes and AST nodes.

use serde::Serialize;

/// Represents a span in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a zero-width span at `offset`.
    #[must_use]
    pub const fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merges two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Returns the slice of `source` covered by this span, or `""` when the
    /// span does not fall on character boundaries of `source`.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or_default()
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// A resolved location: line and column for humans, byte offset for slicing.
///
/// Lines start at the baseline the text was parsed with (1 by default).
/// Columns are 1-based and count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Maps byte offsets to line/column positions.
///
/// Line starts and multi-byte characters are indexed once, so every lookup
/// is a pair of binary searches regardless of line length.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
    /// Start offset of each multi-byte character, with the running total of
    /// continuation bytes up to and including it.
    wide_chars: Vec<(usize, usize)>,
    baseline: usize,
}

impl<'a> LineIndex<'a> {
    /// Indexes `source`, numbering its first line `baseline`.
    #[must_use]
    pub fn new(source: &'a str, baseline: usize) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        let mut extra = 0;
        let wide_chars = source
            .char_indices()
            .filter_map(|(i, c)| {
                let len = c.len_utf8();
                (len > 1).then(|| {
                    extra += len - 1;
                    (i, extra)
                })
            })
            .collect();
        Self {
            source,
            line_starts,
            wide_chars,
            baseline: baseline.max(1),
        }
    }

    /// The line number assigned to the first line of the source.
    #[must_use]
    pub const fn baseline(&self) -> usize {
        self.baseline
    }

    /// Resolves a byte offset. Offsets past the end resolve to the end.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        let column = (offset - line_start)
            - (self.continuation_bytes_before(offset) - self.continuation_bytes_before(line_start))
            + 1;
        Position::new(self.baseline + line, column, offset)
    }

    fn continuation_bytes_before(&self, offset: usize) -> usize {
        let n = self.wide_chars.partition_point(|&(start, _)| start < offset);
        n.checked_sub(1).map_or(0, |last| self.wide_chars[last].1)
    }

    /// Resolves both ends of a span.
    #[must_use]
    pub fn span_positions(&self, span: Span) -> (Position, Position) {
        (self.position(span.start), self.position(span.end))
    }
}

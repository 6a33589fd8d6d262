//! Per-call parse configuration.

/// Nesting bound applied when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Options passed to a single parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Line number of the first line of the input (at least 1).
    ///
    /// Used when the SQL is a fragment of a larger document; every reported
    /// line, in errors and AST positions alike, is offset by it.
    pub baseline_line: usize,
    /// Maximum nesting of expressions, subqueries and parentheses.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            baseline_line: 1,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_baseline_line(mut self, line: usize) -> Self {
        self.baseline_line = line.max(1);
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

//! Support for the hand-written dialect grammars.
//!
//! Each dialect crate drives a [`TokenCursor`] with a recursive-descent
//! parser: lookahead picks the alternative, then the matched production is
//! recorded in the concrete tree with `start`, `bump` and `finish`.

mod cursor;

pub use cursor::TokenCursor;

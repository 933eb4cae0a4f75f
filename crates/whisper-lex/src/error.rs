//! Lexical error kinds.

use thiserror::Error;

/// A lexical error, carrying the line on which it was detected.
///
/// There is no column/byte-span tracking here (see `whisper-sem`'s
/// non-goal on source positions in diagnostics) — a line number is
/// enough for a front-end error message and costs nothing to keep.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting on line {line}")]
    UnterminatedString { line: u32 },

    #[error("unexpected character '{ch}' on line {line}")]
    UnexpectedChar { ch: char, line: u32 },
}

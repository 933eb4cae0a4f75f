//! Diagnostic severity levels.
//!
//! This compiler has no warning category (spec.md section 7): every
//! diagnostic is an [`Level::Error`] that halts compilation. `Note` and
//! `Help` exist only as secondary lines attached to an error, the way
//! rustc attaches notes/help to a primary diagnostic.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// A fatal error. The only primary severity this compiler emits.
    Error,
    /// Additional context attached to an error.
    Note,
    /// An actionable suggestion attached to an error.
    Help,
}

impl Level {
    #[inline]
    pub const fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Note => "note",
            Level::Help => "help",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

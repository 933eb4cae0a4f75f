//! Diagnostic codes for categorizing compiler errors.
//!
//! There is no warning category (see spec.md section 7): every
//! diagnostic this compiler emits is fatal, so only `E`-prefixed codes
//! exist.
//!
//! # Examples
//!
//! ```
//! use whisper_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_UNKNOWN_IDENTIFIER;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.as_str(), "E0002");
//! ```

/// A unique code identifying a diagnostic message, of the form `E{NNNN}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // One code per error kind in spec.md section 7.
    /// Unbalanced parentheses or unterminated string.
    pub const E_PARSE: Self = Self::new("E", 1);
    /// `Call`/`Var` naming no in-scope binding.
    pub const E_UNKNOWN_IDENTIFIER: Self = Self::new("E", 2);
    /// Variable reassigned to an incompatible concrete type, mismatched
    /// `If` branches, or a comparison/arithmetic op used across mixed types.
    pub const E_TYPE_CONFLICT: Self = Self::new("E", 3);
    /// The arg-checker could not infer a common type for an operation.
    pub const E_UNTYPED_OPERATION: Self = Self::new("E", 4);
    /// Wrong child count for `If`/`Def`, or a `Call` argument count mismatch.
    pub const E_ARITY: Self = Self::new("E", 5);
    /// Attempted to emit a declaration for a still-`NONE`-typed variable.
    pub const E_UNINITIALIZED_VARIABLE: Self = Self::new("E", 6);
    /// The source file could not be read (ambient CLI-layer failure;
    /// not one of spec.md section 7's core error kinds, but it shares
    /// the same fatal, single-diagnostic reporting path).
    pub const E_IO: Self = Self::new("E", 7);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_pads_to_four_digits() {
        assert_eq!(DiagnosticCode::new("E", 1).as_str(), "E0001");
        assert_eq!(DiagnosticCode::new("E", 42).as_str(), "E0042");
    }

    #[test]
    fn predefined_codes_are_distinct() {
        let codes = [
            DiagnosticCode::E_PARSE,
            DiagnosticCode::E_UNKNOWN_IDENTIFIER,
            DiagnosticCode::E_TYPE_CONFLICT,
            DiagnosticCode::E_UNTYPED_OPERATION,
            DiagnosticCode::E_ARITY,
            DiagnosticCode::E_UNINITIALIZED_VARIABLE,
            DiagnosticCode::E_IO,
        ];
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn debug_and_display_match() {
        let code = DiagnosticCode::E_ARITY;
        assert_eq!(format!("{}", code), format!("{:?}", code).trim_start_matches("DiagnosticCode(").trim_end_matches(')'));
    }
}

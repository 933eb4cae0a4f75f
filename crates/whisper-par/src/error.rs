//! Parse error kinds.

use thiserror::Error;
use whisper_ast::ArityError;
use whisper_lex::LexError;
use whisper_util::diagnostic::DiagnosticCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: &'static str, found: String },

    #[error(transparent)]
    Arity(#[from] ArityError),

    /// A `def` with no body. Treated as a parse error rather than
    /// guessed at (see the source behavior this resolves ambiguously).
    #[error("function `{name}` has no body")]
    EmptyDefBody { name: String },

    #[error("empty program")]
    EmptyProgram,
}

impl ParseError {
    /// spec.md section 7: unbalanced parentheses, an unterminated
    /// string, or any other malformed-grammar case all share the
    /// "parse error" kind, except `Arity`, which shares its code with
    /// the semantic arity errors (`If`/`Def`/`Call` arity all name the
    /// same mistake at different phases).
    pub fn code(&self) -> DiagnosticCode {
        match self {
            ParseError::Arity(_) => DiagnosticCode::E_ARITY,
            _ => DiagnosticCode::E_PARSE,
        }
    }
}

//! Diagnostic module — error reporting infrastructure.
//!
//! This compiler has no warning category and no source-span tracking
//! (spec.md section 7 and section 9): the first diagnostic reported
//! halts compilation. [`Handler`] still accumulates diagnostics the way
//! the teacher's does, so a driver can decide for itself whether to
//! stop at the first one or print several before exiting.
//!
//! # Examples
//!
//! ```
//! use whisper_util::diagnostic::{DiagnosticBuilder, DiagnosticCode};
//!
//! let diag = DiagnosticBuilder::error("unknown identifier")
//!     .code(DiagnosticCode::E_UNKNOWN_IDENTIFIER)
//!     .help("check the identifier is declared before use")
//!     .build();
//! ```

mod builder;
mod codes;
mod level;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use codes::DiagnosticCode;
pub use level::Level;

use std::cell::RefCell;

/// A diagnostic message with severity.
///
/// # Examples
///
/// ```
/// use whisper_util::diagnostic::{Diagnostic, Level};
///
/// let diag = Diagnostic::error("something went wrong");
/// assert_eq!(diag.level, Level::Error);
/// ```
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }
}

/// Collects reported diagnostics.
///
/// Every diagnostic this compiler reports is fatal, so `Handler` exists
/// to let a caller gather one before formatting and exiting rather than
/// to support the accumulate-and-continue style a warning-carrying
/// compiler would need.
///
/// # Examples
///
/// ```
/// use whisper_util::diagnostic::Handler;
///
/// let handler = Handler::new();
/// handler.build_error("unexpected token").emit(&handler);
///
/// assert!(handler.has_errors());
/// ```
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    panic_on_error: RefCell<bool>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: RefCell::new(false),
        }
    }

    /// A handler that panics as soon as an error is emitted, for tests
    /// that want to assert on the panic message rather than inspect
    /// `diagnostics()` afterward.
    pub fn new_panicking() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: RefCell::new(true),
        }
    }

    fn emit(&self, diagnostic: Diagnostic) {
        if *self.panic_on_error.borrow() {
            panic!("Diagnostic error: {}", diagnostic.message);
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.emit(diagnostic);
    }

    /// Start building an error diagnostic.
    pub fn build_error(&self, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message)
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// The first reported diagnostic, if any. Since every diagnostic is
    /// fatal, this is generally the only one a driver needs to show.
    pub fn first(&self) -> Option<Diagnostic> {
        self.diagnostics.borrow().first().cloned()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Level::Error, "test");
        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.message, "test");
    }

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("error message");
        assert_eq!(diag.level, Level::Error);
    }

    #[test]
    fn test_diagnostic_with_code() {
        let code = DiagnosticCode::E_TYPE_CONFLICT;
        let diag = Diagnostic::error("test").with_code(code);
        assert_eq!(diag.code, Some(code));
    }

    #[test]
    fn test_diagnostic_with_note() {
        let diag = Diagnostic::error("test").with_note("note 1").with_note("note 2");
        assert_eq!(diag.notes, vec!["note 1", "note 2"]);
    }

    #[test]
    fn test_diagnostic_with_help() {
        let diag = Diagnostic::error("test").with_help("help 1").with_help("help 2");
        assert_eq!(diag.helps, vec!["help 1", "help 2"]);
    }

    #[test]
    fn test_handler_new() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn test_handler_emit_diagnostic() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("test"));
        assert!(handler.has_errors());
    }

    #[test]
    fn test_handler_clear() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("test"));
        handler.clear();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn test_handler_diagnostics() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("test1"));
        handler.emit_diagnostic(Diagnostic::error("test2"));

        let diags = handler.diagnostics();
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_handler_first() {
        let handler = Handler::new();
        assert!(handler.first().is_none());
        handler.emit_diagnostic(Diagnostic::error("first error"));
        handler.emit_diagnostic(Diagnostic::error("second error"));
        assert_eq!(handler.first().unwrap().message, "first error");
    }

    #[test]
    fn test_handler_panicking() {
        let handler = Handler::new_panicking();
        let result = std::panic::catch_unwind(|| {
            handler.emit_diagnostic(Diagnostic::error("test"));
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_handler_build_error() {
        let handler = Handler::new();
        handler
            .build_error("test error")
            .code(DiagnosticCode::E_PARSE)
            .emit(&handler);

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);

        let diags = handler.diagnostics();
        assert_eq!(diags[0].code, Some(DiagnosticCode::E_PARSE));
    }

    #[test]
    fn test_handler_build_with_note_and_help() {
        let handler = Handler::new();
        handler
            .build_error("type mismatch")
            .code(DiagnosticCode::E_TYPE_CONFLICT)
            .with_note("expected `INT`")
            .with_help("reassign with a consistent type")
            .emit(&handler);

        let diags = handler.diagnostics();
        assert_eq!(diags[0].notes, vec!["expected `INT`"]);
        assert_eq!(diags[0].helps, vec!["reassign with a consistent type"]);
    }
}

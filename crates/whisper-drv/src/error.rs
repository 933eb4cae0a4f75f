//! The driver-level error type, unifying every phase's error (spec.md
//! section 7) behind one `thiserror` enum at the CLI boundary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use whisper_gen::GenError;
use whisper_par::ParseError;
use whisper_util::diagnostic::DiagnosticCode;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Gen(#[from] GenError),
}

impl CompileError {
    /// The diagnostic code printed alongside this error's message at
    /// the CLI boundary (spec.md section 7).
    pub fn code(&self) -> DiagnosticCode {
        match self {
            CompileError::Io { .. } => DiagnosticCode::E_IO,
            CompileError::Parse(e) => e.code(),
            CompileError::Gen(e) => e.code(),
        }
    }
}

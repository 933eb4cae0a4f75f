//! C emitter error kinds (spec.md section 7).

use thiserror::Error;
use whisper_mono::MonoError;
use whisper_sem::SemaError;
use whisper_util::diagnostic::DiagnosticCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error(transparent)]
    Sema(#[from] SemaError),

    #[error(transparent)]
    Mono(#[from] MonoError),
}

impl GenError {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            GenError::Sema(e) => e.code(),
            GenError::Mono(e) => e.code(),
        }
    }
}

//! Monomorphizer error kinds (spec.md section 7).
//!
//! The monomorphizer re-enters `whisper_sem::type_of` on a `Def`'s body
//! under a candidate parameter binding, so almost every failure it can
//! report is really a `SemaError` raised one level down. It adds no
//! variants of its own -- `UnknownIdentifier` (no such function) and
//! `ArityMismatch` (wrong argument count) already exist there.

use thiserror::Error;
use whisper_sem::SemaError;
use whisper_util::diagnostic::DiagnosticCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonoError {
    #[error(transparent)]
    Sema(#[from] SemaError),
}

impl MonoError {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            MonoError::Sema(e) => e.code(),
        }
    }
}

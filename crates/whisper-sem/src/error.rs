//! Semantic error kinds (spec.md section 7).

use thiserror::Error;
use whisper_ast::{Type, UnifyError};
use whisper_util::diagnostic::DiagnosticCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemaError {
    #[error("unknown identifier `{name}`")]
    UnknownIdentifier { name: String },

    #[error("variable `{name}` already has type {existing:?}, cannot reassign to {attempted:?}")]
    TypeConflict { name: String, existing: Type, attempted: Type },

    #[error("`if` branches have incompatible types: {then_type:?} vs {else_type:?}")]
    IfBranchMismatch { then_type: Type, else_type: Type },

    #[error("`if`/`while` condition must be INT, found {found:?}")]
    ConditionNotInt { found: Type },

    #[error("operation has no concrete operand type: every operand is untyped")]
    UntypedOperation,

    #[error("function `{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch { name: String, expected: usize, got: usize },

    #[error("cannot pass untyped argument to `{name}`")]
    UntypedArgument { name: String },

    #[error("variable `{name}` was never assigned a concrete type")]
    UninitializedVariable { name: String },

    #[error(transparent)]
    Unify(#[from] UnifyError),
}

impl SemaError {
    /// The diagnostic code a CLI reports alongside this error's message
    /// (spec.md section 7's error-kind taxonomy, one code per kind).
    pub fn code(&self) -> DiagnosticCode {
        match self {
            SemaError::UnknownIdentifier { .. } => DiagnosticCode::E_UNKNOWN_IDENTIFIER,
            SemaError::TypeConflict { .. }
            | SemaError::IfBranchMismatch { .. }
            | SemaError::ConditionNotInt { .. }
            | SemaError::Unify(_) => DiagnosticCode::E_TYPE_CONFLICT,
            SemaError::UntypedOperation | SemaError::UntypedArgument { .. } => {
                DiagnosticCode::E_UNTYPED_OPERATION
            }
            SemaError::ArityMismatch { .. } => DiagnosticCode::E_ARITY,
            SemaError::UninitializedVariable { .. } => DiagnosticCode::E_UNINITIALIZED_VARIABLE,
        }
    }
}

#[cfg(test)]
mod code_tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_its_spec_section_7_code() {
        assert_eq!(
            SemaError::UnknownIdentifier { name: "x".into() }.code(),
            DiagnosticCode::E_UNKNOWN_IDENTIFIER
        );
        assert_eq!(SemaError::UntypedOperation.code(), DiagnosticCode::E_UNTYPED_OPERATION);
        assert_eq!(
            SemaError::ArityMismatch { name: "f".into(), expected: 1, got: 0 }.code(),
            DiagnosticCode::E_ARITY
        );
        assert_eq!(
            SemaError::UninitializedVariable { name: "x".into() }.code(),
            DiagnosticCode::E_UNINITIALIZED_VARIABLE
        );
    }
}

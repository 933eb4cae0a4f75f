//! whisper-sem - The semantic middle end: scope tree, variable tables,
//! and bidirectional type inference (spec.md sections 3, 4.D, 4.E).
//!
//! This crate deliberately does not know about monomorphization or C
//! emission: `Expr::Call` is resolved through the [`CallResolver`] trait
//! so `whisper-mono` can depend on this crate (to re-enter `type_of` on a
//! cloned parameter binding) without a cycle back the other way.

pub mod error;
pub mod infer;
pub mod scope;

#[cfg(test)]
mod edge_cases;

pub use error::SemaError;
pub use infer::{ensure_concrete_operands, type_of, CallResolver};
pub use scope::{Monomorphization, Scope, ScopeId, ScopeTree, ScopeVariable, READS_BUF_LEN};

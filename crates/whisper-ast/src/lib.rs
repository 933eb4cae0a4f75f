//! whisper-ast - The type lattice and AST grammar shared by every
//! compiler phase downstream of the parser.
//!
//! This crate is deliberately inert: it has no notion of scopes,
//! inference, or emission — those live in `whisper-sem`, `whisper-mono`,
//! and `whisper-gen` respectively. It exists so those three crates (and
//! `whisper-par`, which builds these nodes) share one grammar rather
//! than each defining their own.

pub mod expr;
pub mod types;

pub use expr::{ArityError, Expr};
pub use types::{Type, UnifyError};

//! whisper-mono - Monomorphization of user-defined functions (spec.md
//! section 4.F).
//!
//! Implements `whisper_sem::CallResolver` so the type inferencer can
//! resolve `Call` nodes without depending back on this crate. Owns no
//! cache of its own -- every monomorphization is cached on its
//! `Def`-scope in the `ScopeTree`, keyed by parameter-type tuple.

pub mod error;
pub mod monomorphizer;

pub use error::MonoError;
pub use monomorphizer::{CallSite, Monomorphizer};

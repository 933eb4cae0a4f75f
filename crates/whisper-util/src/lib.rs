//! whisper-util - Core utilities shared by every compiler phase.
//!
//! Foundation types used throughout the Whisper-to-C compiler: a string
//! interner ([`symbol`]), a typed index vector ([`index_vec`]), and the
//! diagnostic types used to report semantic errors ([`diagnostic`]).
//!
//! The compiler does not track source positions (see the spec's
//! Non-goals), so unlike a typical compiler utility crate there is no
//! `Span` type here -- diagnostics carry a message and nothing else.

pub mod diagnostic;
pub mod index_vec;
pub mod symbol;

pub use diagnostic::{Diagnostic, Level};
pub use index_vec::{Idx, IndexVec};
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;

/// Defines a typed index newtype and its [`Idx`] impl in one line.
///
/// ```
/// use whisper_util::define_idx;
/// use whisper_util::Idx;
///
/// define_idx!(ScopeId);
/// let id = ScopeId::from_usize(3);
/// assert_eq!(id.index(), 3);
/// ```
#[macro_export]
macro_rules! define_idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize);
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

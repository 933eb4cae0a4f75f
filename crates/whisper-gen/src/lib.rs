//! whisper-gen - The C emitter (spec.md section 4.G): turns a typed AST
//! plus its scope tree into one portable C translation unit.

pub mod emitter;
pub mod error;
pub mod format;
pub mod skeleton;

pub use emitter::Emitter;
pub use error::GenError;

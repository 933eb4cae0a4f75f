//! Driver configuration (spec.md section 6, ambient CLI layer).

use std::path::PathBuf;

/// What the driver should print on success.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum EmitType {
    /// The parsed, pre-monomorphization AST, pretty-printed.
    Ast,
    /// The emitted C translation unit. The default.
    C,
}

impl Default for EmitType {
    fn default() -> Self {
        EmitType::C
    }
}

/// Everything a [`crate::Session`] needs to compile one source file.
#[derive(Clone, Debug)]
pub struct Config {
    pub path: PathBuf,
    pub emit: EmitType,
    pub verbose: bool,
}

impl Config {
    pub fn new(path: PathBuf) -> Self {
        Self { path, emit: EmitType::default(), verbose: false }
    }
}

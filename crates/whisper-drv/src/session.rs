//! The `Session` object: runs one source file through the five
//! compilation phases (spec.md section 2) and hands back the requested
//! artifact, modeled on the teacher's `faxc_drv::Session::compile`.

use std::fs;

use whisper_gen::Emitter;
use whisper_par::Parser;
use whisper_sem::ScopeTree;
use whisper_util::Symbol;

use crate::config::{Config, EmitType};
use crate::error::CompileError;

pub struct Session {
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs read -> lex -> parse -> (analyze -> monomorphize -> emit),
    /// stopping after parsing when `--emit ast` was requested.
    pub fn compile(&self) -> Result<String, CompileError> {
        log::debug!("reading {}", self.config.path.display());
        let source = fs::read_to_string(&self.config.path)
            .map_err(|source| CompileError::Io { path: self.config.path.clone(), source })?;

        log::debug!("lexing and parsing");
        let ast = Parser::parse_source(&source)?;

        if self.config.emit == EmitType::Ast {
            log::trace!("emit=ast, skipping analysis/monomorphization/emission");
            return Ok(format!("{:#?}", ast));
        }

        log::debug!("building scope tree, running inference, monomorphizing, emitting C");
        let mut tree = ScopeTree::new(Symbol::intern("main"));
        let c = Emitter::new().compile_program(&mut tree, &ast)?;
        log::trace!("emitted {} bytes of C", c.len());
        Ok(c)
    }
}

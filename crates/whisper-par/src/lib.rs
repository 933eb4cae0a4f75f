//! whisper-par - Syntactic analyzer for Whisper source text.
//!
//! Turns a flat [`whisper_lex::Token`] stream into the single
//! [`whisper_ast::Expr`] tree the rest of the pipeline compiles. There is
//! no separate concrete-syntax-tree stage and no error recovery: Whisper's
//! grammar is small enough that a form either parses or the compilation
//! fails on it, matching the fail-fast policy spec.md section 7 describes.
//!
//! # Grammar
//!
//! A program is one or more top-level forms, collected into one
//! `Expr::Seq`. A form is an atom (an integer, a string, or a bare
//! identifier, which parses as a variable reference) or a parenthesized
//! `(head args...)` list. The head identifier selects one of the fixed
//! control/operator forms (`def`, `set`, `seq`, `if`, `while`, `print`,
//! `readi`, `reads`, `add`, `sub`, `mul`, `div`, `mod`, `neg`, `lt`, `le`,
//! `ge`, `gt`, `eq`, `ne`, `and`, `or`, `not`); anything else is a call to
//! a user-defined function.
//!
//! # Examples
//!
//! ```
//! use whisper_par::parse;
//!
//! let ast = parse("(print (add 1 2))").unwrap();
//! println!("{:?}", ast);
//! ```

pub mod error;
pub mod parser;

#[cfg(test)]
mod edge_cases;

pub use error::ParseError;
pub use parser::Parser;
use whisper_ast::Expr;

/// Parses a whole Whisper source string into its AST.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::parse_source(source)
}

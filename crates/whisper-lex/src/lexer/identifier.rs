//! Identifier lexing.
//!
//! Whisper has no reserved keywords at the lexer level — `if`, `def`,
//! `add`, and ordinary variable names are all just identifiers here.
//! The parser decides what an identifier means from its position.

use crate::token::Token;
use crate::Lexer;
use whisper_util::Symbol;

impl<'a> Lexer<'a> {
    /// An identifier starts with a letter or `_`, followed by any run
    /// of letters, digits, or `_`.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while {
            let c = self.cursor.current_char();
            c == '_' || c.is_alphanumeric()
        } {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        Token::Ident(Symbol::intern(text))
    }
}

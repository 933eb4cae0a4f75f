//! String literal lexing.
//!
//! Whisper strings have no escape sequences — the content is whatever
//! appears between the quotes, verbatim. An unterminated string (EOF or
//! a bare newline before the closing `"`) is a lexical error.

use crate::error::LexError;
use crate::token::Token;
use crate::Lexer;
use whisper_util::Symbol;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_string(&mut self) -> Result<Token, LexError> {
        let start_line = self.cursor.line();
        self.cursor.advance();

        let content_start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                return Err(LexError::UnterminatedString { line: start_line });
            }
            if self.cursor.current_char() == '"' {
                let content = self.cursor.slice_from(content_start).to_string();
                self.cursor.advance();
                return Ok(Token::Str(Symbol::intern(&content)));
            }
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_simple_string() {
        let mut lexer = Lexer::new("\"hello\"");
        assert_eq!(lexer.next_token().unwrap(), Token::Str(Symbol::intern("hello")));
    }

    #[test]
    fn lexes_empty_string() {
        let mut lexer = Lexer::new("\"\"");
        assert_eq!(lexer.next_token().unwrap(), Token::Str(Symbol::intern("")));
    }

    #[test]
    fn backslash_is_literal_not_an_escape() {
        let mut lexer = Lexer::new("\"a\\nb\"");
        assert_eq!(lexer.next_token().unwrap(), Token::Str(Symbol::intern("a\\nb")));
    }

    #[test]
    fn unterminated_at_eof_is_an_error() {
        let mut lexer = Lexer::new("\"hello");
        assert_eq!(lexer.next_token().unwrap_err(), LexError::UnterminatedString { line: 1 });
    }

    #[test]
    fn unterminated_at_newline_is_an_error() {
        let mut lexer = Lexer::new("\"hello\nworld\"");
        assert!(matches!(
            lexer.next_token().unwrap_err(),
            LexError::UnterminatedString { .. }
        ));
    }
}

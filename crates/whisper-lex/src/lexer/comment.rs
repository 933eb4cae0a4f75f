//! Comment lexing.
//!
//! Whisper has one comment form: `;` extends to end of line. No block
//! comments.

use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::Token;
    use whisper_util::Symbol;

    #[test]
    fn skip_line_comment_reaches_next_token() {
        let mut lexer = crate::Lexer::new("; comment\nhello");
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Ident(Symbol::intern("hello"))
        );
    }

    #[test]
    fn comment_with_no_trailing_newline_reaches_eof() {
        let mut lexer = crate::Lexer::new("; just a comment");
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn comment_inside_a_form() {
        let tokens = crate::Lexer::new("(add 1 ; the first arg\n 2)")
            .tokenize_all()
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Ident(Symbol::intern("add")),
                Token::Int(1),
                Token::Int(2),
                Token::RParen,
                Token::Eof,
            ]
        );
    }
}

//! Edge case tests for whisper-lex.

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token};
    use whisper_util::Symbol;

    fn lex_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn edge_empty_source() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn edge_single_char_ident() {
        let t = lex_all("x");
        assert_eq!(t[0], Token::Ident(Symbol::intern("x")));
    }

    #[test]
    fn edge_long_identifier() {
        let name = "a".repeat(10_000);
        let t = lex_all(&format!("(def {} () 1)", name));
        assert!(t.contains(&Token::Ident(Symbol::intern(&name))));
    }

    #[test]
    fn edge_deeply_nested_parens() {
        let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        let t = lex_all(&source);
        assert_eq!(t.iter().filter(|tok| tok.is_lparen()).count(), 100);
        assert_eq!(t.iter().filter(|tok| tok.is_rparen()).count(), 100);
    }

    #[test]
    fn edge_consecutive_strings() {
        let t = lex_all("\"a\"\"b\"");
        assert_eq!(
            t,
            vec![Token::Str(Symbol::intern("a")), Token::Str(Symbol::intern("b"))]
        );
    }

    #[test]
    fn edge_comment_only_program() {
        assert!(lex_all("; nothing but a comment").is_empty());
    }

    #[test]
    fn edge_min_and_large_integers() {
        let t = lex_all("-9223372036854775808 9223372036854775807");
        assert_eq!(t, vec![Token::Int(i64::MIN), Token::Int(i64::MAX)]);
    }

    #[test]
    fn edge_whitespace_variety() {
        let t = lex_all("(add\t1\n2\r\n)");
        assert_eq!(t.len(), 5);
    }
}

// PROPERTY-BASED TESTS

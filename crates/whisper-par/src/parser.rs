//! Recursive-descent parser building `whisper_ast::Expr` from a token
//! stream.
//!
//! There is no error recovery: the first malformed form aborts parsing
//! with a [`ParseError`], matching the fail-fast policy the rest of the
//! pipeline uses. A parenthesized form dispatches on its head
//! identifier to one of the fixed control/operator forms in the
//! grammar; anything else is parsed as a user function call.

use whisper_ast::Expr;
use whisper_lex::{Lexer, Token};
use whisper_util::Symbol;

use crate::error::ParseError;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, position: 0 }
    }

    /// Lexes and parses `source` in one step.
    pub fn parse_source(source: &str) -> Result<Expr, ParseError> {
        let tokens = Lexer::new(source).tokenize_all()?;
        Parser::new(tokens).parse()
    }

    /// Parses every top-level form into one `Seq` — the AST root the
    /// rest of the pipeline compiles.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let mut forms = Vec::new();
        while !self.at_eof() {
            forms.push(self.parse_form()?);
        }
        if forms.is_empty() {
            return Err(ParseError::EmptyProgram);
        }
        Ok(Expr::Seq(forms))
    }

    fn parse_form(&mut self) -> Result<Expr, ParseError> {
        match self.current() {
            Token::LParen => self.parse_list(),
            Token::Int(n) => {
                self.advance();
                Ok(Expr::Int(n))
            }
            Token::Str(s) => {
                self.advance();
                Ok(Expr::Str(s))
            }
            Token::Ident(name) => {
                self.advance();
                Ok(Expr::Var(name))
            }
            Token::RParen => Err(ParseError::UnexpectedToken {
                expected: "an expression",
                found: ")".to_string(),
            }),
            Token::Eof => Err(ParseError::UnexpectedEof { expected: "an expression" }),
        }
    }

    fn parse_list(&mut self) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let head = self.expect_ident("a form head")?;

        let expr = match head.as_str() {
            "def" => self.parse_def(),
            "set" => self.parse_set(),
            "seq" => self.parse_variadic_form("seq", Expr::Seq as fn(Vec<Expr>) -> Expr, Expr::non_empty),
            "print" => self.parse_variadic_form("print", Expr::Print as fn(Vec<Expr>) -> Expr, Expr::non_empty),
            "add" => self.parse_variadic_form("add", Expr::Add as fn(Vec<Expr>) -> Expr, Expr::variadic_arith),
            "sub" => self.parse_variadic_form("sub", Expr::Sub as fn(Vec<Expr>) -> Expr, Expr::variadic_arith),
            "mul" => self.parse_variadic_form("mul", Expr::Mul as fn(Vec<Expr>) -> Expr, Expr::variadic_arith),
            "div" => self.parse_variadic_form("div", Expr::Div as fn(Vec<Expr>) -> Expr, Expr::variadic_arith),
            "mod" => self.parse_variadic_form("mod", Expr::Mod as fn(Vec<Expr>) -> Expr, Expr::variadic_arith),
            "neg" => self.parse_unary(Expr::Neg),
            "not" => self.parse_unary(Expr::Not),
            "lt" => self.parse_binary(Expr::Lt),
            "le" => self.parse_binary(Expr::Le),
            "ge" => self.parse_binary(Expr::Ge),
            "gt" => self.parse_binary(Expr::Gt),
            "eq" => self.parse_binary(Expr::Eq),
            "ne" => self.parse_binary(Expr::Ne),
            "and" => self.parse_binary(Expr::And),
            "or" => self.parse_binary(Expr::Or),
            "if" => self.parse_if(),
            "while" => self.parse_while(),
            "readi" => Ok(Expr::Readi),
            "reads" => Ok(Expr::Reads),
            _ => self.parse_call(head),
        }?;

        self.expect_rparen()?;
        Ok(expr)
    }

    fn parse_def(&mut self) -> Result<Expr, ParseError> {
        let name = self.expect_ident("a function name")?;

        self.expect_lparen()?;
        let mut params = Vec::new();
        while !matches!(self.current(), Token::RParen) {
            params.push(self.expect_ident("a parameter name")?);
        }
        self.expect_rparen()?;

        if matches!(self.current(), Token::RParen) {
            return Err(ParseError::EmptyDefBody { name: name.as_str().to_string() });
        }
        let body = self.parse_form()?;

        Ok(Expr::Def(name, params, Box::new(body)))
    }

    fn parse_set(&mut self) -> Result<Expr, ParseError> {
        let name = self.expect_ident("a variable name")?;
        let rhs = self.parse_form()?;
        Ok(Expr::Set(name, Box::new(rhs)))
    }

    fn parse_variadic_form(
        &mut self,
        form: &'static str,
        build: fn(Vec<Expr>) -> Expr,
        check_arity: fn(&'static str, Vec<Expr>) -> Result<Vec<Expr>, whisper_ast::ArityError>,
    ) -> Result<Expr, ParseError> {
        let mut children = Vec::new();
        while !matches!(self.current(), Token::RParen) {
            children.push(self.parse_form()?);
        }
        Ok(build(check_arity(form, children)?))
    }

    fn parse_unary(&mut self, build: fn(Box<Expr>) -> Expr) -> Result<Expr, ParseError> {
        let operand = self.parse_form()?;
        Ok(build(Box::new(operand)))
    }

    fn parse_binary(&mut self, build: fn(Box<Expr>, Box<Expr>) -> Expr) -> Result<Expr, ParseError> {
        let lhs = self.parse_form()?;
        let rhs = self.parse_form()?;
        Ok(build(Box::new(lhs), Box::new(rhs)))
    }

    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_form()?;
        let then = self.parse_form()?;
        let else_ = self.parse_form()?;
        Ok(Expr::If(Box::new(cond), Box::new(then), Box::new(else_)))
    }

    fn parse_while(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_form()?;
        let body = self.parse_form()?;
        Ok(Expr::While(Box::new(cond), Box::new(body)))
    }

    fn parse_call(&mut self, name: Symbol) -> Result<Expr, ParseError> {
        let mut args = Vec::new();
        while !matches!(self.current(), Token::RParen) {
            args.push(self.parse_form()?);
        }
        Ok(Expr::Call(name, args))
    }

    fn current(&self) -> Token {
        self.tokens.get(self.position).copied().unwrap_or(Token::Eof)
    }

    fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.current();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        tok
    }

    fn expect_lparen(&mut self) -> Result<(), ParseError> {
        match self.advance() {
            Token::LParen => Ok(()),
            Token::Eof => Err(ParseError::UnexpectedEof { expected: "(" }),
            other => Err(ParseError::UnexpectedToken { expected: "(", found: format!("{:?}", other) }),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        match self.advance() {
            Token::RParen => Ok(()),
            Token::Eof => Err(ParseError::UnexpectedEof { expected: ")" }),
            other => Err(ParseError::UnexpectedToken { expected: ")", found: format!("{:?}", other) }),
        }
    }

    fn expect_ident(&mut self, what: &'static str) -> Result<Symbol, ParseError> {
        match self.advance() {
            Token::Ident(sym) => Ok(sym),
            Token::Eof => Err(ParseError::UnexpectedEof { expected: what }),
            other => Err(ParseError::UnexpectedToken { expected: what, found: format!("{:?}", other) }),
        }
    }
}

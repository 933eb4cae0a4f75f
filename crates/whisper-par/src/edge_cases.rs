//! Parser edge cases that the happy-path tests in `parser.rs` don't cover.

use crate::{parse, ParseError};
use whisper_ast::Expr;

#[test]
fn deeply_nested_arithmetic_parses() {
    let mut source = "1".to_string();
    for _ in 0..50 {
        source = format!("(add {} 1)", source);
    }
    let source = format!("(print {})", source);
    assert!(parse(&source).is_ok());
}

#[test]
fn negative_integer_literal_is_a_single_token() {
    let ast = parse("(print -5)").unwrap();
    match ast {
        Expr::Seq(forms) => match &forms[0] {
            Expr::Print(args) => assert_eq!(args[0], Expr::Int(-5)),
            other => panic!("expected Print, got {:?}", other),
        },
        other => panic!("expected Seq, got {:?}", other),
    }
}

#[test]
fn nullary_call_parses() {
    let ast = parse("(def f () 1) (f)").unwrap();
    match ast {
        Expr::Seq(forms) if forms.len() == 2 => match &forms[1] {
            Expr::Call(_, args) => assert!(args.is_empty()),
            other => panic!("expected Call, got {:?}", other),
        },
        other => panic!("unexpected shape: {:?}", other),
    }
}

#[test]
fn nested_if_as_an_expression_position() {
    let ast = parse("(print (if 1 2 3))").unwrap();
    match ast {
        Expr::Seq(forms) => match &forms[0] {
            Expr::Print(args) => assert!(matches!(args[0], Expr::If(..))),
            other => panic!("expected Print, got {:?}", other),
        },
        other => panic!("expected Seq, got {:?}", other),
    }
}

#[test]
fn while_requires_exactly_a_condition_and_a_body() {
    let ast = parse("(while (lt 1 2) (print 1))").unwrap();
    match ast {
        Expr::Seq(forms) => assert!(matches!(forms[0], Expr::While(..))),
        other => panic!("expected Seq, got {:?}", other),
    }
}

#[test]
fn set_with_missing_value_is_an_error() {
    assert!(parse("(set x)").is_err());
}

#[test]
fn def_with_missing_param_list_is_an_error() {
    // `name` consumed as the function name, then `(` is expected for the
    // parameter list but a bare atom follows instead.
    assert!(parse("(def f 1 2)").is_err());
}

#[test]
fn trailing_garbage_after_a_complete_form_still_parses_as_another_top_level_form() {
    assert!(parse("(print 1) (print 2)").is_ok());
}

#[test]
fn unterminated_string_surfaces_as_a_lex_error_through_parse_error() {
    let err = parse("(print \"oops)").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
}

#[test]
fn comment_only_program_is_an_empty_program_error() {
    let err = parse("; nothing here\n").unwrap_err();
    assert_eq!(err, ParseError::EmptyProgram);
}

#[test]
fn reads_and_readi_take_no_operands() {
    let ast = parse("(print (readi)) (print (reads))").unwrap();
    match ast {
        Expr::Seq(forms) if forms.len() == 2 => {
            assert!(matches!(&forms[0], Expr::Print(args) if matches!(args[0], Expr::Readi)));
            assert!(matches!(&forms[1], Expr::Print(args) if matches!(args[0], Expr::Reads)));
        }
        other => panic!("unexpected shape: {:?}", other),
    }
}

#[test]
fn deeply_nested_function_definitions_are_rejected_by_the_grammar() {
    // `def` bodies are expressions, and a nested `def` is not itself a
    // valid form in an expression position in Whisper's grammar — the
    // parser still accepts it syntactically (it is just another call
    // head), leaving arity/identifier checks to later phases.
    assert!(parse("(def outer () (def inner () 1))").is_ok());
}

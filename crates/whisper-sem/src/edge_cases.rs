//! Semantic edge cases not covered by the per-module unit tests.

use whisper_ast::{Expr, Type};
use whisper_util::Symbol;

use crate::infer::{type_of, CallResolver};
use crate::scope::{ScopeId, ScopeTree};
use crate::SemaError;

struct NoCalls;
impl CallResolver for NoCalls {
    fn resolve_call(
        &mut self,
        _tree: &mut ScopeTree,
        _scope: ScopeId,
        name: Symbol,
        _args: &[Expr],
    ) -> Result<Type, SemaError> {
        Err(SemaError::UnknownIdentifier { name: name.as_str().to_string() })
    }
}

fn fresh() -> ScopeTree {
    ScopeTree::new(Symbol::intern("main"))
}

#[test]
fn while_loop_type_is_always_int() {
    let mut tree = fresh();
    let root = tree.root;
    let expr = Expr::While(Box::new(Expr::Int(0)), Box::new(Expr::Print(vec![Expr::Int(1)])));
    assert_eq!(type_of(&expr, &mut tree, root, &mut NoCalls).unwrap(), Type::Int);
}

#[test]
fn redefining_a_function_overwrites_the_previous_scope() {
    let mut tree = fresh();
    let root = tree.root;
    let f = Symbol::intern("f");
    type_of(&Expr::Def(f, vec![], Box::new(Expr::Int(1))), &mut tree, root, &mut NoCalls).unwrap();
    let first = tree.resolve_scope(root, f).unwrap();
    type_of(&Expr::Def(f, vec![], Box::new(Expr::Int(2))), &mut tree, root, &mut NoCalls).unwrap();
    let second = tree.resolve_scope(root, f).unwrap();
    assert_ne!(first, second);
    assert!(matches!(tree.scope(second).body, Some(Expr::Int(2))));
}

#[test]
fn nested_function_variables_do_not_leak_into_an_unrelated_sibling() {
    let mut tree = fresh();
    let root = tree.root;
    let a = tree.add_child(root, Symbol::intern("a"));
    let b = tree.add_child(root, Symbol::intern("b"));
    tree.declare_var(a, Symbol::intern("secret"), Type::Int, None).unwrap();
    assert!(tree.resolve_var(b, Symbol::intern("secret")).is_none());
}

#[test]
fn a_variable_back_patched_twice_stays_monotone() {
    let mut tree = fresh();
    let root = tree.root;
    let n = Symbol::intern("n");
    tree.declare_param(root, n);
    let expr = Expr::Seq(vec![
        Expr::Add(vec![Expr::Var(n), Expr::Int(1)]),
        Expr::Add(vec![Expr::Var(n), Expr::Int(2)]),
    ]);
    assert_eq!(type_of(&expr, &mut tree, root, &mut NoCalls).unwrap(), Type::Int);
    assert_eq!(tree.resolve_var(root, n).unwrap().1.ty, Type::Int);
}

#[test]
fn empty_seq_types_as_void() {
    let mut tree = fresh();
    let root = tree.root;
    assert_eq!(type_of(&Expr::Seq(vec![]), &mut tree, root, &mut NoCalls).unwrap(), Type::Void);
}

#[test]
fn not_and_neg_accept_a_single_operand() {
    let mut tree = fresh();
    let root = tree.root;
    assert_eq!(type_of(&Expr::Neg(Box::new(Expr::Int(5))), &mut tree, root, &mut NoCalls).unwrap(), Type::Int);
    assert_eq!(type_of(&Expr::Not(Box::new(Expr::Int(0))), &mut tree, root, &mut NoCalls).unwrap(), Type::Int);
}

#[test]
fn comparison_of_two_strings_is_allowed_and_yields_int() {
    let mut tree = fresh();
    let root = tree.root;
    let expr = Expr::Eq(
        Box::new(Expr::Str(Symbol::intern("a"))),
        Box::new(Expr::Str(Symbol::intern("b"))),
    );
    assert_eq!(type_of(&expr, &mut tree, root, &mut NoCalls).unwrap(), Type::Int);
}

#[test]
fn set_to_a_string_tracks_max_observed_length() {
    let mut tree = fresh();
    let root = tree.root;
    let x = Symbol::intern("x");
    type_of(&Expr::Set(x, Box::new(Expr::Str(Symbol::intern("hi")))), &mut tree, root, &mut NoCalls).unwrap();
    type_of(&Expr::Set(x, Box::new(Expr::Str(Symbol::intern("hello")))), &mut tree, root, &mut NoCalls).unwrap();
    assert_eq!(tree.resolve_var(root, x).unwrap().1.max_len, 5);
}

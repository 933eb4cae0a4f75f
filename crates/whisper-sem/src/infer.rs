//! Bottom-up type inference with one level of back-patching (spec.md
//! section 4.E and the "decorator-style type check" design note).

use whisper_ast::{Expr, Type};
use whisper_util::Symbol;

use crate::error::SemaError;
use crate::scope::{ScopeId, ScopeTree};

/// Resolves the return type of a `Call` node. Implemented by
/// `whisper_mono::Monomorphizer`; kept as a trait here so this crate
/// doesn't need to depend on the monomorphizer, even though the
/// monomorphizer re-enters `type_of` on a `Def`'s body under each
/// candidate binding.
pub trait CallResolver {
    fn resolve_call(
        &mut self,
        tree: &mut ScopeTree,
        scope: ScopeId,
        name: Symbol,
        args: &[Expr],
    ) -> Result<Type, SemaError>;
}

/// Computes the type of `expr` as evaluated in `scope`, mutating `tree` to
/// back-patch any `NONE`-typed variable an arithmetic, comparison, or
/// logical operand turns out to need a concrete type for.
pub fn type_of(
    expr: &Expr,
    tree: &mut ScopeTree,
    scope: ScopeId,
    calls: &mut dyn CallResolver,
) -> Result<Type, SemaError> {
    match expr {
        Expr::Int(_) => Ok(Type::Int),
        Expr::Str(_) => Ok(Type::Str),

        Expr::Var(name) => tree
            .resolve_var(scope, *name)
            .map(|(_, var)| var.ty)
            .ok_or_else(|| SemaError::UnknownIdentifier { name: name.as_str().to_string() }),

        Expr::Add(cs) | Expr::Sub(cs) | Expr::Mul(cs) | Expr::Div(cs) | Expr::Mod(cs) => {
            let refs: Vec<&Expr> = cs.iter().collect();
            ensure_concrete_operands(&refs, tree, scope, calls)?;
            Ok(Type::Int)
        }

        Expr::Neg(inner) => {
            ensure_concrete_operands(&[inner.as_ref()], tree, scope, calls)?;
            Ok(Type::Int)
        }
        Expr::Not(inner) => {
            ensure_concrete_operands(&[inner.as_ref()], tree, scope, calls)?;
            Ok(Type::Int)
        }

        Expr::Lt(a, b)
        | Expr::Le(a, b)
        | Expr::Ge(a, b)
        | Expr::Gt(a, b)
        | Expr::Eq(a, b)
        | Expr::Ne(a, b)
        | Expr::And(a, b)
        | Expr::Or(a, b) => {
            ensure_concrete_operands(&[a.as_ref(), b.as_ref()], tree, scope, calls)?;
            Ok(Type::Int)
        }

        Expr::Set(name, rhs) => {
            let rhs_ty = type_of(rhs, tree, scope, calls)?;
            if rhs_ty.is_none() {
                return Err(SemaError::UntypedOperation);
            }
            match rhs.as_ref() {
                Expr::Str(s) => tree.observe_string_len(scope, *name, s.as_str().len()),
                Expr::Reads if rhs_ty == Type::Str => {
                    tree.observe_string_len(scope, *name, crate::scope::READS_BUF_LEN)
                }
                _ => {}
            }
            tree.declare_var(scope, *name, rhs_ty, Some((**rhs).clone()))?;
            Ok(rhs_ty)
        }

        Expr::Seq(children) => {
            let mut last = Type::Void;
            for child in children {
                last = type_of(child, tree, scope, calls)?;
            }
            Ok(last)
        }

        Expr::If(cond, then, else_) => {
            let cond_ty = type_of(cond, tree, scope, calls)?;
            if cond_ty != Type::Int {
                return Err(SemaError::ConditionNotInt { found: cond_ty });
            }
            let then_ty = type_of(then, tree, scope, calls)?;
            let else_ty = type_of(else_, tree, scope, calls)?;
            if then_ty.is_none() || then_ty != else_ty {
                return Err(SemaError::IfBranchMismatch { then_type: then_ty, else_type: else_ty });
            }
            Ok(then_ty)
        }

        Expr::While(cond, body) => {
            let cond_ty = type_of(cond, tree, scope, calls)?;
            if cond_ty != Type::Int {
                return Err(SemaError::ConditionNotInt { found: cond_ty });
            }
            type_of(body, tree, scope, calls)?;
            Ok(Type::Int)
        }

        Expr::Print(children) => {
            for child in children {
                type_of(child, tree, scope, calls)?;
            }
            Ok(Type::Void)
        }

        Expr::Readi => Ok(Type::Int),
        Expr::Reads => Ok(Type::Str),

        Expr::Def(name, params, body) => {
            let child = tree.add_child(scope, *name);
            for param in params {
                tree.declare_param(child, *param);
            }
            tree.scope_mut(child).body = Some((**body).clone());
            Ok(Type::Void)
        }

        Expr::Call(name, args) => calls.resolve_call(tree, scope, *name, args),
    }
}

/// The arg-checker (spec.md section 9): unifies every operand's type,
/// fails if the common type is still `NONE`, and back-patches any `Var`
/// operand that was `NONE` to the common type, preserving its stored
/// initializer.
pub fn ensure_concrete_operands(
    children: &[&Expr],
    tree: &mut ScopeTree,
    scope: ScopeId,
    calls: &mut dyn CallResolver,
) -> Result<Type, SemaError> {
    let mut types = Vec::with_capacity(children.len());
    for child in children {
        types.push(type_of(child, tree, scope, calls)?);
    }
    let common = Type::unify_all(types)?;
    if common.is_none() {
        return Err(SemaError::UntypedOperation);
    }
    for child in children {
        if let Expr::Var(name) = child {
            if let Some((var_scope, var)) = tree.resolve_var(scope, *name) {
                if var.ty.is_none() {
                    tree.declare_var(var_scope, *name, common, None)?;
                }
            }
        }
    }
    Ok(common)
}

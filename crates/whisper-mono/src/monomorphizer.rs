//! Per-`Call` monomorphization (spec.md section 4.F): one emitted C
//! function per distinct parameter-type tuple of a user-defined
//! function, cached on the `Def`-scope so repeat call sites with the
//! same signature share one function (spec.md invariant 3).

use whisper_ast::{Expr, Type};
use whisper_sem::{type_of, CallResolver, Monomorphization, ScopeId, ScopeTree, ScopeVariable, SemaError, READS_BUF_LEN};
use whisper_util::Symbol;

use crate::error::MonoError;

/// The buffer size a `STRING` parameter must be given at the call site:
/// a literal's own length, a variable's tracked `max_len` (resolved
/// transitively up the caller's scope chain), or the runtime's `reads()`
/// line capacity when the argument's length can't be bounded from its
/// source expression (spec.md invariant 6).
fn arg_max_len(tree: &ScopeTree, caller_scope: ScopeId, arg: &Expr) -> usize {
    match arg {
        Expr::Str(s) => s.as_str().len(),
        Expr::Var(name) => tree.resolve_var(caller_scope, *name).map(|(_, v)| v.max_len).unwrap_or(READS_BUF_LEN),
        Expr::Reads => READS_BUF_LEN,
        Expr::Call(..) => READS_BUF_LEN,
        _ => 0,
    }
}

/// The resolved C identity of one `Call` site: which function to
/// invoke, what it returns, and where its cached parameter table lives
/// so `whisper-gen` can find it again when it drains the worklist.
#[derive(Clone, Debug)]
pub struct CallSite {
    pub def_scope: ScopeId,
    pub mono_index: usize,
    pub fn_name: String,
    pub return_type: Type,
}

/// Resolves `Call` nodes to monomorphized C functions.
///
/// Holds no cache of its own: the monomorphization table lives on each
/// `Def`-scope in the `ScopeTree` (`Scope::monomorphizations`), so dedup
/// survives recursive re-entry through [`CallResolver`] and across
/// separate `Monomorphizer` values. `pending` is the only state this
/// type owns -- every monomorphization created but not yet emitted, so
/// `whisper-gen` can drain it as a worklist: emitting one function's
/// body may discover calls that create others.
#[derive(Default)]
pub struct Monomorphizer {
    pub pending: Vec<(ScopeId, usize)>,
}

impl Monomorphizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full resolution of a `Call(name, args)` node evaluated in
    /// `scope`: resolve the `Def`-scope, type each argument, look up or
    /// create the matching monomorphization, and return its C identity.
    pub fn resolve_call(
        &mut self,
        tree: &mut ScopeTree,
        scope: ScopeId,
        name: Symbol,
        args: &[Expr],
    ) -> Result<CallSite, MonoError> {
        let def_scope = tree
            .resolve_scope(scope, name)
            .ok_or_else(|| SemaError::UnknownIdentifier { name: name.as_str().to_string() })?;

        let expected = tree.scope(def_scope).params.len();
        if args.len() != expected {
            return Err(
                SemaError::ArityMismatch { name: name.as_str().to_string(), expected, got: args.len() }.into(),
            );
        }

        let mut param_types = Vec::with_capacity(args.len());
        for arg in args {
            let ty = type_of(arg, tree, scope, self)?;
            if ty.is_none() {
                return Err(SemaError::UntypedArgument { name: name.as_str().to_string() }.into());
            }
            param_types.push(ty);
        }

        if let Some(index) =
            tree.scope(def_scope).monomorphizations.iter().position(|m| m.param_types == param_types)
        {
            let mono = &tree.scope(def_scope).monomorphizations[index];
            return Ok(CallSite {
                def_scope,
                mono_index: index,
                fn_name: mono.fn_name.clone(),
                return_type: mono.return_type,
            });
        }

        self.monomorphize(tree, scope, def_scope, name, param_types, args)
    }

    /// spec.md section 4.F step 4: clone the scope's variable table,
    /// overwrite each parameter with the caller's concrete type and
    /// argument expression, install the clone, re-run type inference
    /// over the body under this binding, then restore the previous
    /// (still-`NONE`-typed) table so the next call starts fresh.
    fn monomorphize(
        &mut self,
        tree: &mut ScopeTree,
        caller_scope: ScopeId,
        def_scope: ScopeId,
        name: Symbol,
        param_types: Vec<Type>,
        args: &[Expr],
    ) -> Result<CallSite, MonoError> {
        let params = tree.scope(def_scope).params.clone();
        let mut candidate = tree.scope(def_scope).vars.clone();
        for (i, param) in params.iter().enumerate() {
            let max_len = arg_max_len(tree, caller_scope, &args[i]);
            candidate.insert(
                *param,
                ScopeVariable { name: *param, ty: param_types[i], init: Some(args[i].clone()), max_len },
            );
        }

        let previous = std::mem::replace(&mut tree.scope_mut(def_scope).vars, candidate);
        let body = tree.scope(def_scope).body.clone().expect("a resolved Def-scope always carries a body");
        let result = type_of(&body, tree, def_scope, self);
        let installed = std::mem::replace(&mut tree.scope_mut(def_scope).vars, previous);
        let return_type = result?;

        let index = tree.scope(def_scope).monomorphizations.len();
        let fn_name = format!("{}_{}", name.as_str(), index);
        tree.scope_mut(def_scope).monomorphizations.push(Monomorphization {
            param_types,
            return_type,
            fn_name: fn_name.clone(),
            vars: installed,
        });
        self.pending.push((def_scope, index));

        Ok(CallSite { def_scope, mono_index: index, fn_name, return_type })
    }
}

impl CallResolver for Monomorphizer {
    fn resolve_call(
        &mut self,
        tree: &mut ScopeTree,
        scope: ScopeId,
        name: Symbol,
        args: &[Expr],
    ) -> Result<Type, SemaError> {
        Monomorphizer::resolve_call(self, tree, scope, name, args)
            .map(|site| site.return_type)
            .map_err(|MonoError::Sema(e)| e)
    }
}

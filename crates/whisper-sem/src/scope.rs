//! Scope tree: lexical scoping, variable table, monomorphization cache
//! (spec.md section 4.D).
//!
//! Scopes are held in a flat arena (`IndexVec<ScopeId, Scope>`) rather
//! than linked by `Rc`/`RefCell`, per the "cyclic scope graph" design note
//! — parent and child links are plain `ScopeId`s into the same arena.

use indexmap::IndexMap;
use whisper_ast::{Expr, Type};
use whisper_util::{define_idx, IndexVec, Symbol};

use crate::error::SemaError;

define_idx!(ScopeId);

/// Byte capacity of the runtime's `reads()` line buffer
/// (`WHISPERC_READS_BUF_LEN` in the emitted C preamble). A `STRING` value
/// that can't be bounded from its source expression (stdin input, an
/// unresolved call result) is sized against this upper bound rather than
/// left at zero.
pub const READS_BUF_LEN: usize = 4096;

/// One entry in a scope's variable table.
#[derive(Clone, Debug)]
pub struct ScopeVariable {
    pub name: Symbol,
    pub ty: Type,
    /// The expression that produced this variable's current value. For a
    /// `Def` parameter this is the caller-side argument expression
    /// installed by the monomorphizer; for a top-level variable it is the
    /// most recent `Set` right-hand side. `None` for a parameter that has
    /// not yet been bound to a concrete type.
    pub init: Option<Expr>,
    /// Maximum observed byte length of a `STRING`-typed value, used to
    /// size the emitted `char[N]` declaration (spec.md invariant 6).
    pub max_len: usize,
}

impl ScopeVariable {
    fn untyped(name: Symbol) -> Self {
        Self { name, ty: Type::None, init: None, max_len: 0 }
    }
}

/// One monomorphized instance of a `Def`-scope's body: a concrete
/// parameter-type tuple plus the return type it produced, cached so
/// repeat call sites with the same signature share one emitted function.
#[derive(Clone, Debug)]
pub struct Monomorphization {
    pub param_types: Vec<Type>,
    pub return_type: Type,
    pub fn_name: String,
    /// The parameter table cloned and overwritten with concrete types and
    /// caller-side value expressions at the call site that created this
    /// monomorphization (spec.md section 4.F step 4).
    pub vars: IndexMap<Symbol, ScopeVariable>,
}

pub struct Scope {
    pub name: Symbol,
    pub parent: Option<ScopeId>,
    pub children: IndexMap<Symbol, ScopeId>,
    pub vars: IndexMap<Symbol, ScopeVariable>,
    pub params: Vec<Symbol>,
    /// `Def`-scope body, re-entered once per monomorphization. `None` for
    /// the implicit root `main` scope, whose body lives outside the tree.
    pub body: Option<Expr>,
    pub monomorphizations: Vec<Monomorphization>,
    /// Names of the no-argument helper functions synthesized while
    /// lifting expressions evaluated in this scope.
    pub helpers: Vec<Symbol>,
}

impl Scope {
    fn new(name: Symbol, parent: Option<ScopeId>) -> Self {
        Self {
            name,
            parent,
            children: IndexMap::new(),
            vars: IndexMap::new(),
            params: Vec::new(),
            body: None,
            monomorphizations: Vec::new(),
            helpers: Vec::new(),
        }
    }
}

pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
    pub root: ScopeId,
    /// Shared prototype list "propagated to the root" (spec.md section 3):
    /// every `newHelper` call and monomorphization appends here directly
    /// rather than each scope keeping its own copy.
    pub prototypes: Vec<String>,
    helper_counter: u32,
}

impl ScopeTree {
    pub fn new(main_name: Symbol) -> Self {
        let mut scopes = IndexVec::new();
        let root = scopes.push(Scope::new(main_name, None));
        Self { scopes, root, prototypes: Vec::new(), helper_counter: 0 }
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id]
    }

    /// Links a new child named `name` under `parent`. A name collision
    /// overwrites the previous child, matching source behavior for
    /// redefined functions.
    pub fn add_child(&mut self, parent: ScopeId, name: Symbol) -> ScopeId {
        let id = self.scopes.push(Scope::new(name, Some(parent)));
        self.scope_mut(parent).children.insert(name, id);
        id
    }

    /// Walks up variable tables from `from` until `name` is found.
    pub fn resolve_var(&self, from: ScopeId, name: Symbol) -> Option<(ScopeId, &ScopeVariable)> {
        let mut cur = Some(from);
        while let Some(id) = cur {
            if let Some(var) = self.scope(id).vars.get(&name) {
                return Some((id, var));
            }
            cur = self.scope(id).parent;
        }
        None
    }

    /// Walks up child-scope links the same way `resolve_var` walks
    /// variable tables, for resolving a `Def` name visible from a `Call`.
    pub fn resolve_scope(&self, from: ScopeId, name: Symbol) -> Option<ScopeId> {
        let mut cur = Some(from);
        while let Some(id) = cur {
            if let Some(&child) = self.scope(id).children.get(&name) {
                return Some(child);
            }
            cur = self.scope(id).parent;
        }
        None
    }

    /// Creates or type-refines `name` in `scope`. `NONE -> concrete` always
    /// succeeds (invariant 2); `concrete -> concrete'` is a type conflict
    /// unless the two types are equal. `init`, when `Some`, replaces the
    /// stored initializer; `None` preserves whatever was already there.
    pub fn declare_var(
        &mut self,
        scope: ScopeId,
        name: Symbol,
        ty: Type,
        init: Option<Expr>,
    ) -> Result<(), SemaError> {
        match self.scope_mut(scope).vars.get_mut(&name) {
            Some(existing) => {
                existing.ty = existing.ty.unify(ty).map_err(|_| SemaError::TypeConflict {
                    name: name.as_str().to_string(),
                    existing: existing.ty,
                    attempted: ty,
                })?;
                if init.is_some() {
                    existing.init = init;
                }
            }
            None => {
                self.scope_mut(scope).vars.insert(name, ScopeVariable { name, ty, init, max_len: 0 });
            }
        }
        Ok(())
    }

    /// Records the observed byte length of a string assigned to `name`.
    pub fn observe_string_len(&mut self, scope: ScopeId, name: Symbol, len: usize) {
        if let Some(var) = self.scope_mut(scope).vars.get_mut(&name) {
            var.max_len = var.max_len.max(len);
        }
    }

    /// Appends `name` to the parameter list with initial type `NONE`.
    pub fn declare_param(&mut self, scope: ScopeId, name: Symbol) {
        self.scope_mut(scope).params.push(name);
        self.scope_mut(scope).vars.entry(name).or_insert_with(|| ScopeVariable::untyped(name));
    }

    /// Allocates a globally unique helper name (invariant 4: `__fn_<full
    /// scope path>_<counter>`), registers its C prototype, and records the
    /// name against `scope` so `emitFunctions` can find it later.
    pub fn new_helper(&mut self, scope: ScopeId, ret_type: Type) -> Symbol {
        self.helper_counter += 1;
        let path = self.full_path(scope);
        let name = Symbol::intern(&format!("__fn_{}_{}", path, self.helper_counter));
        self.prototypes.push(format!("{} {}();", ret_type.cspell_param(), name));
        self.scope_mut(scope).helpers.push(name);
        name
    }

    /// Underscore-joined scope names from the root down to `scope`.
    pub fn full_path(&self, scope: ScopeId) -> String {
        let mut parts = Vec::new();
        let mut cur = Some(scope);
        while let Some(id) = cur {
            parts.push(self.scope(id).name.as_str());
            cur = self.scope(id).parent;
        }
        parts.reverse();
        parts.join("_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    #[test]
    fn resolve_var_walks_up_to_the_root() {
        let mut tree = ScopeTree::new(var("main"));
        tree.declare_var(tree.root, var("x"), Type::Int, None).unwrap();
        let child = tree.add_child(tree.root, var("f"));
        let (found_in, v) = tree.resolve_var(child, var("x")).unwrap();
        assert_eq!(found_in, tree.root);
        assert_eq!(v.ty, Type::Int);
    }

    #[test]
    fn resolve_var_misses_outside_any_enclosing_scope() {
        let mut tree = ScopeTree::new(var("main"));
        let sibling_a = tree.add_child(tree.root, var("a"));
        let sibling_b = tree.add_child(tree.root, var("b"));
        tree.declare_var(sibling_a, var("local"), Type::Int, None).unwrap();
        assert!(tree.resolve_var(sibling_b, var("local")).is_none());
    }

    #[test]
    fn declare_var_promotes_none_to_a_concrete_type() {
        let mut tree = ScopeTree::new(var("main"));
        tree.declare_param(tree.root, var("n"));
        tree.declare_var(tree.root, var("n"), Type::Int, None).unwrap();
        assert_eq!(tree.resolve_var(tree.root, var("n")).unwrap().1.ty, Type::Int);
    }

    #[test]
    fn declare_var_rejects_reassignment_to_a_different_concrete_type() {
        let mut tree = ScopeTree::new(var("main"));
        tree.declare_var(tree.root, var("x"), Type::Int, None).unwrap();
        assert!(tree.declare_var(tree.root, var("x"), Type::Str, None).is_err());
    }

    #[test]
    fn declare_var_preserves_init_when_none_is_passed() {
        let mut tree = ScopeTree::new(var("main"));
        tree.declare_var(tree.root, var("x"), Type::Int, Some(Expr::Int(5))).unwrap();
        tree.declare_var(tree.root, var("x"), Type::Int, None).unwrap();
        assert_eq!(tree.resolve_var(tree.root, var("x")).unwrap().1.init, Some(Expr::Int(5)));
    }

    #[test]
    fn add_child_overwrites_on_name_collision() {
        let mut tree = ScopeTree::new(var("main"));
        let first = tree.add_child(tree.root, var("f"));
        let second = tree.add_child(tree.root, var("f"));
        assert_ne!(first, second);
        assert_eq!(tree.resolve_scope(tree.root, var("f")), Some(second));
    }

    #[test]
    fn new_helper_names_are_unique_and_registered_as_prototypes() {
        let mut tree = ScopeTree::new(var("main"));
        let a = tree.new_helper(tree.root, Type::Void);
        let b = tree.new_helper(tree.root, Type::Void);
        assert_ne!(a, b);
        assert_eq!(tree.prototypes.len(), 2);
    }

    #[test]
    fn full_path_joins_from_root_to_scope() {
        let mut tree = ScopeTree::new(var("main"));
        let child = tree.add_child(tree.root, var("f"));
        assert_eq!(tree.full_path(child), "main_f");
    }

    #[test]
    fn observe_string_len_tracks_the_maximum() {
        let mut tree = ScopeTree::new(var("main"));
        tree.declare_var(tree.root, var("s"), Type::Str, None).unwrap();
        tree.observe_string_len(tree.root, var("s"), 3);
        tree.observe_string_len(tree.root, var("s"), 10);
        tree.observe_string_len(tree.root, var("s"), 1);
        assert_eq!(tree.resolve_var(tree.root, var("s")).unwrap().1.max_len, 10);
    }
}

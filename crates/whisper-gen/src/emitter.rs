//! The C emitter (spec.md section 4.G): walks the AST asking
//! `whisper-sem` for types and `whisper-mono` for call-site function
//! identities, accumulating emitted C text in four buffers
//! (prototypes live on the `ScopeTree` itself) that the fixed skeleton
//! stitches together.
//!
//! Lifting discipline: any expression whose source form is a statement
//! list (`Seq`, `Print`) is never inlined into a C expression. It is
//! emitted as the body of a fresh zero-argument helper function, and
//! the surrounding expression becomes a call to that helper -- `name()`
//! when the value is needed, the bare `name` identifier when a function
//! pointer is needed (the `VOID` arm of `If`).
//!
//! The one exception is the outermost sequence of a translation unit:
//! the program's top-level `Seq` becomes `main`'s own statement list
//! directly, and a `Def`-scope's own body is compiled the same way as
//! the body of the function being emitted for it -- neither is lifted
//! through an extra helper just to call straight back into it.

use whisper_ast::{Expr, Type};
use whisper_sem::{ensure_concrete_operands, type_of, ScopeId, ScopeTree, SemaError};
use whisper_util::Symbol;

use crate::error::GenError;
use crate::format::printf_format;
use crate::skeleton;

/// Which C struct a `Var` reference resolves against: `main` at the
/// top level, or `<fn_name>` while compiling one monomorphized
/// function's body.
struct Ctx {
    scope: ScopeId,
    struct_name: String,
}

pub struct Emitter {
    mono: whisper_mono::Monomorphizer,
    structs: String,
    funcs: String,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self { mono: whisper_mono::Monomorphizer::new(), structs: String::new(), funcs: String::new() }
    }

    /// Compiles a whole program (the parser's top-level `Expr`, always
    /// a `Seq`) into one C translation unit.
    pub fn compile_program(mut self, tree: &mut ScopeTree, program: &Expr) -> Result<String, GenError> {
        let root = tree.root;
        let ctx = Ctx { scope: root, struct_name: tree.scope(root).name.as_str().to_string() };

        let top_level: Vec<Expr> = match program {
            Expr::Seq(children) => children.clone(),
            other => vec![other.clone()],
        };

        let mut main_body = String::new();
        for form in &top_level {
            main_body.push_str(&self.compile_stmt(tree, &ctx, form)?);
        }

        self.drain_pending(tree)?;
        self.emit_struct(tree, root, None)?;

        Ok(skeleton::assemble(&tree.prototypes, &self.structs, &self.funcs, &main_body))
    }

    fn drain_pending(&mut self, tree: &mut ScopeTree) -> Result<(), GenError> {
        while let Some((scope, index)) = self.mono.pending.pop() {
            self.emit_monomorphized_function(tree, scope, index)?;
        }
        Ok(())
    }

    /// Compiles `expr` for effect, as one bare C statement.
    fn compile_stmt(&mut self, tree: &mut ScopeTree, ctx: &Ctx, expr: &Expr) -> Result<String, GenError> {
        match expr {
            Expr::Def(..) => {
                // Registers the child scope in the tree; the source form
                // itself compiles to nothing.
                type_of(expr, tree, ctx.scope, &mut self.mono)?;
                Ok(String::new())
            }
            Expr::While(cond, body) => self.compile_while_stmt(tree, ctx, cond, body),
            _ => {
                let value = self.compile_expr(tree, ctx, expr)?;
                Ok(format!("{};", value))
            }
        }
    }

    /// Compiles `expr` as the last form of a function body, where
    /// `expected` is that function's return type.
    fn compile_tail(
        &mut self,
        tree: &mut ScopeTree,
        ctx: &Ctx,
        expr: &Expr,
        expected: Type,
    ) -> Result<String, GenError> {
        match expr {
            Expr::Seq(children) => {
                let mut out = String::new();
                for (i, child) in children.iter().enumerate() {
                    if i + 1 == children.len() {
                        out.push_str(&self.compile_tail(tree, ctx, child, expected)?);
                    } else {
                        out.push_str(&self.compile_stmt(tree, ctx, child)?);
                    }
                }
                if children.is_empty() && expected != Type::Void {
                    out.push_str("return 0;");
                }
                Ok(out)
            }
            Expr::While(cond, body) => {
                let mut out = self.compile_while_stmt(tree, ctx, cond, body)?;
                if expected != Type::Void {
                    out.push_str("return 0;");
                }
                Ok(out)
            }
            Expr::Def(..) => self.compile_stmt(tree, ctx, expr),
            _ => {
                let value = self.compile_expr(tree, ctx, expr)?;
                if expected == Type::Void {
                    Ok(format!("{};", value))
                } else {
                    Ok(format!("return {};", value))
                }
            }
        }
    }

    fn compile_while_stmt(
        &mut self,
        tree: &mut ScopeTree,
        ctx: &Ctx,
        cond: &Expr,
        body: &Expr,
    ) -> Result<String, GenError> {
        let cond_ty = type_of(cond, tree, ctx.scope, &mut self.mono)?;
        if cond_ty != Type::Int {
            return Err(SemaError::ConditionNotInt { found: cond_ty }.into());
        }
        let cond_s = self.compile_expr(tree, ctx, cond)?;
        let body_s = self.compile_stmt(tree, ctx, body)?;
        Ok(format!("while ({}) {{ {} }}", cond_s, body_s))
    }

    /// Compiles `expr` as a C expression, lifting any `Seq`/`Print` it
    /// contains into a helper call.
    fn compile_expr(&mut self, tree: &mut ScopeTree, ctx: &Ctx, expr: &Expr) -> Result<String, GenError> {
        match expr {
            Expr::Int(n) => Ok(n.to_string()),
            Expr::Str(s) => Ok(format!("\"{}\"", s.as_str())),

            Expr::Var(name) => {
                tree.resolve_var(ctx.scope, *name)
                    .ok_or_else(|| SemaError::UnknownIdentifier { name: name.as_str().to_string() })?;
                Ok(format!("__{}.{}", ctx.struct_name, name.as_str()))
            }

            Expr::Add(cs) => self.fold_arith(tree, ctx, cs, "+"),
            Expr::Sub(cs) => self.fold_arith(tree, ctx, cs, "-"),
            Expr::Mul(cs) => self.fold_arith(tree, ctx, cs, "*"),
            Expr::Div(cs) => self.fold_arith(tree, ctx, cs, "/"),
            Expr::Mod(cs) => self.fold_arith(tree, ctx, cs, "%"),

            Expr::Neg(inner) => {
                ensure_concrete_operands(&[inner.as_ref()], tree, ctx.scope, &mut self.mono)?;
                let s = self.compile_expr(tree, ctx, inner)?;
                Ok(format!("(-{})", s))
            }
            Expr::Not(inner) => {
                ensure_concrete_operands(&[inner.as_ref()], tree, ctx.scope, &mut self.mono)?;
                let s = self.compile_expr(tree, ctx, inner)?;
                Ok(format!("(!{})", s))
            }

            Expr::Lt(a, b) => self.infix(tree, ctx, a, b, "<"),
            Expr::Le(a, b) => self.infix(tree, ctx, a, b, "<="),
            Expr::Ge(a, b) => self.infix(tree, ctx, a, b, ">="),
            Expr::Gt(a, b) => self.infix(tree, ctx, a, b, ">"),
            Expr::Eq(a, b) => self.infix(tree, ctx, a, b, "=="),
            Expr::Ne(a, b) => self.infix(tree, ctx, a, b, "!="),
            Expr::And(a, b) => self.infix(tree, ctx, a, b, "&&"),
            Expr::Or(a, b) => self.infix(tree, ctx, a, b, "||"),

            Expr::Set(name, rhs) => self.compile_set(tree, ctx, *name, rhs),

            Expr::Seq(children) => {
                let helper = self.lift_seq(tree, ctx, children)?;
                Ok(format!("{}()", helper.as_str()))
            }
            Expr::Print(children) => {
                let helper = self.lift_print(tree, ctx, children)?;
                Ok(format!("{}()", helper.as_str()))
            }
            Expr::While(cond, body) => {
                let helper = self.lift_while(tree, ctx, cond, body)?;
                Ok(format!("{}()", helper.as_str()))
            }

            Expr::If(cond, then, else_) => self.compile_if(tree, ctx, cond, then, else_),

            Expr::Readi => Ok("__readi()".to_string()),
            Expr::Reads => Ok("__reads()".to_string()),

            Expr::Def(..) => {
                type_of(expr, tree, ctx.scope, &mut self.mono)?;
                Ok(String::new())
            }

            Expr::Call(name, args) => self.compile_call(tree, ctx, *name, args),
        }
    }

    fn fold_arith(
        &mut self,
        tree: &mut ScopeTree,
        ctx: &Ctx,
        children: &[Expr],
        op: &str,
    ) -> Result<String, GenError> {
        let refs: Vec<&Expr> = children.iter().collect();
        ensure_concrete_operands(&refs, tree, ctx.scope, &mut self.mono)?;
        let mut parts = Vec::with_capacity(children.len());
        for child in children {
            parts.push(self.compile_expr(tree, ctx, child)?);
        }
        let mut acc = parts[0].clone();
        for part in &parts[1..] {
            acc = format!("({} {} {})", acc, op, part);
        }
        Ok(acc)
    }

    fn infix(&mut self, tree: &mut ScopeTree, ctx: &Ctx, a: &Expr, b: &Expr, op: &str) -> Result<String, GenError> {
        ensure_concrete_operands(&[a, b], tree, ctx.scope, &mut self.mono)?;
        let a_s = self.compile_expr(tree, ctx, a)?;
        let b_s = self.compile_expr(tree, ctx, b)?;
        Ok(format!("({} {} {})", a_s, op, b_s))
    }

    /// `Set` always emits a C expression so it can appear in statement
    /// or expression position alike. `INT` is a plain assignment
    /// expression; `STRING` uses the comma operator to sequence the
    /// `memcpy` (spec.md's chosen initialization primitive) with the
    /// resulting value.
    fn compile_set(&mut self, tree: &mut ScopeTree, ctx: &Ctx, name: Symbol, rhs: &Expr) -> Result<String, GenError> {
        let ty = type_of(&Expr::Set(name, Box::new(rhs.clone())), tree, ctx.scope, &mut self.mono)?;
        let rhs_s = self.compile_expr(tree, ctx, rhs)?;
        match ty {
            Type::Str => {
                let max_len = tree.resolve_var(ctx.scope, name).map(|(_, v)| v.max_len).unwrap_or(0);
                Ok(format!(
                    "(memcpy(__{0}.{1}, {2}, {3}), __{0}.{1})",
                    ctx.struct_name,
                    name.as_str(),
                    rhs_s,
                    max_len + 1
                ))
            }
            _ => Ok(format!("(__{}.{} = {})", ctx.struct_name, name.as_str(), rhs_s)),
        }
    }

    fn lift_seq(&mut self, tree: &mut ScopeTree, ctx: &Ctx, children: &[Expr]) -> Result<Symbol, GenError> {
        let seq = Expr::Seq(children.to_vec());
        let ret_ty = type_of(&seq, tree, ctx.scope, &mut self.mono)?;
        let helper = tree.new_helper(ctx.scope, ret_ty);
        let body = self.compile_tail(tree, ctx, &seq, ret_ty)?;
        self.funcs.push_str(&format!("{} {}() {{ {} }}\n", ret_ty.cspell_param(), helper.as_str(), body));
        Ok(helper)
    }

    fn lift_print(&mut self, tree: &mut ScopeTree, ctx: &Ctx, children: &[Expr]) -> Result<Symbol, GenError> {
        let mut types = Vec::with_capacity(children.len());
        let mut parts = Vec::with_capacity(children.len());
        for child in children {
            types.push(type_of(child, tree, ctx.scope, &mut self.mono)?);
            parts.push(self.compile_expr(tree, ctx, child)?);
        }
        let fmt = printf_format(&types);
        let args = if parts.is_empty() { String::new() } else { format!(", {}", parts.join(", ")) };
        let helper = tree.new_helper(ctx.scope, Type::Void);
        self.funcs.push_str(&format!("void {}() {{ printf(\"{}\"{}); }}\n", helper.as_str(), fmt, args));
        Ok(helper)
    }

    fn lift_while(&mut self, tree: &mut ScopeTree, ctx: &Ctx, cond: &Expr, body: &Expr) -> Result<Symbol, GenError> {
        let stmt = self.compile_while_stmt(tree, ctx, cond, body)?;
        let helper = tree.new_helper(ctx.scope, Type::Int);
        self.funcs.push_str(&format!("int {}() {{ {} return 0; }}\n", helper.as_str(), stmt));
        Ok(helper)
    }

    /// `If`'s branch values dispatch through one of three runtime
    /// helpers by common branch type. `INT`/`STRING` branches pass
    /// their evaluated value; a `VOID` branch has no value, so it
    /// passes a zero-argument function pointer instead (lifting the
    /// branch into a helper first if it isn't one already).
    fn compile_if(
        &mut self,
        tree: &mut ScopeTree,
        ctx: &Ctx,
        cond: &Expr,
        then: &Expr,
        else_: &Expr,
    ) -> Result<String, GenError> {
        let common = type_of(&Expr::If(Box::new(cond.clone()), Box::new(then.clone()), Box::new(else_.clone())),
            tree, ctx.scope, &mut self.mono)?;
        let cond_s = self.compile_expr(tree, ctx, cond)?;

        let (then_s, else_s, helper_name) = match common {
            Type::Int => (self.compile_expr(tree, ctx, then)?, self.compile_expr(tree, ctx, else_)?, "__if_val_int"),
            Type::Str => (self.compile_expr(tree, ctx, then)?, self.compile_expr(tree, ctx, else_)?, "__if_ref_char"),
            Type::Void => {
                (self.compile_void_branch(tree, ctx, then)?, self.compile_void_branch(tree, ctx, else_)?, "__if_val_fn_void")
            }
            Type::None => unreachable!("type_of never returns NONE for a resolved If"),
        };

        Ok(format!("{}({}, {}, {})", helper_name, cond_s, then_s, else_s))
    }

    /// Returns a bare, zero-argument function-pointer identifier for a
    /// `VOID`-typed `If` branch.
    fn compile_void_branch(&mut self, tree: &mut ScopeTree, ctx: &Ctx, branch: &Expr) -> Result<String, GenError> {
        match branch {
            Expr::Seq(children) => Ok(self.lift_seq(tree, ctx, children)?.as_str().to_string()),
            Expr::Print(children) => Ok(self.lift_print(tree, ctx, children)?.as_str().to_string()),
            other => {
                let compiled = self.compile_expr(tree, ctx, other)?;
                let helper = tree.new_helper(ctx.scope, Type::Void);
                self.funcs.push_str(&format!("void {}() {{ {}; }}\n", helper.as_str(), compiled));
                Ok(helper.as_str().to_string())
            }
        }
    }

    fn compile_call(&mut self, tree: &mut ScopeTree, ctx: &Ctx, name: Symbol, args: &[Expr]) -> Result<String, GenError> {
        let site = self.mono.resolve_call(tree, ctx.scope, name, args)?;
        let mut arg_strs = Vec::with_capacity(args.len());
        for arg in args {
            arg_strs.push(self.compile_expr(tree, ctx, arg)?);
        }
        Ok(format!("{}({})", site.fn_name, arg_strs.join(", ")))
    }

    /// Emits the C function and struct for one already-created
    /// monomorphization, copying each argument into the function's
    /// local struct at entry (spec.md section 4.F step 4's "copies them
    /// into its local struct" note).
    fn emit_monomorphized_function(
        &mut self,
        tree: &mut ScopeTree,
        def_scope: ScopeId,
        mono_index: usize,
    ) -> Result<(), GenError> {
        let mono = tree.scope(def_scope).monomorphizations[mono_index].clone();
        let params = tree.scope(def_scope).params.clone();
        let body = tree.scope(def_scope).body.clone().expect("monomorphized scopes always have a body");

        let mut c_params = Vec::with_capacity(params.len());
        let mut entry_stmts = String::new();
        for param in &params {
            let var = mono
                .vars
                .get(param)
                .ok_or_else(|| SemaError::UninitializedVariable { name: param.as_str().to_string() })?;
            if var.ty.is_none() {
                return Err(SemaError::UninitializedVariable { name: param.as_str().to_string() }.into());
            }
            c_params.push(format!("{} {}", var.ty.cspell_param(), param.as_str()));
            match var.ty {
                Type::Str => {
                    entry_stmts.push_str(&format!("strcpy(__{}.{}, {}); ", mono.fn_name, param.as_str(), param.as_str()))
                }
                _ => entry_stmts
                    .push_str(&format!("__{}.{} = {}; ", mono.fn_name, param.as_str(), param.as_str())),
            }
        }

        let previous = std::mem::replace(&mut tree.scope_mut(def_scope).vars, mono.vars.clone());
        let ctx = Ctx { scope: def_scope, struct_name: mono.fn_name.clone() };
        let body_text = self.compile_tail(tree, &ctx, &body, mono.return_type);
        tree.scope_mut(def_scope).vars = previous;
        let body_text = body_text?;

        self.funcs.push_str(&format!(
            "{} {}({}) {{ {}{} }}\n",
            mono.return_type.cspell_param(),
            mono.fn_name,
            c_params.join(", "),
            entry_stmts,
            body_text
        ));

        self.emit_struct(tree, def_scope, Some(mono_index))
    }

    /// Emits `struct { <fields> } __<name>;` for either the root `main`
    /// scope (`mono_index: None`) or one monomorphization's parameter
    /// table.
    fn emit_struct(&mut self, tree: &ScopeTree, scope: ScopeId, mono_index: Option<usize>) -> Result<(), GenError> {
        let (vars, c_name): (Vec<_>, String) = match mono_index {
            None => (tree.scope(scope).vars.values().cloned().collect(), tree.scope(scope).name.as_str().to_string()),
            Some(i) => {
                let mono = &tree.scope(scope).monomorphizations[i];
                (mono.vars.values().cloned().collect(), mono.fn_name.clone())
            }
        };

        let mut fields = String::new();
        for var in &vars {
            if var.ty.is_none() {
                return Err(SemaError::UninitializedVariable { name: var.name.as_str().to_string() }.into());
            }
            fields.push_str(&field_decl(var.ty, var.name.as_str(), var.max_len));
            fields.push(' ');
        }
        self.structs.push_str(&format!("struct {{ {} }} __{};\n", fields, c_name));
        Ok(())
    }
}

fn field_decl(ty: Type, name: &str, max_len: usize) -> String {
    match ty {
        Type::Str => format!("char {}[{}];", name, max_len + 1),
        other => format!("{} {};", other.cspell_param(), name),
    }
}

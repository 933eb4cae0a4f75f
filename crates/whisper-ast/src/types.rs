//! The closed type lattice `T = {INT, STRING, VOID, NONE}`.

use thiserror::Error;

/// A semantic type. `None` is an inference placeholder — "not yet
/// known" — never a runtime type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Str,
    Void,
    /// Not yet inferred.
    None,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot unify {a:?} with {b:?}")]
pub struct UnifyError {
    pub a: Type,
    pub b: Type,
}

impl Type {
    /// `unify(a, b)`: `a` if `a == b`; the non-`None` side if exactly
    /// one is `None`; an error otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use whisper_ast::Type;
    ///
    /// assert_eq!(Type::Int.unify(Type::None).unwrap(), Type::Int);
    /// assert_eq!(Type::None.unify(Type::Str).unwrap(), Type::Str);
    /// assert!(Type::Int.unify(Type::Str).is_err());
    /// ```
    pub fn unify(self, other: Type) -> Result<Type, UnifyError> {
        match (self, other) {
            (a, b) if a == b => Ok(a),
            (Type::None, b) => Ok(b),
            (a, Type::None) => Ok(a),
            (a, b) => Err(UnifyError { a, b }),
        }
    }

    /// Unifies a whole slice of types left to right, `None` if the
    /// slice is empty (the arg-checker treats that as "still
    /// untyped", not an error — the caller decides what to do next).
    pub fn unify_all(types: impl IntoIterator<Item = Type>) -> Result<Type, UnifyError> {
        let mut acc = Type::None;
        for t in types {
            acc = acc.unify(t)?;
        }
        Ok(acc)
    }

    /// The C spelling for a parameter or expression-context use of this
    /// type. `STRING` here is `char*`, not the sized array a
    /// declaration gets — see [`Type::cspell_decl`].
    ///
    /// # Examples
    ///
    /// ```
    /// use whisper_ast::Type;
    ///
    /// assert_eq!(Type::Int.cspell_param(), "int");
    /// assert_eq!(Type::Str.cspell_param(), "char*");
    /// ```
    pub fn cspell_param(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Str => "char*",
            Type::Void => "void",
            Type::None => "void /* unresolved */",
        }
    }

    /// The C spelling for a variable *declaration*. `STRING` becomes a
    /// sized `char[N]` array, `N` supplied by the caller from the
    /// variable's observed maximum string length.
    ///
    /// # Examples
    ///
    /// ```
    /// use whisper_ast::Type;
    ///
    /// assert_eq!(Type::Int.cspell_decl(None), "int");
    /// assert_eq!(Type::Str.cspell_decl(Some(5)), "char[6]");
    /// ```
    pub fn cspell_decl(self, max_observed_len: Option<usize>) -> String {
        match self {
            Type::Str => format!("char[{}]", max_observed_len.unwrap_or(0) + 1),
            other => other.cspell_param().to_string(),
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, Type::None)
    }
}

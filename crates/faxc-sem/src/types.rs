//! The semantic type lattice (§3, §4.4): what the type checker computes
//! for every expression and validates every statement against. Distinct
//! from `faxc_par::TypeExpr`, which is only the syntax the parser read.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Bool,
    String,
    Array { len: i64, elem: Box<Type> },
    Func { params: Vec<Type>, ret: Option<Box<Type>> },
    /// The absence of a value type: statements, and calls to functions
    /// with no declared return type.
    Void,
}

impl Type {
    /// Structural equality, ported from the original `types.Same`: two
    /// types are equal exactly when their tags and recursive components
    /// match exactly. No implicit conversions exist in this language.
    pub fn same(&self, other: &Type) -> bool {
        self == other
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn from_syntax(ty: &faxc_par::TypeExpr) -> Type {
        match ty {
            faxc_par::TypeExpr::Int => Type::Int,
            faxc_par::TypeExpr::Bool => Type::Bool,
            faxc_par::TypeExpr::String => Type::String,
            faxc_par::TypeExpr::Array { len, elem } => Type::Array {
                len: *len,
                elem: Box::new(Type::from_syntax(elem)),
            },
            faxc_par::TypeExpr::Func { params, ret } => Type::Func {
                params: params.iter().map(Type::from_syntax).collect(),
                ret: ret.as_ref().map(|r| Box::new(Type::from_syntax(r))),
            },
        }
    }

    /// The inverse of `from_syntax`, used by the type checker to write an
    /// inferred type back onto a `Stmt::VarDecl.declared_type` (§4.4).
    /// Panics on `Void`: a declaration's inferred type is never void —
    /// the checker rejects a void initializer before this is reached.
    pub fn to_syntax(&self) -> faxc_par::TypeExpr {
        match self {
            Type::Int => faxc_par::TypeExpr::Int,
            Type::Bool => faxc_par::TypeExpr::Bool,
            Type::String => faxc_par::TypeExpr::String,
            Type::Array { len, elem } => {
                faxc_par::TypeExpr::Array { len: *len, elem: Box::new(elem.to_syntax()) }
            }
            Type::Func { params, ret } => faxc_par::TypeExpr::Func {
                params: params.iter().map(Type::to_syntax).collect(),
                ret: ret.as_ref().map(|r| Box::new(r.to_syntax())),
            },
            Type::Void => unreachable!("inferred declaration type is never void"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::String => write!(f, "string"),
            Type::Array { len, elem } => write!(f, "[{len}]{elem}"),
            Type::Func { params, ret } => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")?;
                if let Some(ret) = ret {
                    write!(f, " -> {ret}")?;
                }
                Ok(())
            }
            Type::Void => write!(f, "void"),
        }
    }
}

//! Side tables populated by the resolver and type checker (§3): `refs`
//! (name-using node → declaring node) and `types` (expression → semantic
//! type). Both are keyed by arena handle, written by exactly one stage,
//! and read-only thereafter (Design Notes §10).

use faxc_par::{ExprId, StmtId};
use faxc_util::FxHashMap;

use crate::types::Type;

/// A declaring node: either a `Stmt::VarDecl`/`Stmt::FuncDecl`, or the
/// `n`th parameter of a particular `Stmt::FuncDecl` (parameters are not
/// arena nodes of their own — §3 calls them "variable declarations" that
/// live inside the function declaration's parameter list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclId {
    Stmt(StmtId),
    Param(StmtId, usize),
}

/// A compiler-recognized intrinsic, called by name but never declared
/// anywhere in source (§7). `print` is the only one this language has.
/// Not a keyword: `faxc-lex` tokenizes it as a plain identifier, so it
/// only becomes a builtin when it appears in callee position and no
/// ordinary declaration already claims the name (user code is always
/// free to shadow it with `func print(...)` or `var print = ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
}

impl Builtin {
    pub fn by_name(name: &str) -> Option<Builtin> {
        match name {
            "print" => Some(Builtin::Print),
            _ => None,
        }
    }
}

/// `refs`: every identifier reference, `return`, and `break`/`continue`
/// maps to the node it resolved to (a declaration, enclosing function,
/// or enclosing loop respectively). A call's callee identifier resolves
/// to either `expr_refs` (an ordinary declaration) or `builtins` (an
/// intrinsic), never both.
#[derive(Debug, Default)]
pub struct RefTable {
    expr_refs: FxHashMap<ExprId, DeclId>,
    stmt_refs: FxHashMap<StmtId, StmtId>,
    builtins: FxHashMap<ExprId, Builtin>,
}

impl RefTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_expr_ref(&mut self, expr: ExprId, decl: DeclId) {
        self.expr_refs.insert(expr, decl);
    }

    pub fn expr_ref(&self, expr: ExprId) -> Option<DeclId> {
        self.expr_refs.get(&expr).copied()
    }

    /// Records which enclosing function or loop a `return`/`break`/
    /// `continue` statement targets.
    pub fn insert_stmt_ref(&mut self, stmt: StmtId, target: StmtId) {
        self.stmt_refs.insert(stmt, target);
    }

    pub fn stmt_ref(&self, stmt: StmtId) -> Option<StmtId> {
        self.stmt_refs.get(&stmt).copied()
    }

    pub fn insert_builtin(&mut self, expr: ExprId, builtin: Builtin) {
        self.builtins.insert(expr, builtin);
    }

    pub fn builtin(&self, expr: ExprId) -> Option<Builtin> {
        self.builtins.get(&expr).copied()
    }
}

/// `types`: the semantic type computed for every expression. Invariant 1
/// (§9): every expression handle present in the final tree has an entry
/// here by the time the type checker returns.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: FxHashMap<ExprId, Type>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, expr: ExprId, ty: Type) {
        self.types.insert(expr, ty);
    }

    pub fn get(&self, expr: ExprId) -> Option<&Type> {
        self.types.get(&expr)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

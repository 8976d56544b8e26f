//! The untyped syntax tree: two arenas (`Expr`, `Stmt`) owned by [`Ast`],
//! indexed by opaque handles so side tables populated by later stages
//! (`faxc-sem`, `faxc-explore`) can key on handles rather than pointers
//! (Design Notes, §10 — cyclic ownership).

use faxc_util::index_vec::{define_idx, IndexVec};
use faxc_util::span::Span;
use faxc_util::symbol::Symbol;

define_idx!(ExprId);
define_idx!(StmtId);

/// A parsed, not-yet-typed syntax tree. Owns every `Expr`/`Stmt` node by
/// value in a flat arena; nodes elsewhere in the tree refer to each other
/// only via `ExprId`/`StmtId`.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub exprs: IndexVec<ExprId, Expr>,
    pub stmts: IndexVec<StmtId, Stmt>,
    pub top_level: Vec<StmtId>,
}

impl Ast {
    pub fn new() -> Self {
        Ast {
            exprs: IndexVec::new(),
            stmts: IndexVec::new(),
            top_level: Vec::new(),
        }
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    pub fn stmt_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id]
    }
}

/// Prefix operators (§4.2): `!` and unary `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
}

/// Infix operators, grouped the way the type checker groups them (§4.4):
/// arithmetic, ordering, equality, short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

/// A syntactic type annotation, as written in source (`int`, `[3]int`,
/// `(int, int) -> bool`). Distinct from `faxc_sem::types::Type`, the
/// semantic type computed by the checker — this is just what the parser
/// read, before any name or arity validation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Int,
    Bool,
    String,
    Array {
        len: i64,
        elem: Box<TypeExpr>,
    },
    Func {
        params: Vec<TypeExpr>,
        ret: Option<Box<TypeExpr>>,
    },
}

/// One parameter in a function declaration's parameter list.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: Symbol,
    pub ty: TypeExpr,
    pub span: Span,
}

/// An expression node (§3). Every variant carries its own span so later
/// stages can report errors without threading position separately.
#[derive(Debug, Clone)]
pub enum Expr {
    Int {
        value: i64,
        span: Span,
    },
    Bool {
        value: bool,
        span: Span,
    },
    /// `value` holds the string's content with escapes already decoded
    /// (`faxc_par::lit::unescape`); the raw lexeme is not retained.
    Str {
        value: Symbol,
        span: Span,
    },
    Array {
        elems: Vec<ExprId>,
        span: Span,
    },
    Ident {
        name: Symbol,
        span: Span,
    },
    Prefix {
        op: UnOp,
        operand: ExprId,
        span: Span,
    },
    Infix {
        op: BinOp,
        lhs: ExprId,
        rhs: ExprId,
        span: Span,
    },
    Index {
        base: ExprId,
        index: ExprId,
        span: Span,
    },
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Int { span, .. }
            | Expr::Bool { span, .. }
            | Expr::Str { span, .. }
            | Expr::Array { span, .. }
            | Expr::Ident { span, .. }
            | Expr::Prefix { span, .. }
            | Expr::Infix { span, .. }
            | Expr::Index { span, .. }
            | Expr::Call { span, .. } => *span,
        }
    }
}

/// A statement node (§3). `VarDecl.declared_type` is the one field later
/// stages are permitted to write back onto (type inference, §4.4) — every
/// other field here is read-only once the parser returns.
#[derive(Debug, Clone)]
pub enum Stmt {
    Block {
        stmts: Vec<StmtId>,
        span: Span,
    },
    VarDecl {
        name: Symbol,
        declared_type: Option<TypeExpr>,
        init: Option<ExprId>,
        span: Span,
    },
    FuncDecl {
        name: Symbol,
        params: Vec<Param>,
        ret: Option<TypeExpr>,
        body: StmtId,
        span: Span,
    },
    If {
        cond: ExprId,
        then_block: StmtId,
        /// Either another `If` statement handle (`else if`) or a `Block`.
        else_branch: Option<StmtId>,
        span: Span,
    },
    For {
        cond: ExprId,
        body: StmtId,
        span: Span,
    },
    Return {
        value: Option<ExprId>,
        span: Span,
    },
    Continue {
        span: Span,
    },
    Break {
        span: Span,
    },
    Assign {
        target: ExprId,
        value: ExprId,
        span: Span,
    },
    ExprStmt {
        expr: ExprId,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block { span, .. }
            | Stmt::VarDecl { span, .. }
            | Stmt::FuncDecl { span, .. }
            | Stmt::If { span, .. }
            | Stmt::For { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Continue { span }
            | Stmt::Break { span }
            | Stmt::Assign { span, .. }
            | Stmt::ExprStmt { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_util::span::Span;

    #[test]
    fn arena_handles_are_stable_across_pushes() {
        let mut ast = Ast::new();
        let a = ast.exprs.push(Expr::Int { value: 1, span: Span::DUMMY });
        let b = ast.exprs.push(Expr::Int { value: 2, span: Span::DUMMY });
        assert_ne!(a, b);
        assert!(matches!(ast.expr(a), Expr::Int { value: 1, .. }));
        assert!(matches!(ast.expr(b), Expr::Int { value: 2, .. }));
    }

    #[test]
    fn stmt_mut_allows_declared_type_write_back() {
        let mut ast = Ast::new();
        let id = ast.stmts.push(Stmt::VarDecl {
            name: Symbol::intern("x"),
            declared_type: None,
            init: None,
            span: Span::DUMMY,
        });
        if let Stmt::VarDecl { declared_type, .. } = ast.stmt_mut(id) {
            *declared_type = Some(TypeExpr::Int);
        }
        assert!(matches!(
            ast.stmt(id),
            Stmt::VarDecl { declared_type: Some(TypeExpr::Int), .. }
        ));
    }

    #[test]
    fn expr_span_matches_constructed_span() {
        let span = Span::new(0, 1, 3, 4);
        let e = Expr::Int { value: 7, span };
        assert_eq!(e.span(), span);
    }
}

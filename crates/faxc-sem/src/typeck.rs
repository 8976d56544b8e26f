//! The type checker (§4.4): a single pass over the syntax tree that
//! computes a semantic type for every expression node (populating
//! [`TypeTable`]) and validates every statement. Consults [`RefTable`]
//! (built by [`crate::resolve::resolve`]) to look up the declaration an
//! identifier, `return`, or loop-control statement refers to.
//!
//! The one exception to strictly-forward dataflow lives here: a variable
//! declaration with an omitted type and a present initializer has its
//! `declared_type` written once, from `None` to `Some`, by
//! [`infer_var_decl`]. The resolver never reads a declaration's type, so
//! this write cannot invalidate anything the resolver already computed.

use faxc_par::{Ast, BinOp, Expr, ExprId, Stmt, StmtId, TypeExpr, UnOp};
use faxc_util::diagnostic::{DiagnosticCode, Handler};
use faxc_util::span::Span;

use crate::tables::{Builtin, DeclId, RefTable, TypeTable};
use crate::types::Type;

pub struct TypeChecker<'a> {
    ast: &'a Ast,
    refs: &'a RefTable,
    handler: &'a dyn Handler,
    types: TypeTable,
    mutations: Vec<(StmtId, TypeExpr)>,
}

/// Runs the type checker over `ast`, given the `refs` table the resolver
/// already built. Returns the populated [`TypeTable`] and the list of
/// declarations whose type was inferred (for the caller to apply — see
/// [`apply_inferred_types`]), since `ast` is borrowed immutably here.
pub fn check(ast: &Ast, refs: &RefTable, handler: &dyn Handler) -> (TypeTable, Vec<(StmtId, TypeExpr)>) {
    let mut checker = TypeChecker {
        ast,
        refs,
        handler,
        types: TypeTable::new(),
        mutations: Vec::new(),
    };
    for &id in &ast.top_level {
        checker.check_stmt(id, None);
    }
    (checker.types, checker.mutations)
}

/// Applies the inferred-type write-backs `check` recorded. Separate from
/// `check` because the checker only ever borrows `ast` immutably — the
/// mutation happens once, here, after the pass is complete.
pub fn apply_inferred_types(ast: &mut Ast, mutations: Vec<(StmtId, TypeExpr)>) {
    for (id, ty) in mutations {
        if let Stmt::VarDecl { declared_type, .. } = ast.stmt_mut(id) {
            *declared_type = Some(ty);
        }
    }
}

impl<'a> TypeChecker<'a> {
    fn error(&self, span: Span, message: impl Into<String>) {
        self.handler
            .build_error(span, message.into())
            .code(DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH)
            .emit(self.handler);
    }

    fn decl_type(&self, decl: DeclId) -> Type {
        match decl {
            DeclId::Stmt(id) => match self.ast.stmt(id) {
                Stmt::VarDecl { declared_type: Some(ty), .. } => Type::from_syntax(ty),
                Stmt::VarDecl { declared_type: None, .. } => Type::Void,
                Stmt::FuncDecl { params, ret, .. } => Type::Func {
                    params: params.iter().map(|p| Type::from_syntax(&p.ty)).collect(),
                    ret: ret.as_ref().map(|r| Box::new(Type::from_syntax(r))),
                },
                _ => Type::Void,
            },
            DeclId::Param(func, index) => match self.ast.stmt(func) {
                Stmt::FuncDecl { params, .. } => Type::from_syntax(&params[index].ty),
                _ => Type::Void,
            },
        }
    }

    /// `ret_ty` is the declared return type of the innermost enclosing
    /// function, threaded down so `Return` can validate against it
    /// without a second scope walk (the resolver already recorded which
    /// function a `return` targets, in `refs`; this is just a cache of
    /// that function's return type for the duration of its body).
    fn check_stmt(&mut self, id: StmtId, ret_ty: Option<&Type>) {
        match self.ast.stmt(id).clone_shape() {
            StmtShape::Block(stmts) => {
                for s in stmts {
                    self.check_stmt(s, ret_ty);
                }
            }
            StmtShape::VarDecl { declared_type, init, span } => {
                self.check_var_decl(id, declared_type, init, span);
            }
            StmtShape::FuncDecl { ret, body, span } => {
                let ret_ty = ret.as_ref().map(Type::from_syntax);
                if matches!(ret_ty, Some(Type::Array { .. })) {
                    self.handler
                        .build_error(span, "functions returning an array by value are not supported".to_string())
                        .code(DiagnosticCode::E_SEMANTIC_UNSUPPORTED_ARRAY_VALUE)
                        .emit(self.handler);
                }
                self.check_stmt(body, ret_ty.as_ref());
            }
            StmtShape::If { cond, then_block, else_branch, span } => {
                self.require_bool(cond, span);
                self.check_stmt(then_block, ret_ty);
                if let Some(e) = else_branch {
                    self.check_stmt(e, ret_ty);
                }
            }
            StmtShape::For { cond, body, span } => {
                self.require_bool(cond, span);
                self.check_stmt(body, ret_ty);
            }
            StmtShape::Return { value, span } => {
                self.check_return(id, value, span, ret_ty);
            }
            StmtShape::Continue | StmtShape::Break => {}
            StmtShape::Assign { target, value, span } => {
                self.check_assign(target, value, span);
            }
            StmtShape::ExprStmt { expr } => {
                self.check_expr(expr);
            }
        }
    }

    fn require_bool(&mut self, cond: ExprId, span: Span) {
        let ty = self.check_expr(cond);
        if ty != Type::Bool {
            self.error(span, format!("condition must be bool, found {ty}"));
        }
    }

    fn check_var_decl(&mut self, id: StmtId, declared: Option<TypeExpr>, init: Option<ExprId>, span: Span) {
        match (declared, init) {
            (Some(declared), Some(init_id)) => {
                let declared_ty = Type::from_syntax(&declared);
                let init_ty = self.check_expr(init_id);
                if init_ty != declared_ty {
                    self.error(
                        span,
                        format!("initializer has type {init_ty}, declared type is {declared_ty}"),
                    );
                }
            }
            (None, Some(init_id)) => {
                let init_ty = self.check_expr(init_id);
                if init_ty.is_void() {
                    self.error(span, "cannot infer type from a void-valued initializer".to_string());
                } else {
                    self.mutations.push((id, init_ty.to_syntax()));
                }
            }
            (Some(_), None) => {}
            (None, None) => {
                self.error(span, "variable declaration needs a type annotation or an initializer".to_string());
            }
        }
    }

    fn check_return(&mut self, id: StmtId, value: Option<ExprId>, span: Span, ret_ty: Option<&Type>) {
        let _ = self.refs.stmt_ref(id);
        match (value, ret_ty) {
            (Some(v), Some(ret_ty)) => {
                let value_ty = self.check_expr(v);
                if &value_ty != ret_ty {
                    self.error(span, format!("returned {value_ty}, function declares {ret_ty}"));
                }
            }
            (Some(v), None) => {
                self.check_expr(v);
                self.error(span, "function has no declared return type, but 'return' has a value".to_string());
            }
            (None, Some(ret_ty)) => {
                self.error(span, format!("function declares return type {ret_ty}, but 'return' has no value"));
            }
            (None, None) => {}
        }
    }

    fn check_assign(&mut self, target: ExprId, value: ExprId, span: Span) {
        match self.ast.expr(target) {
            Expr::Ident { .. } | Expr::Index { .. } => {}
            _ => self.error(span, "assignment target must be a variable or index expression".to_string()),
        }
        let target_ty = self.check_expr(target);
        let value_ty = self.check_expr(value);
        if target_ty.is_void() || value_ty.is_void() {
            self.error(span, "cannot assign a void value".to_string());
        } else if target_ty != value_ty {
            self.error(span, format!("cannot assign {value_ty} to target of type {target_ty}"));
        }
    }

    fn check_expr(&mut self, id: ExprId) -> Type {
        let ty = self.infer_expr(id);
        self.types.insert(id, ty.clone());
        ty
    }

    fn infer_expr(&mut self, id: ExprId) -> Type {
        match self.ast.expr(id).clone() {
            Expr::Int { .. } => Type::Int,
            Expr::Bool { .. } => Type::Bool,
            Expr::Str { .. } => Type::String,
            Expr::Array { elems, span } => self.infer_array(&elems, span),
            Expr::Ident { name, span } => self.infer_ident(id, name, span),
            Expr::Prefix { op, operand, span } => self.infer_prefix(op, operand, span),
            Expr::Infix { op, lhs, rhs, span } => self.infer_infix(op, lhs, rhs, span),
            Expr::Index { base, index, span } => self.infer_index(base, index, span),
            Expr::Call { callee, args, span } => self.infer_call(callee, &args, span),
        }
    }

    fn infer_array(&mut self, elems: &[ExprId], span: Span) -> Type {
        if elems.is_empty() {
            self.error(span, "array literal cannot be empty".to_string());
            return Type::Array { len: 0, elem: Box::new(Type::Void) };
        }
        let elem_ty = self.check_expr(elems[0]);
        for &e in &elems[1..] {
            let ty = self.check_expr(e);
            if ty != elem_ty {
                self.error(
                    self.ast.expr(e).span(),
                    format!("array element has type {ty}, expected {elem_ty}"),
                );
            }
        }
        Type::Array { len: elems.len() as i64, elem: Box::new(elem_ty) }
    }

    fn infer_ident(&self, id: ExprId, name: faxc_util::Symbol, span: Span) -> Type {
        match self.refs.expr_ref(id) {
            Some(decl) => self.decl_type(decl),
            None => {
                self.error(span, format!("internal: unresolved identifier '{}'", name.as_str()));
                Type::Void
            }
        }
    }

    fn infer_prefix(&mut self, op: UnOp, operand: ExprId, span: Span) -> Type {
        let ty = self.check_expr(operand);
        match op {
            UnOp::Not => {
                if ty != Type::Bool {
                    self.error(span, format!("'!' requires bool, found {ty}"));
                }
                Type::Bool
            }
            UnOp::Neg => {
                if ty != Type::Int {
                    self.error(span, format!("unary '-' requires int, found {ty}"));
                }
                Type::Int
            }
        }
    }

    fn infer_infix(&mut self, op: BinOp, lhs: ExprId, rhs: ExprId, span: Span) -> Type {
        let lhs_ty = self.check_expr(lhs);
        let rhs_ty = self.check_expr(rhs);
        match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => {
                self.require_both(&lhs_ty, &rhs_ty, Type::Int, op, span);
                Type::Int
            }
            BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq => {
                self.require_both(&lhs_ty, &rhs_ty, Type::Int, op, span);
                Type::Bool
            }
            BinOp::And | BinOp::Or => {
                self.require_both(&lhs_ty, &rhs_ty, Type::Bool, op, span);
                Type::Bool
            }
            BinOp::Eq | BinOp::NotEq => {
                if lhs_ty.is_void() || rhs_ty.is_void() || lhs_ty != rhs_ty {
                    self.error(span, format!("cannot compare {lhs_ty} and {rhs_ty}"));
                }
                Type::Bool
            }
        }
    }

    fn require_both(&mut self, lhs: &Type, rhs: &Type, want: Type, op: BinOp, span: Span) {
        if *lhs != want || *rhs != want {
            self.error(span, format!("'{}' requires both operands {want}, found {lhs} and {rhs}", op_symbol(op)));
        }
    }

    fn infer_index(&mut self, base: ExprId, index: ExprId, span: Span) -> Type {
        let base_ty = self.check_expr(base);
        let index_ty = self.check_expr(index);
        if index_ty != Type::Int {
            self.error(span, format!("array index must be int, found {index_ty}"));
        }
        match base_ty {
            Type::Array { elem, .. } => *elem,
            other => {
                self.error(span, format!("cannot index into {other}"));
                Type::Void
            }
        }
    }

    fn infer_call(&mut self, callee: ExprId, args: &[ExprId], span: Span) -> Type {
        if let Some(builtin) = self.refs.builtin(callee) {
            return self.infer_builtin_call(builtin, args, span);
        }
        let callee_ty = self.check_expr(callee);
        let arg_tys: Vec<Type> = args.iter().map(|&a| self.check_expr(a)).collect();
        match callee_ty {
            Type::Func { params, ret } => {
                if params.len() != arg_tys.len() {
                    self.error(
                        span,
                        format!("expected {} argument(s), found {}", params.len(), arg_tys.len()),
                    );
                } else {
                    for (i, (want, got)) in params.iter().zip(arg_tys.iter()).enumerate() {
                        if want != got {
                            self.error(span, format!("argument {} has type {got}, expected {want}", i + 1));
                        }
                    }
                }
                ret.map(|r| *r).unwrap_or(Type::Void)
            }
            other => {
                self.error(span, format!("cannot call a value of type {other}"));
                Type::Void
            }
        }
    }

    /// Builtins never go through `decl_type`/`Type::Func` — there is no
    /// declaration node for them to look up a signature on, so each
    /// variant validates its own arguments directly (§7: `print` takes
    /// exactly one `int`, `bool`, or `string` argument and yields
    /// `Void`). Every argument is still type-checked even on an arity
    /// error, so `self.types` stays total over the call's subtree.
    fn infer_builtin_call(&mut self, builtin: Builtin, args: &[ExprId], span: Span) -> Type {
        match builtin {
            Builtin::Print => {
                if args.len() != 1 {
                    self.error(
                        span,
                        format!("'print' takes exactly 1 argument, found {}", args.len()),
                    );
                    for &a in args {
                        self.check_expr(a);
                    }
                    return Type::Void;
                }
                let ty = self.check_expr(args[0]);
                if !matches!(ty, Type::Int | Type::Bool | Type::String) {
                    self.error(span, format!("'print' cannot format a value of type {ty}"));
                }
                Type::Void
            }
        }
    }
}

fn op_symbol(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Rem => "%",
        BinOp::Eq => "==",
        BinOp::NotEq => "!=",
        BinOp::Lt => "<",
        BinOp::LtEq => "<=",
        BinOp::Gt => ">",
        BinOp::GtEq => ">=",
        BinOp::And => "&&",
        BinOp::Or => "||",
    }
}

/// A flattened view of a statement's shape, independent of the handle
/// it's stored under — lets `check_stmt` match once without re-borrowing
/// `self.ast` inside each arm (every field below is `Copy` or cheaply
/// cloned, since `Expr`/`Stmt` nodes are small).
enum StmtShape {
    Block(Vec<StmtId>),
    VarDecl { declared_type: Option<TypeExpr>, init: Option<ExprId>, span: Span },
    FuncDecl { ret: Option<TypeExpr>, body: StmtId, span: Span },
    If { cond: ExprId, then_block: StmtId, else_branch: Option<StmtId>, span: Span },
    For { cond: ExprId, body: StmtId, span: Span },
    Return { value: Option<ExprId>, span: Span },
    Continue,
    Break,
    Assign { target: ExprId, value: ExprId, span: Span },
    ExprStmt { expr: ExprId },
}

trait ToShape {
    fn clone_shape(&self) -> StmtShape;
}

impl ToShape for Stmt {
    fn clone_shape(&self) -> StmtShape {
        match self {
            Stmt::Block { stmts, .. } => StmtShape::Block(stmts.clone()),
            Stmt::VarDecl { declared_type, init, span, .. } => StmtShape::VarDecl {
                declared_type: declared_type.clone(),
                init: *init,
                span: *span,
            },
            Stmt::FuncDecl { ret, body, span, .. } => {
                StmtShape::FuncDecl { ret: ret.clone(), body: *body, span: *span }
            }
            Stmt::If { cond, then_block, else_branch, span } => StmtShape::If {
                cond: *cond,
                then_block: *then_block,
                else_branch: *else_branch,
                span: *span,
            },
            Stmt::For { cond, body, span } => StmtShape::For { cond: *cond, body: *body, span: *span },
            Stmt::Return { value, span } => StmtShape::Return { value: *value, span: *span },
            Stmt::Continue { .. } => StmtShape::Continue,
            Stmt::Break { .. } => StmtShape::Break,
            Stmt::Assign { target, value, span } => {
                StmtShape::Assign { target: *target, value: *value, span: *span }
            }
            Stmt::ExprStmt { expr, .. } => StmtShape::ExprStmt { expr: *expr },
        }
    }
}

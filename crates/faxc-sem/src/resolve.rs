//! The resolver (§4.3): one pass over the syntax tree building a
//! [`ScopeTree`] and populating [`RefTable`]. Function declarations are
//! pre-declared in their immediately enclosing block so mutual recursion
//! works; variable declarations are not hoisted, and hoisting does not
//! extend into nested blocks (§9 Open Questions).

use faxc_par::{Ast, Expr, ExprId, Stmt, StmtId};
use faxc_util::diagnostic::{DiagnosticCode, Handler};
use faxc_util::span::Span;

use crate::scope::{RibKind, ScopeTree};
use crate::tables::{Builtin, DeclId, RefTable};

pub fn resolve(ast: &Ast, handler: &dyn Handler) -> RefTable {
    let mut scope = ScopeTree::new();
    let mut table = RefTable::new();
    visit_block_stmts(ast, &ast.top_level, &mut scope, &mut table, handler);
    table
}

fn define_or_report_duplicate(
    scope: &mut ScopeTree,
    name: faxc_util::symbol::Symbol,
    decl: DeclId,
    span: Span,
    handler: &dyn Handler,
) {
    if !scope.define(name, decl) {
        handler
            .build_error(span, format!("'{}' is already defined in this scope", name.as_str()))
            .code(DiagnosticCode::E_PARSER_DUPLICATE_DEF)
            .emit(handler);
    }
}

/// Pre-declares every function declared directly in `stmts` (not inside
/// a nested block), then visits each statement in source order.
fn visit_block_stmts(
    ast: &Ast,
    stmts: &[StmtId],
    scope: &mut ScopeTree,
    table: &mut RefTable,
    handler: &dyn Handler,
) {
    for &id in stmts {
        if let Stmt::FuncDecl { name, span, .. } = ast.stmt(id) {
            define_or_report_duplicate(scope, *name, DeclId::Stmt(id), *span, handler);
        }
    }
    for &id in stmts {
        visit_stmt(ast, id, scope, table, handler);
    }
}

fn visit_stmt(
    ast: &Ast,
    id: StmtId,
    scope: &mut ScopeTree,
    table: &mut RefTable,
    handler: &dyn Handler,
) {
    match ast.stmt(id) {
        Stmt::Block { stmts, .. } => {
            scope.enter_scope(RibKind::Block);
            visit_block_stmts(ast, stmts, scope, table, handler);
            scope.exit_scope();
        }
        Stmt::VarDecl { name, init, span, .. } => {
            if let Some(init) = init {
                visit_expr(ast, *init, scope, table, handler);
            }
            define_or_report_duplicate(scope, *name, DeclId::Stmt(id), *span, handler);
        }
        Stmt::FuncDecl { params, body, .. } => {
            scope.enter_scope(RibKind::Function(id));
            for (i, param) in params.iter().enumerate() {
                define_or_report_duplicate(
                    scope,
                    param.name,
                    DeclId::Param(id, i),
                    param.span,
                    handler,
                );
            }
            visit_stmt(ast, *body, scope, table, handler);
            scope.exit_scope();
        }
        Stmt::If { cond, then_block, else_branch, .. } => {
            visit_expr(ast, *cond, scope, table, handler);
            visit_stmt(ast, *then_block, scope, table, handler);
            if let Some(else_id) = else_branch {
                visit_stmt(ast, *else_id, scope, table, handler);
            }
        }
        Stmt::For { cond, body, .. } => {
            scope.enter_scope(RibKind::Loop(id));
            visit_expr(ast, *cond, scope, table, handler);
            visit_stmt(ast, *body, scope, table, handler);
            scope.exit_scope();
        }
        Stmt::Return { value, span } => {
            if let Some(value) = value {
                visit_expr(ast, *value, scope, table, handler);
            }
            match scope.enclosing_function() {
                Some(func) => table.insert_stmt_ref(id, func),
                None => {
                    handler
                        .build_error(*span, "'return' outside any function".to_string())
                        .code(DiagnosticCode::E_SEMANTIC_RETURN_OUTSIDE_FUNCTION)
                        .emit(handler);
                }
            }
        }
        Stmt::Continue { span } | Stmt::Break { span } => {
            match scope.enclosing_loop() {
                Some(loop_id) => table.insert_stmt_ref(id, loop_id),
                None => {
                    handler
                        .build_error(*span, "loop control statement outside any loop".to_string())
                        .code(DiagnosticCode::E_SEMANTIC_LOOP_CONTROL_OUTSIDE_LOOP)
                        .emit(handler);
                }
            }
        }
        Stmt::Assign { target, value, .. } => {
            visit_expr(ast, *target, scope, table, handler);
            visit_expr(ast, *value, scope, table, handler);
        }
        Stmt::ExprStmt { expr, .. } => {
            visit_expr(ast, *expr, scope, table, handler);
        }
    }
}

fn visit_expr(
    ast: &Ast,
    id: ExprId,
    scope: &mut ScopeTree,
    table: &mut RefTable,
    handler: &dyn Handler,
) {
    match ast.expr(id) {
        Expr::Int { .. } | Expr::Bool { .. } | Expr::Str { .. } => {}
        Expr::Array { elems, .. } => {
            for &elem in elems {
                visit_expr(ast, elem, scope, table, handler);
            }
        }
        Expr::Ident { name, span } => match scope.resolve(*name) {
            Some(decl) => table.insert_expr_ref(id, decl),
            None => {
                handler
                    .build_error(*span, format!("undeclared name '{}'", name.as_str()))
                    .code(DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR)
                    .emit(handler);
            }
        },
        Expr::Prefix { operand, .. } => {
            visit_expr(ast, *operand, scope, table, handler);
        }
        Expr::Infix { lhs, rhs, .. } => {
            visit_expr(ast, *lhs, scope, table, handler);
            visit_expr(ast, *rhs, scope, table, handler);
        }
        Expr::Index { base, index, .. } => {
            visit_expr(ast, *base, scope, table, handler);
            visit_expr(ast, *index, scope, table, handler);
        }
        Expr::Call { callee, args, .. } => {
            visit_call_callee(ast, *callee, scope, table, handler);
            for &arg in args {
                visit_expr(ast, arg, scope, table, handler);
            }
        }
    }
}

/// A call's callee gets one extra chance before "undeclared name": an
/// ordinary declaration always wins (so user code can shadow a builtin
/// with `func print(...)` or `var print = ...`), and only a name that
/// stays unresolved after that falls back to a builtin-name lookup
/// (§7). Anything other than a plain identifier in callee position
/// (a call, an index, a parenthesized expression) can never name a
/// builtin, so it's visited the ordinary way.
fn visit_call_callee(
    ast: &Ast,
    callee: ExprId,
    scope: &mut ScopeTree,
    table: &mut RefTable,
    handler: &dyn Handler,
) {
    if let Expr::Ident { name, span } = ast.expr(callee) {
        match scope.resolve(*name) {
            Some(decl) => table.insert_expr_ref(callee, decl),
            None => match Builtin::by_name(name.as_str()) {
                Some(builtin) => table.insert_builtin(callee, builtin),
                None => {
                    handler
                        .build_error(*span, format!("undeclared name '{}'", name.as_str()))
                        .code(DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR)
                        .emit(handler);
                }
            },
        }
        return;
    }
    visit_expr(ast, callee, scope, table, handler);
}

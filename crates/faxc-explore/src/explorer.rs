//! The explorer (§4.5): a single pass over the typed tree that assigns
//! every declaration and literal its eventual physical representation —
//! stack offsets, global labels, and control-flow labels — before
//! `faxc-emit` writes a single instruction.

use faxc_par::{Ast, Expr, ExprId, Stmt, StmtId};
use faxc_sem::{DeclId, Type, TypeTable};

use crate::size::size_of;
use crate::tables::{Branches, FnLayout, GlobalArr, GlobalVar, Layout, LocalArr, LocalVar, StrEntry};

/// Runs the explorer over a fully type-checked `ast` (every
/// `VarDecl.declared_type` is `Some`, since `faxc_sem::check_program`
/// already applied its inferred-type write-backs). Label counters start
/// at zero and are never shared across invocations — constructing a
/// fresh `Explorer` per compilation is what makes two compilations of
/// the same error-free program byte-identical (§9's quantified
/// properties).
pub fn explore(ast: &Ast, types: &TypeTable) -> Layout {
    let mut explorer = Explorer::new(ast, types);
    for &id in &ast.top_level {
        explorer.visit_stmt(id);
    }
    explorer.layout
}

struct Explorer<'a> {
    ast: &'a Ast,
    types: &'a TypeTable,
    layout: Layout,
    global_counter: u32,
    string_counter: u32,
    array_counter: u32,
    branch_counter: u32,
    fn_counter: u32,
    offset: i64,
    in_function: bool,
}

impl<'a> Explorer<'a> {
    fn new(ast: &'a Ast, types: &'a TypeTable) -> Self {
        Explorer {
            ast,
            types,
            layout: Layout::new(),
            global_counter: 0,
            string_counter: 0,
            array_counter: 0,
            branch_counter: 0,
            fn_counter: 0,
            offset: 0,
            in_function: false,
        }
    }

    fn new_label(&mut self) -> String {
        let n = self.branch_counter;
        self.branch_counter += 1;
        format!(".L{n}")
    }

    /// Every function declaration gets a generated label, never its bare
    /// source name: two functions of the same name declared in disjoint
    /// nested scopes (legal — the resolver only rejects a collision
    /// within one scope) would otherwise both want the same assembly
    /// symbol (invariant 4, §9). The literal `main` symbol belongs to
    /// the synthesized top-level entry point `faxc-emit` builds around
    /// the program's top-level statements, not to any `Stmt::FuncDecl` —
    /// a source-level `func main() {}` is just another function here.
    fn fn_label(&mut self, name: &str) -> String {
        let n = self.fn_counter;
        self.fn_counter += 1;
        format!(".F{n}_{name}")
    }

    /// Reserves the next slot in the current function's frame for a
    /// value of `size` bytes, per §4.5's `align(offset + size, size)`,
    /// and returns the offset to record.
    fn alloc_local(&mut self, size: i64) -> i64 {
        let new_offset = faxc_abi::align_up(self.offset + size, size.max(1));
        self.offset = new_offset;
        new_offset
    }

    fn visit_stmt(&mut self, id: StmtId) {
        match self.ast.stmt(id).clone() {
            Stmt::Block { stmts, .. } => {
                for s in stmts {
                    self.visit_stmt(s);
                }
            }
            Stmt::VarDecl { name, declared_type, init, .. } => {
                let ty = Type::from_syntax(
                    declared_type.as_ref().expect("type checker fills in every declared_type"),
                );
                let size = size_of(&ty);

                if let Some(init_id) = init {
                    self.visit_expr(init_id);
                }

                if self.in_function {
                    let offset = self.alloc_local(size);
                    self.layout.lvars.insert(DeclId::Stmt(id), LocalVar { offset, size });
                } else {
                    let label = format!(".GV{}_{}", self.global_counter, name.as_str());
                    self.global_counter += 1;
                    self.layout.gvars.insert(id, GlobalVar { label, size });
                }
            }
            Stmt::FuncDecl { name, params, body, .. } => {
                let saved_offset = self.offset;
                let saved_in_function = self.in_function;
                self.offset = 0;
                self.in_function = true;

                for (i, param) in params.iter().enumerate() {
                    let size = size_of(&Type::from_syntax(&param.ty));
                    let offset = self.alloc_local(size);
                    self.layout.lvars.insert(DeclId::Param(id, i), LocalVar { offset, size });
                }

                self.visit_stmt(body);

                let frame_size = faxc_abi::align_up(self.offset, faxc_abi::STACK_ALIGN);
                let label = self.fn_label(name.as_str());
                self.layout.fns.insert(id, FnLayout { label, frame_size });
                let epilogue = self.new_label();
                self.layout.branches.insert(id, Branches::Func { epilogue });

                self.offset = saved_offset;
                self.in_function = saved_in_function;
            }
            Stmt::If { cond, then_block, else_branch, .. } => {
                self.visit_expr(cond);
                let end = self.new_label();
                let else_label = else_branch.map(|_| self.new_label());
                self.layout.branches.insert(id, Branches::If { end, else_label });
                self.visit_stmt(then_block);
                if let Some(e) = else_branch {
                    self.visit_stmt(e);
                }
            }
            Stmt::For { cond, body, .. } => {
                let head = self.new_label();
                let tail = self.new_label();
                self.layout.branches.insert(id, Branches::For { head, tail });
                self.visit_expr(cond);
                self.visit_stmt(body);
            }
            Stmt::Return { value, .. } => {
                if let Some(v) = value {
                    self.visit_expr(v);
                }
            }
            Stmt::Continue { .. } | Stmt::Break { .. } => {}
            Stmt::Assign { target, value, .. } => {
                self.visit_expr(target);
                self.visit_expr(value);
            }
            Stmt::ExprStmt { expr, .. } => self.visit_expr(expr),
        }
    }

    fn visit_expr(&mut self, id: ExprId) {
        match self.ast.expr(id).clone() {
            Expr::Int { .. } | Expr::Bool { .. } | Expr::Ident { .. } => {}
            Expr::Str { .. } => {
                let label = format!(".LC{}", self.string_counter);
                self.string_counter += 1;
                self.layout.strs.insert(id, StrEntry { label });
            }
            Expr::Array { elems, .. } => {
                for &e in &elems {
                    self.visit_expr(e);
                }
                let elem_size = elems
                    .first()
                    .and_then(|&e| self.types.get(e))
                    .map(size_of)
                    .unwrap_or(0);
                let len = elems.len() as i64;
                if self.in_function {
                    let offset = self.alloc_local(len * elem_size);
                    self.layout
                        .larrs
                        .insert(id, LocalArr { offset, len, elem_size });
                } else {
                    let label = format!(".AR{}", self.array_counter);
                    self.array_counter += 1;
                    self.layout
                        .garrs
                        .insert(id, GlobalArr { label, len, elem_size });
                }
            }
            Expr::Prefix { operand, .. } => self.visit_expr(operand),
            Expr::Infix { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            Expr::Index { base, index, .. } => {
                self.visit_expr(base);
                self.visit_expr(index);
            }
            Expr::Call { callee, args, .. } => {
                self.visit_expr(callee);
                for a in args {
                    self.visit_expr(a);
                }
            }
        }
    }
}

//! The `.text` emitter (§4.6): walks the typed, explored tree and writes
//! Intel-syntax x86-64 instructions implementing the one-register
//! evaluation convention — every expression's value ends up in `rax`
//! (or its `al` alias for `Bool`-typed results).
//!
//! Two kinds of "value" cross this boundary: scalars (`Int`/`Bool`/
//! `String`/`Func`, always a single register-sized word) and arrays
//! (always referred to by their base address, never copied through
//! registers directly — `eval_array_addr` / `copy_bytes_between` do the
//! element-wise work `eval_scalar` doesn't need to).

use faxc_par::{Ast, BinOp, Expr, ExprId, Stmt, StmtId, UnOp};
use faxc_sem::{Builtin, DeclId, RefTable, Type, TypeTable};
use faxc_explore::{Branches, Layout};
use faxc_abi::Register;

use crate::buffer::AsmBuffer;
use crate::data::{PRINT_BOOL_FALSE_LABEL, PRINT_BOOL_TRUE_LABEL, PRINT_INT_FMT_LABEL};

/// Where a value of fixed size lives: a positive, `rbp`-relative stack
/// offset, or a `rip`-relative global label (possibly with a constant
/// byte offset folded in, for array elements — `label+16` is ordinary
/// GAS symbol arithmetic).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Loc {
    Stack(i64),
    Global(String),
}

impl Loc {
    fn element(&self, elem_size: i64, index: i64) -> Loc {
        match self {
            Loc::Stack(off) => Loc::Stack(off - index * elem_size),
            Loc::Global(label) if index == 0 => Loc::Global(label.clone()),
            Loc::Global(label) => Loc::Global(format!("{label}+{}", index * elem_size)),
        }
    }
}

enum Resolved {
    Var(Loc, i64),
    Func(String),
}

pub struct Emitter<'a> {
    ast: &'a Ast,
    refs: &'a RefTable,
    types: &'a TypeTable,
    layout: &'a Layout,
    buf: AsmBuffer,
    sc_counter: u32,
}

impl<'a> Emitter<'a> {
    /// Writes into `buf` rather than a fresh buffer of its own, so the
    /// caller can lay `.data`/`.rodata` down first and hand the same
    /// sink across into `.text` emission.
    pub fn new(ast: &'a Ast, refs: &'a RefTable, types: &'a TypeTable, layout: &'a Layout, buf: AsmBuffer) -> Self {
        Emitter { ast, refs, types, layout, buf, sc_counter: 0 }
    }

    pub fn into_buffer(self) -> AsmBuffer {
        self.buf
    }

    /// The program's top-level non-`FuncDecl` statements become the body
    /// of the literal `main` symbol — the only coherent reading of §9's
    /// end-to-end scenarios, which run bare `var`/`for`/call statements
    /// with no enclosing function at all (§10, entry-point design note).
    /// A source-level `func main() {}`, if present, is just another
    /// declared function (`faxc-explore` never special-cases its name);
    /// this is the one symbol that does.
    pub fn emit_entry(&mut self) {
        self.buf.blank();
        self.buf.label("main");
        self.buf.instr1("push", "rbp");
        self.buf.instr2("mov", "rbp", "rsp");

        let entry_stmts: Vec<StmtId> = self
            .ast
            .top_level
            .iter()
            .copied()
            .filter(|&id| !matches!(self.ast.stmt(id), Stmt::FuncDecl { .. }))
            .collect();
        for id in entry_stmts {
            self.emit_stmt(id);
        }

        self.buf.instr2("xor", "eax", "eax");
        self.buf.instr2("mov", "rsp", "rbp");
        self.buf.instr1("pop", "rbp");
        self.buf.instr0("ret");
    }

    pub fn emit_function(&mut self, func_id: StmtId) {
        let (params, body) = match self.ast.stmt(func_id).clone() {
            Stmt::FuncDecl { params, body, .. } => (params, body),
            other => unreachable!("not a function declaration: {other:?}"),
        };
        let f = self.layout.fns.get(&func_id).cloned().expect("explored function");
        let epilogue = match self.layout.branches.get(&func_id) {
            Some(Branches::Func { epilogue }) => epilogue.clone(),
            other => unreachable!("function has no epilogue label: {other:?}"),
        };

        self.buf.blank();
        self.buf.global(&f.label);
        self.buf.label(&f.label);
        self.buf.instr1("push", "rbp");
        self.buf.instr2("mov", "rbp", "rsp");
        if f.frame_size > 0 {
            self.buf.instr2("sub", "rsp", f.frame_size);
        }

        for (i, param) in params.iter().enumerate() {
            let decl = DeclId::Param(func_id, i);
            let local = *self.layout.lvars.get(&decl).expect("param layout");
            let ty = Type::from_syntax(&param.ty);
            let dst = Loc::Stack(local.offset);
            self.copy_param_into_slot(&dst, &ty, i);
        }

        self.emit_stmt(body);

        self.buf.label(&epilogue);
        self.buf.instr2("mov", "rsp", "rbp");
        self.buf.instr1("pop", "rbp");
        self.buf.instr0("ret");
    }

    /// Copies the `i`th parameter's incoming value (a register, or a
    /// stack slot above the return address, for the 7th parameter and
    /// beyond) into its local slot. Array-typed parameters arrive as an
    /// address (§10: function arguments pass arrays by address, with the
    /// callee performing the by-value copy itself) rather than a value —
    /// this is the step that makes good on "parameters are copied into
    /// their assigned local slots so that subsequent code treats them
    /// uniformly" for arrays, not just scalars.
    fn copy_param_into_slot(&mut self, dst: &Loc, ty: &Type, i: usize) {
        if let Type::Array { .. } = ty {
            self.lea_into(Register::R10, dst);
            if i < 6 {
                let src = faxc_abi::ARG_REGISTERS[i].qword();
                self.buf.instr2("mov", "r11", src);
            } else {
                let stack_off = 16 + 8 * (i as i64 - 6);
                let operand = format!("[rbp+{stack_off}]");
                self.buf.instr2("mov", "r11", operand);
            }
            self.copy_bytes_between(Register::R10, Register::R11, size_of_ty(ty));
        } else {
            let size = size_of_ty(ty);
            if i < 6 {
                let operand = self.operand(dst);
                let src = faxc_abi::ARG_REGISTERS[i].sized(size);
                self.buf.instr2("mov", operand, src);
            } else {
                let stack_off = 16 + 8 * (i as i64 - 6);
                let src_operand = format!("[rbp+{stack_off}]");
                self.buf.instr2("mov", "rax", src_operand);
                self.store_scalar(dst, size);
            }
        }
    }

    fn emit_stmt(&mut self, id: StmtId) {
        match self.ast.stmt(id).clone() {
            Stmt::Block { stmts, .. } => {
                for s in stmts {
                    self.emit_stmt(s);
                }
            }
            Stmt::VarDecl { declared_type, init, .. } => {
                let ty = Type::from_syntax(
                    declared_type.as_ref().expect("type checker fills in every declared_type"),
                );
                let decl = DeclId::Stmt(id);
                let (loc, _size) = self.resolved_var_loc(decl);
                match init {
                    Some(v) => self.emit_initialize(&loc, &ty, v),
                    None => {
                        // globals start zeroed via `.zero`; only a local
                        // slot's stale stack contents need clearing.
                        if matches!(loc, Loc::Stack(_)) {
                            self.emit_zero_init(&loc, &ty);
                        }
                    }
                }
            }
            // Emitted separately, once, by `emit_function`; declaring a
            // function has no code of its own to run at its own site.
            Stmt::FuncDecl { .. } => {}
            Stmt::If { cond, then_block, else_branch, .. } => {
                let (end, else_label) = match self.layout.branches.get(&id) {
                    Some(Branches::If { end, else_label }) => (end.clone(), else_label.clone()),
                    other => unreachable!("if statement has no branch labels: {other:?}"),
                };
                self.eval_scalar(cond);
                self.buf.instr2("test", "al", "al");
                match &else_label {
                    Some(lbl) => self.buf.instr1("jz", lbl.clone()),
                    None => self.buf.instr1("jz", end.clone()),
                }
                self.emit_stmt(then_block);
                if else_label.is_some() {
                    self.buf.instr1("jmp", end.clone());
                }
                if let Some(lbl) = &else_label {
                    self.buf.label(lbl);
                }
                if let Some(else_id) = else_branch {
                    self.emit_stmt(else_id);
                }
                self.buf.label(&end);
            }
            Stmt::For { cond, body, .. } => {
                let (head, tail) = match self.layout.branches.get(&id) {
                    Some(Branches::For { head, tail }) => (head.clone(), tail.clone()),
                    other => unreachable!("for statement has no branch labels: {other:?}"),
                };
                self.buf.label(&head);
                self.eval_scalar(cond);
                self.buf.instr2("test", "al", "al");
                self.buf.instr1("jz", tail.clone());
                self.emit_stmt(body);
                self.buf.instr1("jmp", head);
                self.buf.label(&tail);
            }
            Stmt::Return { value, .. } => {
                let func_id = self.refs.stmt_ref(id).expect("return resolved to its function");
                let epilogue = match self.layout.branches.get(&func_id) {
                    Some(Branches::Func { epilogue }) => epilogue.clone(),
                    other => unreachable!("enclosing function has no epilogue: {other:?}"),
                };
                if let Some(v) = value {
                    let ty = self.types.get(v).cloned().expect("typed return value");
                    if matches!(ty, Type::Array { .. }) {
                        unimplemented!(
                            "returning an array by value is not supported by this emitter"
                        );
                    }
                    self.eval_scalar(v);
                }
                self.buf.instr1("jmp", epilogue);
            }
            Stmt::Continue { .. } => {
                let for_id = self.refs.stmt_ref(id).expect("continue resolved to its loop");
                let head = match self.layout.branches.get(&for_id) {
                    Some(Branches::For { head, .. }) => head.clone(),
                    other => unreachable!("loop has no head label: {other:?}"),
                };
                self.buf.instr1("jmp", head);
            }
            Stmt::Break { .. } => {
                let for_id = self.refs.stmt_ref(id).expect("break resolved to its loop");
                let tail = match self.layout.branches.get(&for_id) {
                    Some(Branches::For { tail, .. }) => tail.clone(),
                    other => unreachable!("loop has no tail label: {other:?}"),
                };
                self.buf.instr1("jmp", tail);
            }
            Stmt::Assign { target, value, .. } => self.emit_assign(target, value),
            Stmt::ExprStmt { expr, .. } => {
                let ty = self.types.get(expr).cloned().unwrap_or(Type::Void);
                if matches!(ty, Type::Array { .. }) {
                    self.eval_array_addr(expr);
                } else {
                    self.eval_scalar(expr);
                }
            }
        }
    }

    fn emit_assign(&mut self, target: ExprId, value: ExprId) {
        let ty = self.types.get(value).cloned().expect("typed assignment value");
        match self.ast.expr(target).clone() {
            Expr::Ident { .. } => {
                let decl = self.refs.expr_ref(target).expect("resolved assignment target");
                let (loc, _size) = self.resolved_var_loc(decl);
                self.emit_initialize(&loc, &ty, value);
            }
            Expr::Index { .. } => {
                self.compute_addr(target);
                self.buf.instr1("push", "rax");
                if matches!(ty, Type::Array { .. }) {
                    self.eval_array_addr(value);
                    self.buf.instr2("mov", "r11", "rax");
                    self.buf.instr1("pop", "r10");
                    self.copy_bytes_between(Register::R10, Register::R11, size_of_ty(&ty));
                } else {
                    self.eval_scalar(value);
                    self.buf.instr1("pop", "rcx");
                    let size = size_of_ty(&ty);
                    let src = Register::Rax.sized(size);
                    self.buf.instr2("mov", "[rcx]", src);
                }
            }
            other => unreachable!("not an assignable lvalue: {other:?}"),
        }
    }

    fn emit_initialize(&mut self, dst: &Loc, ty: &Type, value_expr: ExprId) {
        if matches!(ty, Type::Array { .. }) {
            self.eval_array_addr(value_expr);
            self.lea_into(Register::R10, dst);
            self.buf.instr2("mov", "r11", "rax");
            self.copy_bytes_between(Register::R10, Register::R11, size_of_ty(ty));
        } else {
            self.eval_scalar(value_expr);
            self.store_scalar(dst, size_of_ty(ty));
        }
    }

    fn emit_zero_init(&mut self, dst: &Loc, ty: &Type) {
        let total = size_of_ty(ty);
        if matches!(ty, Type::Array { .. }) {
            self.lea_into(Register::R10, dst);
            let mut off = 0i64;
            let mut remaining = total;
            while remaining >= 8 {
                let operand = format!("qword ptr [r10+{off}]");
                self.buf.instr2("mov", operand, 0);
                off += 8;
                remaining -= 8;
            }
            while remaining > 0 {
                let operand = format!("byte ptr [r10+{off}]");
                self.buf.instr2("mov", operand, 0);
                off += 1;
                remaining -= 1;
            }
        } else {
            let width_kw = if total == 1 { "byte ptr" } else { "qword ptr" };
            let operand = self.operand(dst);
            let full = format!("{width_kw} {operand}");
            self.buf.instr2("mov", full, 0);
        }
    }

    // ---- scalar expression evaluation: result always ends in rax ----

    fn eval_scalar(&mut self, id: ExprId) {
        match self.ast.expr(id).clone() {
            Expr::Int { value, .. } => self.buf.instr2("mov", "rax", value),
            Expr::Bool { value, .. } => self.buf.instr2("mov", "rax", i64::from(value)),
            Expr::Str { .. } => {
                let label = self.layout.strs.get(&id).expect("string literal layout").label.clone();
                let operand = format!("[rip+{label}]");
                self.buf.instr2("lea", "rax", operand);
            }
            Expr::Ident { .. } => {
                let decl = self.refs.expr_ref(id).expect("resolved identifier");
                match self.resolve_decl(decl) {
                    Resolved::Func(label) => {
                        let operand = format!("[rip+{label}]");
                        self.buf.instr2("lea", "rax", operand);
                    }
                    Resolved::Var(loc, size) => self.load_scalar(&loc, size),
                }
            }
            Expr::Array { .. } => {
                unreachable!("array literal evaluated via eval_array_addr, never eval_scalar")
            }
            Expr::Prefix { op, operand, .. } => {
                self.eval_scalar(operand);
                match op {
                    UnOp::Not => self.buf.instr2("xor", "rax", 1),
                    UnOp::Neg => self.buf.instr1("neg", "rax"),
                }
            }
            Expr::Infix { op, lhs, rhs, .. } => self.eval_infix(op, lhs, rhs),
            Expr::Index { .. } => {
                let ty = self.types.get(id).cloned().expect("typed index expression");
                let size = size_of_ty(&ty);
                self.compute_addr(id);
                if size == 1 {
                    self.buf.instr2("movzx", "rax", "byte ptr [rax]");
                } else {
                    self.buf.instr2("mov", "rax", "[rax]");
                }
            }
            Expr::Call { callee, args, .. } => self.emit_call(callee, &args),
        }
    }

    fn eval_infix(&mut self, op: BinOp, lhs: ExprId, rhs: ExprId) {
        if matches!(op, BinOp::And | BinOp::Or) {
            return self.eval_logical(op, lhs, rhs);
        }
        self.eval_scalar(lhs);
        self.buf.instr1("push", "rax");
        self.eval_scalar(rhs);
        self.buf.instr1("pop", "rcx"); // rcx = lhs, rax = rhs
        match op {
            BinOp::Add => {
                self.buf.instr2("add", "rcx", "rax");
                self.buf.instr2("mov", "rax", "rcx");
            }
            BinOp::Sub => {
                self.buf.instr2("sub", "rcx", "rax");
                self.buf.instr2("mov", "rax", "rcx");
            }
            BinOp::Mul => {
                self.buf.instr2("imul", "rcx", "rax");
                self.buf.instr2("mov", "rax", "rcx");
            }
            BinOp::Div | BinOp::Rem => {
                self.buf.instr2("mov", "r10", "rax"); // divisor
                self.buf.instr2("mov", "rax", "rcx"); // dividend
                self.buf.instr0("cqo");
                self.buf.instr1("idiv", "r10");
                if matches!(op, BinOp::Rem) {
                    self.buf.instr2("mov", "rax", "rdx");
                }
            }
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq => {
                self.buf.instr2("cmp", "rcx", "rax");
                let cc = match op {
                    BinOp::Eq => "sete",
                    BinOp::NotEq => "setne",
                    BinOp::Lt => "setl",
                    BinOp::LtEq => "setle",
                    BinOp::Gt => "setg",
                    BinOp::GtEq => "setge",
                    _ => unreachable!(),
                };
                self.buf.instr1(cc, "al");
                self.buf.instr2("movzx", "rax", "al");
            }
            BinOp::And | BinOp::Or => unreachable!("handled by eval_logical"),
        }
    }

    /// `&&`/`||` as real conditional jumps, never eager both-operand
    /// evaluation: the right operand may contain a call with observable
    /// side effects (§10, §9 scenario 4 — `1/0` is never reached).
    fn eval_logical(&mut self, op: BinOp, lhs: ExprId, rhs: ExprId) {
        let n = self.sc_counter;
        self.sc_counter += 1;
        let short = format!(".SC{n}_short");
        let end = format!(".SC{n}_end");

        self.eval_scalar(lhs);
        self.buf.instr2("test", "al", "al");
        match op {
            BinOp::And => self.buf.instr1("jz", short.clone()),
            BinOp::Or => self.buf.instr1("jnz", short.clone()),
            _ => unreachable!(),
        }
        self.eval_scalar(rhs);
        self.buf.instr1("jmp", end.clone());
        self.buf.label(&short);
        match op {
            BinOp::And => self.buf.instr2("mov", "rax", 0),
            BinOp::Or => self.buf.instr2("mov", "rax", 1),
            _ => unreachable!(),
        }
        self.buf.label(&end);
    }

    // ---- addressable (lvalue) expressions: result always an address in rax ----

    fn compute_addr(&mut self, id: ExprId) {
        match self.ast.expr(id).clone() {
            Expr::Ident { .. } => {
                let decl = self.refs.expr_ref(id).expect("resolved identifier");
                match self.resolve_decl(decl) {
                    Resolved::Var(loc, _size) => self.lea_into(Register::Rax, &loc),
                    Resolved::Func(label) => {
                        let operand = format!("[rip+{label}]");
                        self.buf.instr2("lea", "rax", operand);
                    }
                }
            }
            Expr::Index { base, index, .. } => {
                let base_ty = self.types.get(base).cloned().expect("typed index base");
                let elem_size = match &base_ty {
                    Type::Array { elem, .. } => size_of_ty(elem),
                    other => unreachable!("index base is not an array type: {other:?}"),
                };
                self.compute_addr(base);
                self.buf.instr1("push", "rax");
                self.eval_scalar(index);
                self.buf.instr1("pop", "rcx"); // rcx = base address
                if elem_size != 1 {
                    self.buf.instr2("imul", "rax", elem_size);
                }
                self.buf.instr2("add", "rcx", "rax");
                self.buf.instr2("mov", "rax", "rcx");
            }
            other => unreachable!("not an addressable expression: {other:?}"),
        }
    }

    /// Leaves the base address of an array-valued expression in `rax`.
    /// A call can never reach this function with an array-typed result:
    /// the type checker rejects a function declaration whose return type
    /// is an array (the ABI's hidden-return-pointer convention for large
    /// aggregates would need its own calling-convention leg this emitter
    /// does not build), so `Expr::Call` is unreachable here.
    fn eval_array_addr(&mut self, id: ExprId) {
        match self.ast.expr(id).clone() {
            Expr::Array { .. } => {
                // A global array literal's bytes are already constant in
                // `.rodata` (`faxc-emit::data` requires every element to
                // be a literal); writing them again at runtime would be a
                // store into read-only memory. Only a local (stack)
                // literal needs code to fill its region.
                if self.layout.larrs.contains_key(&id) {
                    self.materialize_array_literal(id);
                }
                let (loc, ..) = self.array_storage_loc(id);
                self.lea_into(Register::Rax, &loc);
            }
            Expr::Ident { .. } | Expr::Index { .. } => self.compute_addr(id),
            other => unreachable!("not an array-valued expression: {other:?}"),
        }
    }

    fn array_storage_loc(&self, id: ExprId) -> (Loc, i64, i64) {
        if let Some(l) = self.layout.larrs.get(&id) {
            (Loc::Stack(l.offset), l.elem_size, l.len)
        } else if let Some(g) = self.layout.garrs.get(&id) {
            (Loc::Global(g.label.clone()), g.elem_size, g.len)
        } else {
            unreachable!("array literal has no reserved storage")
        }
    }

    /// Writes every element of the array literal `id` into its own
    /// reserved region. Elements that are themselves array literals
    /// (`[[1, 2], [3, 4]]`) recurse through [`Self::emit_initialize`],
    /// which dispatches to [`Self::eval_array_addr`] and a byte-wise copy
    /// rather than a single scalar store.
    fn materialize_array_literal(&mut self, id: ExprId) {
        let (base, elem_size, _len) = self.array_storage_loc(id);
        let elems = match self.ast.expr(id).clone() {
            Expr::Array { elems, .. } => elems,
            other => unreachable!("not an array literal: {other:?}"),
        };
        for (i, elem_id) in elems.into_iter().enumerate() {
            let elem_ty = self.types.get(elem_id).cloned().expect("typed array element");
            let dst = base.element(elem_size, i as i64);
            self.emit_initialize(&dst, &elem_ty, elem_id);
        }
    }

    // ---- calls ----

    fn emit_call(&mut self, callee: ExprId, args: &[ExprId]) {
        if let Some(builtin) = self.refs.builtin(callee) {
            self.emit_builtin_call(builtin, args);
            return;
        }
        let n = args.len();
        let reg_count = n.min(6);
        let stack_count = n.saturating_sub(6);
        let direct_label = self.direct_callee_label(callee);
        let indirect = direct_label.is_none();
        let total_live = stack_count + usize::from(indirect);
        let pad = total_live % 2 == 1;

        if pad {
            self.buf.instr2("sub", "rsp", 8);
        }
        if indirect {
            self.eval_scalar(callee);
            self.buf.instr1("push", "rax");
        }
        for i in (reg_count..n).rev() {
            self.eval_arg_into_rax(args[i]);
            self.buf.instr1("push", "rax");
        }
        for &arg in &args[..reg_count] {
            self.eval_arg_into_rax(arg);
            self.buf.instr1("push", "rax");
        }
        for i in (0..reg_count).rev() {
            let reg = faxc_abi::ARG_REGISTERS[i].qword();
            self.buf.instr1("pop", reg);
        }

        match direct_label {
            Some(label) => {
                self.buf.instr1("call", label);
            }
            None => {
                let offset = stack_count as i64 * 8;
                let operand = format!("qword ptr [rsp+{offset}]");
                self.buf.instr1("call", operand);
            }
        }

        let cleanup = (stack_count + usize::from(indirect) + usize::from(pad)) as i64 * 8;
        if cleanup > 0 {
            self.buf.instr2("add", "rsp", cleanup);
        }
    }

    fn emit_builtin_call(&mut self, builtin: Builtin, args: &[ExprId]) {
        match builtin {
            Builtin::Print => self.emit_print(args[0]),
        }
    }

    /// `printf`/`puts` are the two libc symbols `print` ever reaches for
    /// (§7: builtins compile to a plain `call` to an external C symbol
    /// this compiler never defines itself). `string` and `bool` both end
    /// up as a pointer to a NUL-terminated byte string, so they share
    /// `puts`, which appends its own trailing newline; `int` has no
    /// string form to reuse, so it goes through `printf` with a fixed
    /// `"%ld\n"` format instead, and `eax` must be zeroed first since
    /// `printf` is variadic and the SysV ABI uses `al` to say how many
    /// vector registers carry variadic arguments — none, here.
    fn emit_print(&mut self, arg: ExprId) {
        let ty = self.types.get(arg).cloned().expect("typed print argument");
        match ty {
            Type::String => {
                self.eval_scalar(arg);
                self.buf.instr2("mov", "rdi", "rax");
                self.buf.instr1("call", "puts");
            }
            Type::Int => {
                self.eval_scalar(arg);
                self.buf.instr2("mov", "rsi", "rax");
                let fmt_operand = format!("[rip+{PRINT_INT_FMT_LABEL}]");
                self.buf.instr2("lea", "rdi", fmt_operand);
                self.buf.instr2("xor", "eax", "eax");
                self.buf.instr1("call", "printf");
            }
            Type::Bool => {
                let n = self.sc_counter;
                self.sc_counter += 1;
                let false_lbl = format!(".PB{n}_false");
                let end_lbl = format!(".PB{n}_end");
                self.eval_scalar(arg);
                self.buf.instr2("test", "al", "al");
                self.buf.instr1("jz", false_lbl.clone());
                let true_operand = format!("[rip+{PRINT_BOOL_TRUE_LABEL}]");
                self.buf.instr2("lea", "rdi", true_operand);
                self.buf.instr1("jmp", end_lbl.clone());
                self.buf.label(&false_lbl);
                let false_operand = format!("[rip+{PRINT_BOOL_FALSE_LABEL}]");
                self.buf.instr2("lea", "rdi", false_operand);
                self.buf.label(&end_lbl);
                self.buf.instr1("call", "puts");
            }
            other => unreachable!(
                "'print' argument type {other:?} is rejected by the type checker before the emitter ever sees it"
            ),
        }
    }

    fn eval_arg_into_rax(&mut self, expr: ExprId) {
        let ty = self.types.get(expr).cloned().expect("typed call argument");
        if matches!(ty, Type::Array { .. }) {
            self.eval_array_addr(expr);
        } else {
            self.eval_scalar(expr);
        }
    }

    /// `Some(label)` when the callee is a plain identifier resolving
    /// directly to a `Stmt::FuncDecl` — the overwhelmingly common case,
    /// compiled to a bare `call label` with no runtime address
    /// computation. Anything else (a first-class function value held in
    /// a variable, or a call expression) is resolved at runtime instead.
    fn direct_callee_label(&self, callee: ExprId) -> Option<String> {
        if let Expr::Ident { .. } = self.ast.expr(callee) {
            if let Some(DeclId::Stmt(s)) = self.refs.expr_ref(callee) {
                if let Stmt::FuncDecl { .. } = self.ast.stmt(s) {
                    return self.layout.fns.get(&s).map(|f| f.label.clone());
                }
            }
        }
        None
    }

    // ---- shared helpers ----

    fn resolve_decl(&self, decl: DeclId) -> Resolved {
        match decl {
            DeclId::Param(_, _) => {
                let l = *self.layout.lvars.get(&decl).expect("parameter layout");
                Resolved::Var(Loc::Stack(l.offset), l.size)
            }
            DeclId::Stmt(s) => match self.ast.stmt(s) {
                Stmt::FuncDecl { .. } => {
                    let f = self.layout.fns.get(&s).expect("function layout");
                    Resolved::Func(f.label.clone())
                }
                Stmt::VarDecl { .. } => {
                    if let Some(g) = self.layout.gvars.get(&s) {
                        Resolved::Var(Loc::Global(g.label.clone()), g.size)
                    } else {
                        let l = *self.layout.lvars.get(&DeclId::Stmt(s)).expect("local var layout");
                        Resolved::Var(Loc::Stack(l.offset), l.size)
                    }
                }
                other => unreachable!("declaration points at a non-decl statement: {other:?}"),
            },
        }
    }

    fn resolved_var_loc(&self, decl: DeclId) -> (Loc, i64) {
        match self.resolve_decl(decl) {
            Resolved::Var(loc, size) => (loc, size),
            Resolved::Func(_) => unreachable!("an assignment target cannot be a function name"),
        }
    }

    fn operand(&self, loc: &Loc) -> String {
        match loc {
            Loc::Stack(off) => format!("[rbp-{off}]"),
            Loc::Global(label) => format!("[rip+{label}]"),
        }
    }

    fn lea_into(&mut self, reg: Register, loc: &Loc) {
        let operand = self.operand(loc);
        let regname = reg.qword();
        self.buf.instr2("lea", regname, operand);
    }

    fn load_scalar(&mut self, loc: &Loc, size: i64) {
        let operand = self.operand(loc);
        if size == 1 {
            let src = format!("byte ptr {operand}");
            self.buf.instr2("movzx", "rax", src);
        } else {
            self.buf.instr2("mov", "rax", operand);
        }
    }

    fn store_scalar(&mut self, loc: &Loc, size: i64) {
        let operand = self.operand(loc);
        let src = Register::Rax.sized(size);
        self.buf.instr2("mov", operand, src);
    }

    fn copy_bytes_between(&mut self, dst: Register, src: Register, total: i64) {
        let mut off = 0i64;
        let mut remaining = total;
        while remaining >= 8 {
            let load = format!("[{src}+{off}]");
            self.buf.instr2("mov", "rax", load);
            let store = format!("[{dst}+{off}]");
            self.buf.instr2("mov", store, "rax");
            off += 8;
            remaining -= 8;
        }
        while remaining > 0 {
            let load = format!("[{src}+{off}]");
            self.buf.instr2("mov", "al", load);
            let store = format!("[{dst}+{off}]");
            self.buf.instr2("mov", store, "al");
            off += 1;
            remaining -= 1;
        }
    }
}

/// `sizeof` for the emitter's own purposes — identical to
/// `faxc_explore::size_of`, just re-exposed under this module so call
/// sites read `size_of_ty` instead of an import alias.
fn size_of_ty(ty: &Type) -> i64 {
    faxc_explore::size_of(ty)
}

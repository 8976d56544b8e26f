//! Emission of the `.data` and `.rodata` sections (§4.6, §7): every
//! global variable's reserved storage, every string literal's bytes,
//! and every global array literal's constant element sequence.

use faxc_par::{Ast, Expr, ExprId, Stmt};
use faxc_sem::{Builtin, RefTable, Type, TypeTable};
use faxc_explore::Layout;

use crate::buffer::AsmBuffer;

/// `printf`'s fixed format string for `print`ing an `int` (§7).
pub(crate) const PRINT_INT_FMT_LABEL: &str = ".LC_print_int_fmt";
/// The two fixed spellings `print`ing a `bool` picks between, handed to
/// `puts` rather than `printf` since neither needs a format string.
pub(crate) const PRINT_BOOL_TRUE_LABEL: &str = ".LC_print_true";
pub(crate) const PRINT_BOOL_FALSE_LABEL: &str = ".LC_print_false";

/// Global storage is always reserved zero-initialized with `.zero`, even
/// for variables with a computed initializer: this language has no
/// global-init section, so the synthesized top-level entry point writes
/// every global's real starting value at runtime, in source order,
/// before any code can observe it (§10, entry-point design note).
pub fn emit_data_section(buf: &mut AsmBuffer, ast: &Ast, layout: &Layout) {
    let mut entries: Vec<(&str, i64)> = layout
        .gvars
        .values()
        .map(|g| (g.label.as_str(), g.size))
        .collect();
    entries.sort_by_key(|(label, _)| label_order(label));

    if entries.is_empty() {
        return;
    }
    buf.directive(".data");
    for (label, size) in entries {
        buf.label(label);
        buf.instr1(".zero", size);
    }
    let _ = ast;
}

/// `.rodata` holds every string literal's decoded bytes and every
/// top-level array literal's constant element sequence. A global array
/// literal's elements must themselves be literal expressions (int, bool,
/// or string) — this mirrors the global/rodata placement decision in
/// `faxc-explore::explorer` (every array literal, direct initializer or
/// not, reserves its own region) and is the one restriction that makes
/// "global array literal lives in read-only memory" coherent: there is
/// no runtime code path that could write a computed value into
/// `.rodata`. A non-literal element in a *global* array literal is a
/// construct this compiler does not support; it is not rejected by the
/// type checker, so the emitter panics with a clear message rather than
/// emitting silently wrong bytes.
pub fn emit_rodata_section(buf: &mut AsmBuffer, ast: &Ast, layout: &Layout) {
    if layout.strs.is_empty() && layout.garrs.is_empty() {
        return;
    }
    buf.directive(".rodata");

    let mut strs: Vec<(&str, ExprId)> = layout
        .strs
        .iter()
        .map(|(&id, entry)| (entry.label.as_str(), id))
        .collect();
    strs.sort_by_key(|(label, _)| label_order(label));
    for (label, id) in strs {
        let bytes = match ast.expr(id) {
            Expr::Str { value, .. } => value.as_str().as_bytes().to_vec(),
            other => unreachable!("strs table entry points at a non-string node: {other:?}"),
        };
        buf.label(label);
        emit_byte_directive(buf, &bytes, true);
    }

    let mut arrs: Vec<(&str, ExprId)> = layout
        .garrs
        .iter()
        .map(|(&id, entry)| (entry.label.as_str(), id))
        .collect();
    arrs.sort_by_key(|(label, _)| label_order(label));
    for (label, id) in arrs {
        let elems = match ast.expr(id) {
            Expr::Array { elems, .. } => elems.clone(),
            other => unreachable!("garrs table entry points at a non-array node: {other:?}"),
        };
        buf.label(label);
        for &elem in &elems {
            emit_const_elem(buf, ast, layout, elem);
        }
    }
}

/// `print`'s format strings are the one piece of constant data this
/// compiler itself contributes rather than copying out of source (§7):
/// libc supplies no format-string-free integer/bool printer, so each
/// fixed spelling `print` might need is emitted once, but only if some
/// `print` call in the program actually needs it — a program with no
/// `print(int)` call carries no `"%ld\n"` constant.
pub fn emit_print_constants(buf: &mut AsmBuffer, ast: &Ast, refs: &RefTable, types: &TypeTable) {
    let (needs_int, needs_bool) = scan_print_argument_types(ast, refs, types);
    if !needs_int && !needs_bool {
        return;
    }
    buf.directive(".rodata");
    if needs_int {
        buf.label(PRINT_INT_FMT_LABEL);
        buf.instr1(".asciz", "\"%ld\\n\"");
    }
    if needs_bool {
        buf.label(PRINT_BOOL_TRUE_LABEL);
        buf.instr1(".asciz", "\"true\"");
        buf.label(PRINT_BOOL_FALSE_LABEL);
        buf.instr1(".asciz", "\"false\"");
    }
}

fn scan_print_argument_types(ast: &Ast, refs: &RefTable, types: &TypeTable) -> (bool, bool) {
    let mut needs_int = false;
    let mut needs_bool = false;
    for (_, expr) in ast.exprs.iter_enumerated() {
        let Expr::Call { callee, args, .. } = expr else { continue };
        if !matches!(refs.builtin(*callee), Some(Builtin::Print)) {
            continue;
        }
        match args.first().and_then(|&a| types.get(a)) {
            Some(Type::Int) => needs_int = true,
            Some(Type::Bool) => needs_bool = true,
            _ => {}
        }
    }
    (needs_int, needs_bool)
}

/// `layout` is needed only for the `String` case: a string element's own
/// `.LC<n>` label (already emitted by the loop above, since
/// `faxc-explore` visits an array literal's elements before reserving
/// the array's own storage) is referenced by pointer, not inlined.
fn emit_const_elem(buf: &mut AsmBuffer, ast: &Ast, layout: &Layout, id: ExprId) {
    match ast.expr(id) {
        Expr::Int { value, .. } => buf.instr1(".quad", value),
        Expr::Bool { value, .. } => buf.instr1(".byte", if *value { 1 } else { 0 }),
        // A nested array literal (`[2][2]int`'s `[[1, 2], [3, 4]]`) is
        // already laid out row-major in memory, so its elements just
        // flatten into the same `.rodata` run as their parent's.
        Expr::Array { elems, .. } => {
            let elems = elems.clone();
            for &e in &elems {
                emit_const_elem(buf, ast, layout, e);
            }
        }
        Expr::Str { .. } => {
            let label = layout.strs.get(&id).expect("string literal has a reserved label").label.clone();
            buf.instr1(".quad", label);
        }
        other => panic!(
            "a global array literal's elements must be literal constants \
             (int, bool, string, or a nested array literal); found {other:?} \
             — computed elements cannot be placed in .rodata, since there \
             is no runtime code path that writes into read-only memory"
        ),
    }
}

/// Writes `bytes` as a `.byte` directive, one line, comma-separated. A
/// terminating NUL is appended only for string content (`asciz`
/// semantics without relying on the assembler's own string-escaping,
/// which is finicky for control characters like `\t`/`\n`).
fn emit_byte_directive(buf: &mut AsmBuffer, bytes: &[u8], nul_terminate: bool) {
    let mut rendered = bytes.iter().map(|b| format!("{b:#04x}")).collect::<Vec<_>>();
    if nul_terminate {
        rendered.push("0x00".to_string());
    }
    buf.instr1(".byte", rendered.join(", "));
}

fn label_order(label: &str) -> u32 {
    label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_util::diagnostic::CollectingHandler;
    use faxc_util::span::{FileId, Span};

    fn check_src(src: &str) -> (Ast, RefTable, TypeTable) {
        let handler = CollectingHandler::new();
        let tokens = faxc_lex::Lexer::new(src, FileId::new(0), &handler).tokenize();
        let mut ast = faxc_par::parse(tokens, &handler);
        let (refs, types) = faxc_sem::check_program(&mut ast, &handler);
        assert!(!handler.has_errors(), "unexpected errors: {:?}", handler.diagnostics());
        (ast, refs, types)
    }

    #[test]
    fn print_of_an_int_literal_emits_only_the_int_format_constant() {
        let (ast, refs, types) = check_src("print(1);");
        let mut buf = AsmBuffer::new();
        emit_print_constants(&mut buf, &ast, &refs, &types);
        let out = buf.into_string();
        assert!(out.contains(PRINT_INT_FMT_LABEL));
        assert!(!out.contains(PRINT_BOOL_TRUE_LABEL));
    }

    #[test]
    fn print_of_a_bool_emits_only_the_bool_constants() {
        let (ast, refs, types) = check_src("print(true);");
        let mut buf = AsmBuffer::new();
        emit_print_constants(&mut buf, &ast, &refs, &types);
        let out = buf.into_string();
        assert!(out.contains(PRINT_BOOL_TRUE_LABEL));
        assert!(out.contains(PRINT_BOOL_FALSE_LABEL));
        assert!(!out.contains(PRINT_INT_FMT_LABEL));
    }

    #[test]
    fn a_program_with_no_print_call_emits_no_builtin_constants() {
        let (ast, refs, types) = check_src("var x: int = 1;");
        let mut buf = AsmBuffer::new();
        emit_print_constants(&mut buf, &ast, &refs, &types);
        assert!(buf.into_string().is_empty());
    }

    #[test]
    fn label_order_extracts_embedded_counter() {
        assert_eq!(label_order(".GV0_x"), 0);
        assert_eq!(label_order(".GV12_y"), 12);
        assert_eq!(label_order(".LC3"), 3);
    }

    #[test]
    fn byte_directive_renders_escape_bytes_exactly() {
        let mut buf = AsmBuffer::new();
        emit_byte_directive(&mut buf, b"a\tb\n", true);
        let out = buf.into_string();
        assert!(out.contains("0x61, 0x09, 0x62, 0x0a, 0x00"));
    }

    #[test]
    #[should_panic(expected = "literal constants")]
    fn const_elem_rejects_non_literal() {
        let mut ast = Ast::new();
        let inner = ast.exprs.push(Expr::Int { value: 1, span: Span::DUMMY });
        let array = ast.exprs.push(Expr::Array { elems: vec![inner], span: Span::DUMMY });
        let ident = ast.exprs.push(Expr::Ident { name: faxc_util::Symbol::intern("x"), span: Span::DUMMY });
        let mut buf = AsmBuffer::new();
        let layout = Layout::new();
        emit_const_elem(&mut buf, &ast, &layout, ident);
        let _ = array;
    }

    #[test]
    fn const_elem_flattens_a_nested_array_literal() {
        let mut ast = Ast::new();
        let a = ast.exprs.push(Expr::Int { value: 1, span: Span::DUMMY });
        let b = ast.exprs.push(Expr::Int { value: 2, span: Span::DUMMY });
        let row = ast.exprs.push(Expr::Array { elems: vec![a, b], span: Span::DUMMY });
        let mut buf = AsmBuffer::new();
        let layout = Layout::new();
        emit_const_elem(&mut buf, &ast, &layout, row);
        let out = buf.into_string();
        assert!(out.contains(".quad 1"));
        assert!(out.contains(".quad 2"));
    }
}

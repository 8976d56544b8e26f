//! `faxc-emit` — the final pipeline stage (§4.6, §7): turns a type-checked,
//! explored syntax tree into Intel-syntax GNU-assembler text ready to hand
//! to `as`/`ld` (or a driver that shells out to a system `cc`).
//!
//! No LLVM, no intermediate IR of its own — the arena-indexed AST plus
//! `faxc-sem`'s side tables plus `faxc-explore`'s physical layout are
//! already everything a straight-line instruction selector needs. Every
//! expression's value lands in `rax` by convention (§4.6); `codegen`
//! documents the rest of the calling/addressing conventions this crate
//! commits to.

pub mod buffer;
pub mod codegen;
pub mod data;

use faxc_par::{Ast, Stmt};
use faxc_sem::{RefTable, TypeTable};
use faxc_explore::Layout;

use buffer::AsmBuffer;
use codegen::Emitter;

/// Assembles the full `.s` file text for `ast`: header directive,
/// `.data`/`.rodata` sections, then `.text` with the synthesized entry
/// point followed by every declared function, in arena order.
///
/// Infallible by construction: every condition that could make this
/// stage fail (an unresolved identifier, a missing type, an ill-formed
/// array) is something the resolver, type checker, or explorer is
/// responsible for catching first — `faxc-drv` never calls this unless
/// `handler.has_errors()` is false (§8).
pub fn emit_program(ast: &Ast, refs: &RefTable, types: &TypeTable, layout: &Layout) -> String {
    let mut buf = AsmBuffer::new();
    buf.directive(".intel_syntax noprefix");
    data::emit_data_section(&mut buf, ast, layout);
    data::emit_rodata_section(&mut buf, ast, layout);
    data::emit_print_constants(&mut buf, ast, refs, types);
    buf.blank();
    buf.directive(".text");
    buf.global("main");

    let mut emitter = Emitter::new(ast, refs, types, layout, buf);
    emitter.emit_entry();
    for (id, stmt) in ast.stmts.iter_enumerated() {
        if matches!(stmt, Stmt::FuncDecl { .. }) {
            emitter.emit_function(id);
        }
    }
    emitter.into_buffer().into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_util::diagnostic::CollectingHandler;
    use faxc_util::span::FileId;

    fn compile(src: &str) -> String {
        let handler = CollectingHandler::new();
        let tokens = faxc_lex::Lexer::new(src, FileId::new(0), &handler).tokenize();
        let mut ast = faxc_par::parse(tokens, &handler);
        let (refs, types) = faxc_sem::check_program(&mut ast, &handler);
        assert!(!handler.has_errors(), "unexpected errors: {:?}", handler.diagnostics());
        let layout = faxc_explore::explore(&ast, &types);
        emit_program(&ast, &refs, &types, &layout)
    }

    #[test]
    fn bare_top_level_statements_run_inside_main() {
        let asm = compile("var x: int = 40 + 2;");
        assert!(asm.contains("main:"));
        assert!(asm.contains(".globl main"));
        assert!(asm.contains(".zero 8"));
    }

    #[test]
    fn a_source_level_main_function_is_mangled_not_literal() {
        let asm = compile("func main() { }");
        assert!(asm.contains("main:"), "the synthesized entry point is still emitted");
        assert!(asm.contains(".F0_main:"), "the declared function keeps its mangled label");
    }

    #[test]
    fn recursive_function_emits_a_direct_call_to_its_own_label() {
        let asm = compile(
            "func fact(n: int) -> int { if n == 0 { return 1; } return n * fact(n - 1); }",
        );
        assert!(asm.contains(".F0_fact:"));
        assert!(asm.contains("call .F0_fact"));
    }

    #[test]
    fn short_circuit_and_never_evaluates_its_right_operand_eagerly() {
        let asm = compile("var ok: bool = false && (1 / 0 == 0);");
        // a real conditional jump over the right operand, not eager evaluation
        assert!(asm.contains("jz .SC0_short") || asm.contains("test al, al"));
        assert!(asm.contains(".SC0_short:"));
    }

    #[test]
    fn string_literal_is_emitted_as_explicit_hex_bytes() {
        let asm = compile(r#"var s: string = "hi";"#);
        assert!(asm.contains("0x68, 0x69, 0x00"));
    }

    #[test]
    fn array_literal_initializer_reserves_and_copies_its_own_region() {
        let asm = compile("var a: [3]int = [1, 2, 3];");
        assert!(asm.contains(".quad 1"));
        assert!(asm.contains(".quad 2"));
        assert!(asm.contains(".quad 3"));
        // materialize into .AR region, then copy element-by-element into `a`
        assert!(asm.contains("lea r10") || asm.contains("lea rax"));
    }

    #[test]
    fn array_argument_is_copied_into_the_callees_own_slot() {
        let asm = compile(
            "func sum(a: [2]int) -> int { return a[0] + a[1]; } var x: int = sum([1, 2]);",
        );
        assert!(asm.contains(".F0_sum:"));
        // parameter copy-on-entry for an array-typed parameter
        assert!(asm.contains("mov r11, rdi"));
    }

    #[test]
    fn repeated_compilation_of_the_same_source_is_byte_identical() {
        let src = "func fact(n: int) -> int { if n == 0 { return 1; } return n * fact(n - 1); }";
        assert_eq!(compile(src), compile(src));
    }

    #[test]
    fn print_of_an_int_calls_printf_with_the_fixed_format_string() {
        let asm = compile("var x: int = 40 + 2; print(x);");
        assert!(asm.contains(".LC_print_int_fmt:"));
        assert!(asm.contains("call printf"));
    }

    #[test]
    fn print_of_a_string_literal_calls_puts_directly() {
        let asm = compile(r#"print("hello");"#);
        assert!(asm.contains("call puts"));
        assert!(!asm.contains("call printf"));
    }

    #[test]
    fn print_of_a_bool_branches_between_the_two_fixed_spellings() {
        let asm = compile("print(1 == 1);");
        assert!(asm.contains(".LC_print_true:"));
        assert!(asm.contains(".LC_print_false:"));
        assert!(asm.contains("call puts"));
    }

    #[test]
    fn shadowing_print_with_a_local_function_calls_it_directly() {
        let asm = compile("func print(n: int) { } print(1);");
        assert!(asm.contains("call .F0_print"));
        assert!(!asm.contains("call printf"));
    }
}

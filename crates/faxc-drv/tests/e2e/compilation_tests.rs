//! Compilation Pipeline E2E Tests
//!
//! These tests verify the full compilation pipeline from Fax source code
//! to assembly text, testing various scenarios including successful
//! compilation, error handling, and semantic analysis. `faxc` never links
//! or runs anything itself (§7), so "compiles successfully" is checked by
//! reading the `.s` file `faxc` wrote, not by looking for an executable.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get the path to the fixtures directory
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("e2e")
        .join("fixtures")
}

/// Get the path to the faxc binary
fn faxc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_faxc"))
}

/// Compiles `fixture` to a fresh temp path and returns the assembly text
/// `faxc` wrote there. Panics (via the `assert_cmd` assertion) if the
/// compile itself didn't exit 0.
fn compile_fixture(fixture: &str) -> String {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.s");
    let input_path = fixtures_dir().join(fixture);

    let mut cmd = Command::new(faxc_bin());
    cmd.arg(&input_path).arg("-o").arg(&output_path);
    cmd.assert()
        .success()
        .stderr(predicate::str::is_empty().or(predicate::str::contains("warning").not()));

    std::fs::read_to_string(&output_path).expect("faxc should have written assembly text")
}

/// Test 1: Hello World Compilation
/// Verifies that a print-based "hello world" program compiles to
/// assembly that calls `puts`.
#[test]
fn test_hello_world_compilation() {
    let asm = compile_fixture("hello_world.fax");
    assert!(asm.contains(".intel_syntax noprefix"));
    assert!(asm.contains("call puts"));
}

/// Test 2: Arithmetic Operations Compilation
/// Verifies that a program with arithmetic operations compiles successfully
#[test]
fn test_arithmetic_operations() {
    let asm = compile_fixture("arithmetic.fax");
    assert!(asm.contains("main:"));
    assert!(asm.contains("imul") || asm.contains("add"));
}

/// Test 3: Control Flow Compilation
/// Verifies that a program with if/else and for loops compiles successfully
#[test]
fn test_control_flow() {
    let asm = compile_fixture("control_flow.fax");
    assert!(asm.contains("jz"));
}

/// Test 4: Invalid Syntax Error Handling
/// Verifies that the compiler properly handles invalid syntax
#[test]
fn test_invalid_syntax() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("invalid_syntax.s");
    let input_path = fixtures_dir().join("invalid_syntax.fax");

    let mut cmd = Command::new(faxc_bin());
    cmd.arg(&input_path)
        .arg("-o")
        .arg(&output_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));

    // no stage produces output once an error is raised (§8)
    assert!(!output_path.exists(), "no assembly should be written for invalid syntax");
}

/// Test 5: Semantic Error Handling
/// Verifies that the compiler properly handles semantic errors (type mismatch)
#[test]
fn test_sema_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("sema_error.s");
    let input_path = fixtures_dir().join("sema_error.fax");

    let mut cmd = Command::new(faxc_bin());
    cmd.arg(&input_path)
        .arg("-o")
        .arg(&output_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));

    assert!(!output_path.exists(), "no assembly should be written for a semantic error");
}

/// Test 6: Functions Compilation
/// Verifies that a program with function definitions and calls compiles successfully
#[test]
fn test_functions_compilation() {
    let asm = compile_fixture("functions.fax");
    assert!(asm.contains(".F0_"), "a declared function gets a mangled label");
    assert!(asm.contains("call .F0_"));
}

/// Test 7: Variables Compilation
/// Verifies that a program with various variable declarations compiles successfully
#[test]
fn test_variables_compilation() {
    let asm = compile_fixture("variables.fax");
    assert!(asm.contains(".data") || asm.contains(".zero"));
}

/// Test 8: Loops Compilation
/// Verifies that a program with for loops compiles successfully
#[test]
fn test_loops_compilation() {
    let asm = compile_fixture("loops.fax");
    assert!(asm.contains("jmp"));
}

/// Test 9: Regression Test QC-002
/// Verifies that previously fixed bugs remain fixed: short-circuit `||`
/// never evaluates its right operand eagerly, so a guarded `1/0` never
/// reaches a division instruction at the top level of the expression.
#[test]
fn test_regression_qc002() {
    let asm = compile_fixture("regression_qc002.fax");
    assert!(asm.contains(".SC0_short") || asm.contains(".SC0_end"));
}

/// Test 10: Undeclared Variable Error
/// Verifies that the compiler properly handles undeclared variable errors
#[test]
fn test_undeclared_variable_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("undeclared_var.s");
    let input_path = fixtures_dir().join("undeclared_var.fax");

    let mut cmd = Command::new(faxc_bin());
    cmd.arg(&input_path)
        .arg("-o")
        .arg(&output_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));

    assert!(!output_path.exists(), "no assembly should be written for an undeclared variable");
}

/// Test 11: Duplicate Function Error
/// Verifies that the compiler properly handles duplicate function definition errors
#[test]
fn test_duplicate_function_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("duplicate_fn.s");
    let input_path = fixtures_dir().join("duplicate_fn.fax");

    let mut cmd = Command::new(faxc_bin());
    cmd.arg(&input_path)
        .arg("-o")
        .arg(&output_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));

    assert!(!output_path.exists(), "no assembly should be written for a duplicate function");
}

/// Test 12: File Not Found Error
/// Verifies that the compiler properly handles missing input files
#[test]
fn test_file_not_found_error() {
    let mut cmd = Command::new(faxc_bin());
    cmd.arg("/nonexistent/path/to/file.fax");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")).or(predicate::str::contains("No such file")));
}

//! End-to-end tests for the `faxc` binary: each one shells out to the
//! built binary (via `assert_cmd`) against a fixture under
//! `tests/e2e/fixtures` and checks its exit code, stdout, and stderr.
//!
//! `faxc` only ever emits assembly text — it never invokes an assembler
//! or linker itself (§7) — so "compiles successfully" here means "exits
//! 0 and the requested output file contains assembly", not "produced a
//! runnable executable".

mod cli_tests;
mod compilation_tests;
mod snapshot_tests;

//! `faxc-drv` — the command-line driver that wires the compiler's stages
//! together: lex, parse, resolve/typecheck, explore, emit (§7).
//!
//! This crate owns no compiler logic of its own. It reads the source file,
//! hands it through `faxc-lex` → `faxc-par` → `faxc-sem` → `faxc-explore` →
//! `faxc-emit` in order, and writes whatever the requested `--emit` stage
//! produces to the requested output. The only thing it's responsible for
//! getting right is the CLI contract and making sure a compile error exits
//! nonzero without panicking.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use faxc_util::diagnostic::TerminatingHandler;
use faxc_util::span::SourceMap;
use tracing::{debug, info};

/// Compile a `.fax` source file into x86-64 assembly text.
///
/// `faxc` never invokes an assembler or linker itself — the `.s` file it
/// writes is meant to be handed to `as`/`ld` (or a `cc` front end) by the
/// caller (§7).
#[derive(Debug, Parser)]
#[command(name = "faxc", version, about, long_about = None)]
pub struct Cli {
    /// Path to the `.fax` source file to compile.
    pub input: PathBuf,

    /// Where to write the requested output. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Which pipeline stage's output to emit.
    #[arg(long, value_enum, default_value_t = EmitKind::Asm)]
    pub emit: EmitKind,

    /// Increase logging verbosity. Repeatable (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmitKind {
    /// The token stream produced by the lexer.
    Tokens,
    /// The parsed syntax tree, after resolution and type checking.
    Ast,
    /// Intel-syntax GNU-assembler text (the default).
    Asm,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// Builds a `tracing_subscriber` filter directive from the repeat count of
/// `-v`. `RUST_LOG` still takes precedence when set.
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Runs the full pipeline for `cli` and writes the requested output.
///
/// A source-level error (a bad token, an unresolved name, a type mismatch)
/// is reported by the `TerminatingHandler` itself, which prints to stderr
/// and exits the process before this function would otherwise return —
/// `run` only returns `Err` for I/O failures around the pipeline, never
/// for compile errors (§8).
pub fn run(cli: &Cli) -> Result<(), CompileError> {
    let source = fs::read_to_string(&cli.input).map_err(|source| CompileError::Read {
        path: cli.input.clone(),
        source,
    })?;
    info!(path = %cli.input.display(), bytes = source.len(), "read source file");

    let mut sources = SourceMap::new();
    let file_id = sources.add_file(cli.input.display().to_string(), source.clone());
    let handler = TerminatingHandler::new();

    debug!("lexing");
    let tokens = faxc_lex::Lexer::new(&source, file_id, &handler).tokenize();
    if cli.emit == EmitKind::Tokens {
        return write_output(cli, format!("{tokens:#?}\n"));
    }

    debug!("parsing");
    let mut ast = faxc_par::parse(tokens, &handler);

    debug!("resolving and type checking");
    let (refs, types) = faxc_sem::check_program(&mut ast, &handler);
    if cli.emit == EmitKind::Ast {
        return write_output(cli, format!("{ast:#?}\n"));
    }

    debug!("computing physical layout");
    let layout = faxc_explore::explore(&ast, &types);

    debug!("emitting assembly");
    let asm = faxc_emit::emit_program(&ast, &refs, &types, &layout);
    write_output(cli, asm)
}

fn write_output(cli: &Cli, content: String) -> Result<(), CompileError> {
    match &cli.output {
        Some(path) => {
            fs::write(path, &content).map_err(|source| CompileError::Write {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

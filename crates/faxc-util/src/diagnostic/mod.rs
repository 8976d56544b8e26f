//! Diagnostic module - Error and warning reporting infrastructure.
//!
//! This module provides types for creating, formatting, and reporting
//! compiler diagnostics (errors, warnings, notes, and help messages).
//!
//! # Examples
//!
//! ## Using the handler trait
//!
//! ```
//! use faxc_util::diagnostic::{CollectingHandler, Handler, Span};
//!
//! let handler = CollectingHandler::new();
//! handler.error("unexpected token".to_string(), Span::DUMMY);
//!
//! if handler.has_errors() {
//!     eprintln!("compilation failed");
//! }
//! ```
//!
//! ## Using the fluent builder API
//!
//! ```
//! use faxc_util::diagnostic::{DiagnosticBuilder, Span, DiagnosticCode};
//!
//! let diag = DiagnosticBuilder::error("unexpected token")
//!     .code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN)
//!     .span(Span::DUMMY)
//!     .help("try checking the syntax")
//!     .build();
//! ```

mod builder;
mod codes;
mod level;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use codes::DiagnosticCode;
pub use level::{ColorConfig, LabelStyle, Level};

// Re-export commonly used diagnostic codes as constants for convenience
pub use codes::{
    E0001, E0002, E0003, E0004, E0005,
    E_LEXER_UNEXPECTED_CHAR, E_LEXER_UNTERMINATED_STRING, E_LEXER_INVALID_NUMBER, E_LEXER_UNKNOWN_TOKEN,
    E_PARSER_UNEXPECTED_TOKEN, E_PARSER_EXPECTED_TOKEN, E_PARSER_UNEXPECTED_EOF, E_PARSER_DUPLICATE_DEF,
    E_SEMANTIC_TYPE_MISMATCH, E_SEMANTIC_UNDEFINED_VAR, E_SEMANTIC_UNDEFINED_FN, E_SEMANTIC_MUT_REQUIRED,
    E_SEMANTIC_LOOP_CONTROL_OUTSIDE_LOOP, E_SEMANTIC_RETURN_OUTSIDE_FUNCTION,
    W0001, W0002, W0003,
    W_UNUSED_VARIABLE, W_UNUSED_FUNCTION, W_DEAD_CODE,
};

use crate::Span;
use std::cell::RefCell;

/// A diagnostic message with severity and location
///
/// # Examples
///
/// ```
/// use faxc_util::diagnostic::{Diagnostic, Level, Span};
///
/// let diag = Diagnostic::error("something went wrong", Span::DUMMY);
/// assert_eq!(diag.level, Level::Error);
/// ```
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Diagnostic severity level
    pub level: Level,
    /// Main diagnostic message
    pub message: String,
    /// Source location
    pub span: Span,
    /// Optional diagnostic code
    pub code: Option<DiagnosticCode>,
    /// Additional notes for context
    pub notes: Vec<String>,
    /// Help suggestions for fixing the issue
    pub helps: Vec<String>,
    /// Source code snippets for display
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    /// Create a new diagnostic
    ///
    /// # Examples
    ///
    /// ```
    /// use faxc_util::diagnostic::{Diagnostic, Level, Span};
    ///
    /// let diag = Diagnostic::new(Level::Error, "error message", Span::DUMMY);
    /// ```
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    /// Create an error diagnostic
    ///
    /// # Examples
    ///
    /// ```
    /// use faxc_util::diagnostic::{Diagnostic, Span};
    ///
    /// let diag = Diagnostic::error("something went wrong", Span::DUMMY);
    /// ```
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic
    ///
    /// # Examples
    ///
    /// ```
    /// use faxc_util::diagnostic::{Diagnostic, Span};
    ///
    /// let diag = Diagnostic::warning("unused variable", Span::DUMMY);
    /// ```
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Set the diagnostic code
    ///
    /// # Examples
    ///
    /// ```
    /// use faxc_util::diagnostic::{Diagnostic, Span, DiagnosticCode};
    ///
    /// let mut diag = Diagnostic::error("type error", Span::DUMMY);
    /// diag = diag.with_code(DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH);
    /// ```
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a note to the diagnostic
    ///
    /// # Examples
    ///
    /// ```
    /// use faxc_util::diagnostic::{Diagnostic, Span};
    ///
    /// let diag = Diagnostic::error("type mismatch", Span::DUMMY)
    ///     .with_note("expected type `int`")
    ///     .with_note("found type `string`");
    /// ```
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help suggestion
    ///
    /// # Examples
    ///
    /// ```
    /// use faxc_util::diagnostic::{Diagnostic, Span};
    ///
    /// let diag = Diagnostic::error("unexpected token", Span::DUMMY)
    ///     .with_help("try removing the semicolon");
    /// ```
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    /// Add a source snippet
    ///
    /// # Examples
    ///
    /// ```
    /// use faxc_util::diagnostic::{Diagnostic, Span, SourceSnippet};
    ///
    /// let snippet = SourceSnippet::point("let x = 42;", 1, 5);
    /// let diag = Diagnostic::error("invalid name", Span::DUMMY)
    ///     .with_snippet(snippet);
    /// ```
    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }
}

/// Sink for diagnostics produced by any compiler stage.
///
/// Two implementations exist, matching the two contexts this workspace
/// emits diagnostics in: [`TerminatingHandler`] for the CLI binary
/// (print to stderr, exit nonzero on the first error) and
/// [`CollectingHandler`] for unit and integration tests (buffer
/// diagnostics so a test can assert on message content and position
/// without spawning a subprocess). Object-safe so pipeline stages take
/// `&dyn Handler` and don't need to be generic over the sink.
///
/// # Examples
///
/// ```
/// use faxc_util::diagnostic::{CollectingHandler, Handler};
/// use faxc_util::span::Span;
///
/// let handler = CollectingHandler::new();
/// handler.error("unexpected token".to_string(), Span::DUMMY);
/// assert!(handler.has_errors());
/// ```
pub trait Handler {
    /// Record a fully-built diagnostic.
    fn emit(&self, diagnostic: Diagnostic);

    /// Whether an error has been recorded so far.
    fn has_errors(&self) -> bool;

    /// Record an error at `span`. The compiler-wide shorthand for
    /// `self.emit(Diagnostic::error(message, span))`.
    fn error(&self, message: String, span: Span) {
        self.emit(Diagnostic::error(message, span));
    }

    /// Record a warning at `span`.
    fn warning(&self, message: String, span: Span) {
        self.emit(Diagnostic::warning(message, span));
    }

    /// Start a fluent error builder anchored at `span`.
    fn build_error(&self, span: Span, message: String) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message).span(span)
    }

    /// Start a fluent warning builder anchored at `span`.
    fn build_warning(&self, span: Span, message: String) -> DiagnosticBuilder {
        DiagnosticBuilder::warning(message).span(span)
    }
}

/// Formats a diagnostic the way the CLI prints it: `line,col: message`
/// (§7/§8 of the compiler's error handling design).
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    format!(
        "{},{}: {}",
        diagnostic.span.line, diagnostic.span.column, diagnostic.message
    )
}

/// Collecting diagnostic sink used by tests: never exits the process,
/// just accumulates every diagnostic it is handed.
///
/// # Examples
///
/// ```
/// use faxc_util::diagnostic::{CollectingHandler, Handler};
/// use faxc_util::span::Span;
///
/// let handler = CollectingHandler::new();
/// handler.error("bad token".to_string(), Span::DUMMY);
/// assert_eq!(handler.error_count(), 1);
/// ```
pub struct CollectingHandler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for CollectingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for CollectingHandler {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }
}

/// Terminating diagnostic sink used by the `faxc` binary: prints every
/// diagnostic to stderr as it arrives, then exits the process with a
/// nonzero status the moment an error (as opposed to a warning) is
/// recorded. This is the "print and exit" sink Design Notes §10 flags as
/// a leaky abstraction for testability — it exists only behind the
/// `Handler` trait so the CLI can use it while every test uses
/// [`CollectingHandler`] instead.
pub struct TerminatingHandler;

impl TerminatingHandler {
    pub fn new() -> Self {
        TerminatingHandler
    }
}

impl Default for TerminatingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for TerminatingHandler {
    fn emit(&self, diagnostic: Diagnostic) {
        eprintln!("{}", format_diagnostic(&diagnostic));
        if diagnostic.level == Level::Error {
            std::process::exit(1);
        }
    }

    fn has_errors(&self) -> bool {
        false
    }
}

//! `faxc-par` — turns a token stream into an untyped syntax tree (§4.2).
//!
//! Recursive descent throughout, with Pratt-style precedence climbing for
//! expressions ([`expr`]). Statements dispatch on their leading keyword
//! ([`stmt`]); function declarations and parameter lists live in
//! [`items`]; type annotations in [`types`]; string-escape decoding and
//! integer range checking in [`lit`].
//!
//! The parser never panics on malformed input. Every mismatch is reported
//! through a `faxc_util::diagnostic::Handler` and the cursor always makes
//! forward progress afterward (single-token panic-mode recovery), so a
//! `CollectingHandler`-driven test can see more than one syntax error from
//! one parse, and the `TerminatingHandler`-driven CLI still gets the
//! "first error wins, no assembly emitted" behavior from §7 because it
//! exits the process on the first `emit`.

pub mod ast;
pub mod expr;
pub mod items;
pub mod lit;
pub mod stmt;
pub mod types;

pub use ast::{Ast, BinOp, Expr, ExprId, Param, Stmt, StmtId, TypeExpr, UnOp};

use faxc_lex::{Token, TokenKind};
use faxc_util::diagnostic::{DiagnosticCode, Handler};
use faxc_util::span::Span;

/// Parses a complete token stream, as produced by `faxc_lex::Lexer::tokenize`
/// (must end in `Eof`), into an [`Ast`].
pub fn parse(tokens: Vec<Token>, handler: &dyn Handler) -> Ast {
    Parser::new(tokens, handler).parse_program()
}

pub struct Parser<'a> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) handler: &'a dyn Handler,
    pub(crate) ast: Ast,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a dyn Handler) -> Self {
        Parser {
            tokens,
            pos: 0,
            handler,
            ast: Ast::new(),
        }
    }

    /// Parses every top-level statement until `Eof`.
    pub fn parse_program(mut self) -> Ast {
        while !self.at_eof() {
            let stmt = self.parse_stmt();
            self.ast.top_level.push(stmt);
        }
        self.ast
    }

    // ---- token cursor --------------------------------------------------

    pub(crate) fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    pub(crate) fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Consumes and returns the current token. A no-op past `Eof`.
    pub(crate) fn bump(&mut self) -> Token {
        let tok = self.current();
        if !self.at_eof() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consumes the current token if it matches `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes the current token, requiring it to be `kind`. On mismatch,
    /// emits a syntactic error naming `what` and still consumes one token
    /// so the parser always progresses.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Token {
        if self.check(kind) {
            return self.bump();
        }
        let found = self.current();
        self.handler
            .build_error(
                found.span,
                format!("expected {what} but got '{}'", found.lexeme.as_str()),
            )
            .code(DiagnosticCode::E_PARSER_EXPECTED_TOKEN)
            .emit(self.handler);
        self.bump()
    }

    pub(crate) fn error_at(&self, span: Span, message: impl Into<String>) {
        self.handler
            .build_error(span, message.into())
            .code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN)
            .emit(self.handler);
    }

    pub(crate) fn push_expr(&mut self, expr: Expr) -> ExprId {
        self.ast.exprs.push(expr)
    }

    pub(crate) fn push_stmt(&mut self, stmt: Stmt) -> StmtId {
        self.ast.stmts.push(stmt)
    }

    /// A zero-value placeholder expression used to keep error-recovery
    /// code paths producing a well-formed tree.
    pub(crate) fn error_expr(&mut self, span: Span) -> ExprId {
        self.push_expr(Expr::Int { value: 0, span })
    }
}

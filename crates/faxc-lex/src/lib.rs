//! `faxc-lex` — turns source text into a token stream (§4.1).
//!
//! The scanner ([`Lexer`]) is a single-pass, maximum-munch tokenizer built
//! on top of [`cursor::Cursor`], a UTF-8-aware position tracker shared with
//! nothing upstream of it. It reports lexical errors through a
//! `faxc_util::diagnostic::Handler` rather than panicking, so a malformed
//! program still produces a token stream (with error tokens skipped) for
//! the parser to recover around where possible.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

//! The scanner: source bytes to a token stream (§4.1).
//!
//! Greedy, maximum-munch, single pass. Whitespace and `#` line comments
//! are dropped in the cursor rather than tokenized and filtered
//! one stage later.

use crate::cursor::Cursor;
use crate::token::{keyword_kind, Token, TokenKind};
use faxc_util::diagnostic::Handler;
use faxc_util::span::{FileId, Span};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    file_id: FileId,
    handler: &'a dyn Handler,
    /// Whether the previous emitted token may end an expression; feeds the
    /// minus-sign lookback heuristic.
    prev_ends_expr: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file_id: FileId, handler: &'a dyn Handler) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            file_id,
            handler,
            prev_ends_expr: false,
        }
    }

    /// Scans the whole input into a token vector terminated by `Eof`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn span_at(&self, line: u32, column: u32) -> Span {
        Span::point_with_file(self.file_id, line, column)
    }

    fn skip_trivia(&mut self) {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current_char() == '#' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }
            break;
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let line = self.cursor.line();
        let column = self.cursor.column();
        let span = self.span_at(line, column);

        if self.cursor.is_at_end() {
            return Token::new(TokenKind::Eof, "", span);
        }

        let c = self.cursor.current_char();

        let tok = if c == '-' {
            self.read_minus_or_number(span)
        } else if c.is_ascii_digit() {
            self.read_number(span)
        } else if c == '"' {
            self.read_string(span)
        } else if c.is_ascii_alphabetic() || c == '_' {
            self.read_ident_or_keyword(span)
        } else {
            self.read_operator(span)
        };

        self.prev_ends_expr = tok.kind.ends_expr();
        tok
    }

    /// `-` is ambiguous between unary negation and the start of a negative
    /// numeric literal. One-token lookback: if the previous token may end
    /// an expression, `-` is always binary `Minus`, regardless of what
    /// follows. Otherwise, a digit after `-` folds into the literal.
    fn read_minus_or_number(&mut self, span: Span) -> Token {
        let next = self.cursor.peek_char(1);
        if !self.prev_ends_expr && next.is_ascii_digit() {
            return self.read_number(span);
        }

        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::new(TokenKind::MinusEq, "-=", span)
        } else if self.cursor.match_char('>') {
            Token::new(TokenKind::Arrow, "->", span)
        } else {
            Token::new(TokenKind::Minus, "-", span)
        }
    }

    fn read_number(&mut self, span: Span) -> Token {
        let start = self.cursor.position();
        if self.cursor.current_char() == '-' {
            self.cursor.advance();
        }
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(start);
        Token::new(TokenKind::Int, lexeme, span)
    }

    fn read_ident_or_keyword(&mut self, span: Span) -> Token {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_alphanumeric() || self.cursor.current_char() == '_'
        {
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(start);
        let kind = keyword_kind(lexeme).unwrap_or(TokenKind::Ident);
        Token::new(kind, lexeme, span)
    }

    fn read_string(&mut self, span: Span) -> Token {
        let start = self.cursor.position();
        self.cursor.advance(); // opening quote
        loop {
            if self.cursor.is_at_end() {
                self.handler
                    .error("unterminated string literal".to_string(), span);
                break;
            }
            let c = self.cursor.current_char();
            if c == '"' {
                self.cursor.advance();
                break;
            }
            if c == '\n' {
                self.handler
                    .error("unterminated string literal".to_string(), span);
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    self.handler
                        .error("unterminated escape sequence".to_string(), span);
                    break;
                }
                self.cursor.advance();
                continue;
            }
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(start);
        Token::new(TokenKind::Str, lexeme, span)
    }

    fn read_operator(&mut self, span: Span) -> Token {
        let c = self.cursor.current_char();
        self.cursor.advance();

        macro_rules! two {
            ($expect:expr, $yes:expr, $yes_lex:expr, $no:expr, $no_lex:expr) => {
                if self.cursor.match_char($expect) {
                    Token::new($yes, $yes_lex, span)
                } else {
                    Token::new($no, $no_lex, span)
                }
            };
        }

        match c {
            '(' => Token::new(TokenKind::LParen, "(", span),
            ')' => Token::new(TokenKind::RParen, ")", span),
            '{' => Token::new(TokenKind::LBrace, "{", span),
            '}' => Token::new(TokenKind::RBrace, "}", span),
            '[' => Token::new(TokenKind::LBracket, "[", span),
            ']' => Token::new(TokenKind::RBracket, "]", span),
            ',' => Token::new(TokenKind::Comma, ",", span),
            ';' => Token::new(TokenKind::Semicolon, ";", span),
            ':' => Token::new(TokenKind::Colon, ":", span),
            '.' => two!('.', TokenKind::DotDot, "..", TokenKind::Dot, "."),
            '+' => two!('=', TokenKind::PlusEq, "+=", TokenKind::Plus, "+"),
            '*' => two!('=', TokenKind::StarEq, "*=", TokenKind::Star, "*"),
            '/' => two!('=', TokenKind::SlashEq, "/=", TokenKind::Slash, "/"),
            '%' => two!('=', TokenKind::PercentEq, "%=", TokenKind::Percent, "%"),
            '=' => two!('=', TokenKind::Eq, "==", TokenKind::Assign, "="),
            '!' => two!('=', TokenKind::NotEq, "!=", TokenKind::Bang, "!"),
            '<' => two!('=', TokenKind::LtEq, "<=", TokenKind::Lt, "<"),
            '>' => two!('=', TokenKind::GtEq, ">=", TokenKind::Gt, ">"),
            '&' => {
                if self.cursor.match_char('&') {
                    Token::new(TokenKind::AmpAmp, "&&", span)
                } else {
                    self.handler
                        .error("unexpected character '&' (did you mean '&&'?)".to_string(), span);
                    Token::new(TokenKind::AmpAmp, "&&", span)
                }
            }
            '|' => {
                if self.cursor.match_char('|') {
                    Token::new(TokenKind::PipePipe, "||", span)
                } else {
                    self.handler
                        .error("unexpected character '|' (did you mean '||'?)".to_string(), span);
                    Token::new(TokenKind::PipePipe, "||", span)
                }
            }
            other => {
                self.handler
                    .error(format!("unexpected character '{}'", other), span);
                Token::new(TokenKind::Eof, "", span)
            }
        }
    }
}

//! Expression parsing (§4.2), precedence climbing from loosest to
//! tightest: `||` → `&&` → equality → relational → additive →
//! multiplicative → unary prefix → postfix (call/index) → primary.
//! Each level is its own function rather than a generic Pratt table,
//! matching the small fixed grammar — there is no user-extensible
//! operator set to justify a table-driven parser.

use crate::ast::{BinOp, Expr, ExprId, UnOp};
use crate::lit;
use crate::Parser;
use faxc_lex::TokenKind;
use faxc_util::symbol::Symbol;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> ExprId {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ExprId {
        let mut lhs = self.parse_and();
        while self.check(TokenKind::PipePipe) {
            self.bump();
            let rhs = self.parse_and();
            lhs = self.push_infix(BinOp::Or, lhs, rhs);
        }
        lhs
    }

    fn parse_and(&mut self) -> ExprId {
        let mut lhs = self.parse_equality();
        while self.check(TokenKind::AmpAmp) {
            self.bump();
            let rhs = self.parse_equality();
            lhs = self.push_infix(BinOp::And, lhs, rhs);
        }
        lhs
    }

    fn parse_equality(&mut self) -> ExprId {
        let mut lhs = self.parse_relational();
        loop {
            let op = match self.current_kind() {
                TokenKind::Eq => BinOp::Eq,
                TokenKind::NotEq => BinOp::NotEq,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_relational();
            lhs = self.push_infix(op, lhs, rhs);
        }
        lhs
    }

    fn parse_relational(&mut self) -> ExprId {
        let mut lhs = self.parse_additive();
        loop {
            let op = match self.current_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::LtEq => BinOp::LtEq,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::GtEq => BinOp::GtEq,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_additive();
            lhs = self.push_infix(op, lhs, rhs);
        }
        lhs
    }

    fn parse_additive(&mut self) -> ExprId {
        let mut lhs = self.parse_multiplicative();
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_multiplicative();
            lhs = self.push_infix(op, lhs, rhs);
        }
        lhs
    }

    fn parse_multiplicative(&mut self) -> ExprId {
        let mut lhs = self.parse_unary();
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_unary();
            lhs = self.push_infix(op, lhs, rhs);
        }
        lhs
    }

    /// `!` and unary `-` (the scanner already folds a bare `-123` literal
    /// into a single `Int` token, §4.1; this handles `-x`, `-(...)`, etc.)
    fn parse_unary(&mut self) -> ExprId {
        let op = match self.current_kind() {
            TokenKind::Bang => Some(UnOp::Not),
            TokenKind::Minus => Some(UnOp::Neg),
            _ => None,
        };
        match op {
            Some(op) => {
                let start = self.current_span();
                self.bump();
                let operand = self.parse_unary();
                let end = self.ast.expr(operand).span();
                self.push_expr(Expr::Prefix {
                    op,
                    operand,
                    span: start.merge(end),
                })
            }
            None => self.parse_postfix(),
        }
    }

    /// Indexing (`e[i]`) and calls (`e(a, b)`), left-associative and
    /// chainable (`f()()`, `a[0][1]`).
    fn parse_postfix(&mut self) -> ExprId {
        let mut expr = self.parse_primary();
        loop {
            match self.current_kind() {
                TokenKind::LBracket => {
                    self.bump();
                    let index = self.parse_expr();
                    let end_tok = self.expect(TokenKind::RBracket, "']'");
                    let start = self.ast.expr(expr).span();
                    expr = self.push_expr(Expr::Index {
                        base: expr,
                        index,
                        span: start.merge(end_tok.span),
                    });
                }
                TokenKind::LParen => {
                    self.bump();
                    let mut args = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expr());
                            if !self.eat(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    let end_tok = self.expect(TokenKind::RParen, "')'");
                    let start = self.ast.expr(expr).span();
                    expr = self.push_expr(Expr::Call {
                        callee: expr,
                        args,
                        span: start.merge(end_tok.span),
                    });
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_primary(&mut self) -> ExprId {
        let span = self.current_span();
        match self.current_kind() {
            TokenKind::Int => {
                let tok = self.bump();
                let value = lit::parse_int(tok.lexeme.as_str(), span, self.handler);
                self.push_expr(Expr::Int { value, span })
            }
            TokenKind::True => {
                self.bump();
                self.push_expr(Expr::Bool { value: true, span })
            }
            TokenKind::False => {
                self.bump();
                self.push_expr(Expr::Bool { value: false, span })
            }
            TokenKind::Str => {
                let tok = self.bump();
                let decoded = lit::unescape(tok.lexeme.as_str(), span, self.handler);
                self.push_expr(Expr::Str {
                    value: Symbol::intern(&decoded),
                    span,
                })
            }
            TokenKind::Ident => {
                let tok = self.bump();
                self.push_expr(Expr::Ident { name: tok.lexeme, span })
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expr();
                self.expect(TokenKind::RParen, "')'");
                inner
            }
            TokenKind::LBracket => self.parse_array_literal(),
            _ => {
                let found = self.current();
                self.error_at(
                    found.span,
                    format!("expected an expression but got '{}'", found.lexeme.as_str()),
                );
                self.bump();
                self.error_expr(found.span)
            }
        }
    }

    /// `[` expr (`,` expr)* `]` — element type comes from context during
    /// type-checking, not from the literal itself (§3, §4.4).
    fn parse_array_literal(&mut self) -> ExprId {
        let start = self.current_span();
        self.expect(TokenKind::LBracket, "'['");
        let mut elems = Vec::new();
        if !self.check(TokenKind::RBracket) {
            loop {
                elems.push(self.parse_expr());
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let end_tok = self.expect(TokenKind::RBracket, "']'");
        self.push_expr(Expr::Array {
            elems,
            span: start.merge(end_tok.span),
        })
    }

    fn push_infix(&mut self, op: BinOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let span = self.ast.expr(lhs).span().merge(self.ast.expr(rhs).span());
        self.push_expr(Expr::Infix { op, lhs, rhs, span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_util::diagnostic::CollectingHandler;
    use faxc_util::span::FileId;

    fn parse_one(src: &str) -> (Expr, CollectingHandler) {
        let handler = CollectingHandler::new();
        let tokens = faxc_lex::Lexer::new(src, FileId::new(0), &handler).tokenize();
        let mut parser = Parser::new(tokens, &handler);
        let id = parser.parse_expr();
        let expr = parser.ast.expr(id).clone();
        (expr, handler)
    }

    #[test]
    fn precedence_multiplication_binds_tighter_than_addition() {
        let (expr, handler) = parse_one("1 + 2 * 3");
        assert!(!handler.has_errors());
        match expr {
            Expr::Infix { op: BinOp::Add, .. } => {}
            other => panic!("expected top-level Add, got {other:?}"),
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let (expr, handler) = parse_one("a || b && c");
        assert!(!handler.has_errors());
        assert!(matches!(expr, Expr::Infix { op: BinOp::Or, .. }));
    }

    #[test]
    fn unary_minus_on_identifier() {
        let (expr, handler) = parse_one("-x");
        assert!(!handler.has_errors());
        assert!(matches!(expr, Expr::Prefix { op: UnOp::Neg, .. }));
    }

    #[test]
    fn chained_postfix_index_and_call() {
        let (expr, handler) = parse_one("a[0](1, 2)");
        assert!(!handler.has_errors());
        match expr {
            Expr::Call { args, .. } => assert_eq!(args.len(), 2),
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn array_literal_with_elements() {
        let (expr, handler) = parse_one("[1, 2, 3]");
        assert!(!handler.has_errors());
        match expr {
            Expr::Array { elems, .. } => assert_eq!(elems.len(), 3),
            other => panic!("expected Array, got {other:?}"),
        }
    }

    #[test]
    fn empty_array_literal() {
        let (expr, handler) = parse_one("[]");
        assert!(!handler.has_errors());
        match expr {
            Expr::Array { elems, .. } => assert!(elems.is_empty()),
            other => panic!("expected Array, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        let (expr, handler) = parse_one("(1 + 2) * 3");
        assert!(!handler.has_errors());
        assert!(matches!(expr, Expr::Infix { op: BinOp::Mul, .. }));
    }

    #[test]
    fn string_literal_decodes_escapes() {
        let (expr, handler) = parse_one(r#""a\nb""#);
        assert!(!handler.has_errors());
        match expr {
            Expr::Str { value, .. } => assert_eq!(value.as_str(), "a\nb"),
            other => panic!("expected Str, got {other:?}"),
        }
    }

    #[test]
    fn deeply_nested_parentheses_do_not_overflow_the_parser() {
        let src = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        let (_, handler) = parse_one(&src);
        assert!(!handler.has_errors());
    }
}

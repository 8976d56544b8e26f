//! Function declarations (§4.2): the only "item" category in this
//! language — there are no structs, enums, traits, modules, or imports.
//! A function declaration is itself a `Stmt::FuncDecl`, parsed from
//! whichever block it's hoisted into (§9 Design Notes; hoisting scope is
//! limited to the immediately enclosing block, see `stmt.rs`).

use crate::ast::{Param, Stmt, TypeExpr};
use crate::Parser;
use faxc_lex::TokenKind;

impl<'a> Parser<'a> {
    /// `func` name `(` params `)` (`->` type)? block
    pub(crate) fn parse_func_decl(&mut self) -> Stmt {
        let start = self.current_span();
        self.expect(TokenKind::Func, "'func'");

        let name_tok = self.expect(TokenKind::Ident, "a function name");
        let name = name_tok.lexeme;

        let params = self.parse_param_list();

        let ret = if self.eat(TokenKind::Arrow) {
            Some(self.parse_type())
        } else {
            None
        };

        let body = self.parse_block();
        let end = self.ast.stmt(body).span();

        Stmt::FuncDecl {
            name,
            params,
            ret,
            body,
            span: start.merge(end),
        }
    }

    /// `(` (name `:` type (`,` name `:` type)*)? `)`
    fn parse_param_list(&mut self) -> Vec<Param> {
        self.expect(TokenKind::LParen, "'('");
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let name_tok = self.expect(TokenKind::Ident, "a parameter name");
                let param_start = name_tok.span;
                self.expect(TokenKind::Colon, "':'");
                let ty = self.parse_type();
                params.push(Param {
                    name: name_tok.lexeme,
                    ty,
                    span: param_start,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'");
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeExpr;
    use faxc_util::diagnostic::CollectingHandler;
    use faxc_util::span::FileId;

    fn parse_decl(src: &str) -> (Stmt, CollectingHandler) {
        let handler = CollectingHandler::new();
        let tokens = faxc_lex::Lexer::new(src, FileId::new(0), &handler).tokenize();
        let mut parser = crate::Parser::new(tokens, &handler);
        let stmt = parser.parse_func_decl();
        (stmt, handler)
    }

    #[test]
    fn no_params_no_return_type() {
        let (stmt, handler) = parse_decl("func main() {}");
        assert!(!handler.has_errors());
        match stmt {
            Stmt::FuncDecl { params, ret, .. } => {
                assert!(params.is_empty());
                assert_eq!(ret, None);
            }
            other => panic!("expected FuncDecl, got {other:?}"),
        }
    }

    #[test]
    fn multiple_params_with_return_type() {
        let (stmt, handler) = parse_decl("func add(a: int, b: int) -> int {}");
        assert!(!handler.has_errors());
        match stmt {
            Stmt::FuncDecl { params, ret, .. } => {
                assert_eq!(params.len(), 2);
                assert_eq!(ret, Some(TypeExpr::Int));
            }
            other => panic!("expected FuncDecl, got {other:?}"),
        }
    }
}

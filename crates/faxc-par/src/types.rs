//! Parses syntactic type annotations (§4.2, §6 grammar): `int`, `bool`,
//! `string`, `[N]T`, and function types `(T1, T2, ...) -> T` / `(T1, ...)`.

use crate::ast::TypeExpr;
use crate::lit;
use crate::Parser;
use faxc_lex::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> TypeExpr {
        match self.current_kind() {
            TokenKind::IntTy => {
                self.bump();
                TypeExpr::Int
            }
            TokenKind::BoolTy => {
                self.bump();
                TypeExpr::Bool
            }
            TokenKind::StringTy => {
                self.bump();
                TypeExpr::String
            }
            TokenKind::LBracket => self.parse_array_type(),
            TokenKind::LParen => self.parse_func_type(),
            _ => {
                let found = self.current();
                self.error_at(found.span, format!("expected a type but got '{}'", found.lexeme.as_str()));
                self.bump();
                TypeExpr::Int
            }
        }
    }

    /// `[N]T`
    fn parse_array_type(&mut self) -> TypeExpr {
        self.expect(TokenKind::LBracket, "'['");
        let len_span = self.current_span();
        let len_tok = self.expect(TokenKind::Int, "an array length");
        let len = lit::parse_int(len_tok.lexeme.as_str(), len_span, self.handler);
        self.expect(TokenKind::RBracket, "']'");
        let elem = self.parse_type();
        TypeExpr::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// `(T1, T2, ...) -> T` or a bare parenthesized parameter-type list
    /// `(T1, T2, ...)` with no return type (void).
    fn parse_func_type(&mut self) -> TypeExpr {
        self.expect(TokenKind::LParen, "'('");
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.parse_type());
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'");
        let ret = if self.eat(TokenKind::Arrow) {
            Some(Box::new(self.parse_type()))
        } else {
            None
        };
        TypeExpr::Func { params, ret }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ast;
    use faxc_util::diagnostic::CollectingHandler;
    use faxc_util::span::FileId;

    fn parse_type_src(src: &str) -> TypeExpr {
        let handler = CollectingHandler::new();
        let tokens = faxc_lex::Lexer::new(src, FileId::new(0), &handler).tokenize();
        let mut parser = Parser {
            tokens,
            pos: 0,
            handler: &handler,
            ast: Ast::new(),
        };
        parser.parse_type()
    }

    #[test]
    fn parses_primitive_types() {
        assert_eq!(parse_type_src("int"), TypeExpr::Int);
        assert_eq!(parse_type_src("bool"), TypeExpr::Bool);
        assert_eq!(parse_type_src("string"), TypeExpr::String);
    }

    #[test]
    fn parses_array_type() {
        assert_eq!(
            parse_type_src("[3]int"),
            TypeExpr::Array { len: 3, elem: Box::new(TypeExpr::Int) }
        );
    }

    #[test]
    fn parses_nested_array_type() {
        assert_eq!(
            parse_type_src("[2][3]int"),
            TypeExpr::Array {
                len: 2,
                elem: Box::new(TypeExpr::Array { len: 3, elem: Box::new(TypeExpr::Int) })
            }
        );
    }

    #[test]
    fn parses_function_type_with_return() {
        assert_eq!(
            parse_type_src("(int, bool) -> int"),
            TypeExpr::Func {
                params: vec![TypeExpr::Int, TypeExpr::Bool],
                ret: Some(Box::new(TypeExpr::Int)),
            }
        );
    }

    #[test]
    fn parses_function_type_with_no_return() {
        assert_eq!(
            parse_type_src("(int)"),
            TypeExpr::Func { params: vec![TypeExpr::Int], ret: None }
        );
    }
}

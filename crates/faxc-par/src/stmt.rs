//! Statement parsing (§4.2): dispatch on the leading keyword, with
//! assignment-or-expression-statement as the fallback. Every statement
//! that does not end in a `{ ... }` block requires a trailing `;`.

use crate::ast::{Stmt, StmtId};
use crate::Parser;
use faxc_lex::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_stmt(&mut self) -> StmtId {
        let stmt = match self.current_kind() {
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::Func => self.parse_func_decl(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Continue => self.parse_continue(),
            TokenKind::Break => self.parse_break(),
            TokenKind::LBrace => {
                let id = self.parse_block();
                return id;
            }
            _ => self.parse_assign_or_expr_stmt(),
        };
        self.push_stmt(stmt)
    }

    /// `{` stmt* `}`
    pub(crate) fn parse_block(&mut self) -> StmtId {
        let start = self.current_span();
        self.expect(TokenKind::LBrace, "'{'");
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            stmts.push(self.parse_stmt());
        }
        let end_tok = self.expect(TokenKind::RBrace, "'}'");
        self.push_stmt(Stmt::Block {
            stmts,
            span: start.merge(end_tok.span),
        })
    }

    /// `var` name (`:` type)? (`=` expr)? `;`
    fn parse_var_decl(&mut self) -> Stmt {
        let start = self.current_span();
        self.expect(TokenKind::Var, "'var'");
        let name_tok = self.expect(TokenKind::Ident, "a variable name");

        let declared_type = if self.eat(TokenKind::Colon) {
            Some(self.parse_type())
        } else {
            None
        };

        let init = if self.eat(TokenKind::Assign) {
            Some(self.parse_expr())
        } else {
            None
        };

        let end_tok = self.expect(TokenKind::Semicolon, "';'");
        Stmt::VarDecl {
            name: name_tok.lexeme,
            declared_type,
            init,
            span: start.merge(end_tok.span),
        }
    }

    /// `if` expr block (`else` (if ... | block))?
    fn parse_if(&mut self) -> Stmt {
        let start = self.current_span();
        self.expect(TokenKind::If, "'if'");
        let cond = self.parse_expr();
        let then_block = self.parse_block();

        let else_branch = if self.eat(TokenKind::Else) {
            if self.check(TokenKind::If) {
                Some(self.parse_stmt())
            } else {
                Some(self.parse_block())
            }
        } else {
            None
        };

        let end = match else_branch {
            Some(id) => self.ast.stmt(id).span(),
            None => self.ast.stmt(then_block).span(),
        };

        Stmt::If {
            cond,
            then_block,
            else_branch,
            span: start.merge(end),
        }
    }

    /// `for` expr block — the only loop form (while-style; `in` is
    /// reserved for a possible future `for x in arr` form, not yet part
    /// of the grammar).
    fn parse_for(&mut self) -> Stmt {
        let start = self.current_span();
        self.expect(TokenKind::For, "'for'");
        let cond = self.parse_expr();
        let body = self.parse_block();
        let end = self.ast.stmt(body).span();
        Stmt::For {
            cond,
            body,
            span: start.merge(end),
        }
    }

    /// `return` expr? `;`
    fn parse_return(&mut self) -> Stmt {
        let start = self.current_span();
        self.expect(TokenKind::Return, "'return'");
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr())
        };
        let end_tok = self.expect(TokenKind::Semicolon, "';'");
        Stmt::Return {
            value,
            span: start.merge(end_tok.span),
        }
    }

    fn parse_continue(&mut self) -> Stmt {
        let start = self.current_span();
        self.expect(TokenKind::Continue, "'continue'");
        let end_tok = self.expect(TokenKind::Semicolon, "';'");
        Stmt::Continue { span: start.merge(end_tok.span) }
    }

    fn parse_break(&mut self) -> Stmt {
        let start = self.current_span();
        self.expect(TokenKind::Break, "'break'");
        let end_tok = self.expect(TokenKind::Semicolon, "';'");
        Stmt::Break { span: start.merge(end_tok.span) }
    }

    /// An expression, optionally followed by `=` another expression
    /// (assignment) — disambiguated after the fact since both start with
    /// the same primary/postfix grammar (`ident`, `ident[i]`, ...).
    fn parse_assign_or_expr_stmt(&mut self) -> Stmt {
        let start = self.current_span();
        let expr = self.parse_expr();

        if self.eat(TokenKind::Assign) {
            let value = self.parse_expr();
            let end_tok = self.expect(TokenKind::Semicolon, "';'");
            return Stmt::Assign {
                target: expr,
                value,
                span: start.merge(end_tok.span),
            };
        }

        let end_tok = self.expect(TokenKind::Semicolon, "';'");
        Stmt::ExprStmt {
            expr,
            span: start.merge(end_tok.span),
        }
    }
}

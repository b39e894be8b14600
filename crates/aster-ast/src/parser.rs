//! Recursive-descent / precedence-climbing parser.
//!
//! Turns a token stream into the `ast` module's `Stmt`/`Expr` trees. Mirrors
//! the grammar SPEC_FULL.md §4.5 lowers from bytecode; precedence follows
//! the usual C-family ladder with `or`/`and` kept as dedicated logical nodes
//! so the compiler can lower them to short-circuiting `JIF`/`JIT` jumps.

use crate::ast::*;
use crate::error::ParseError;
use crate::span::{Pathname, Span};
use crate::token::{Literal, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    pathname: Pathname,
}

type PResult<T> = Result<T, ParseError>;

pub fn parse(tokens: Vec<Token>, pathname: Pathname) -> PResult<Vec<Stmt>> {
    let mut p = Parser { tokens, pos: 0, pathname };
    let mut stmts = Vec::new();
    while !p.is_at_end() {
        stmts.push(p.statement()?);
    }
    Ok(stmts)
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.err_here(what))
        }
    }

    fn err_here(&self, expected: &str) -> ParseError {
        ParseError::unexpected(self.peek_kind(), expected, self.peek().span.line, self.pathname.clone())
    }

    fn span_here(&self) -> Span {
        self.peek().span
    }

    // ---- statements ----

    fn block(&mut self) -> PResult<Vec<Stmt>> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.statement()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(stmts)
    }

    fn statement(&mut self) -> PResult<Stmt> {
        match self.peek_kind() {
            TokenKind::Let => self.let_stmt(),
            TokenKind::If => self.if_stmt(),
            TokenKind::While => self.while_stmt(),
            TokenKind::For => self.for_stmt(),
            TokenKind::Fn | TokenKind::Proc | TokenKind::Public => self.fn_stmt(),
            TokenKind::Return => self.return_stmt(),
            TokenKind::Break => {
                let span = self.span_here();
                self.advance();
                self.match_kind(TokenKind::Semicolon);
                Ok(Stmt::Break(span))
            }
            TokenKind::Continue => {
                let span = self.span_here();
                self.advance();
                self.match_kind(TokenKind::Semicolon);
                Ok(Stmt::Continue(span))
            }
            TokenKind::Try => self.try_stmt(),
            TokenKind::Throw => self.throw_stmt(),
            TokenKind::Import => self.import_stmt(),
            TokenKind::LBrace => Ok(Stmt::Block(self.block()?)),
            _ => self.expr_stmt(),
        }
    }

    fn let_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        self.advance();
        let mutable = self.match_kind(TokenKind::Mut);
        let name = self.expect(TokenKind::Ident, "identifier")?.lexeme;
        let value = if self.match_kind(TokenKind::Assign) {
            Some(self.expression()?)
        } else {
            None
        };
        self.match_kind(TokenKind::Semicolon);
        Ok(Stmt::Let { name, mutable, value, span })
    }

    fn if_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        self.advance();
        let cond = self.expression()?;
        let then_branch = self.block()?;
        let mut elifs = Vec::new();
        while self.check(TokenKind::Elif) {
            self.advance();
            let c = self.expression()?;
            let b = self.block()?;
            elifs.push((c, b));
        }
        let else_branch = if self.match_kind(TokenKind::Else) {
            Some(self.block()?)
        } else {
            None
        };
        Ok(Stmt::If { cond, then_branch, elifs, else_branch, span })
    }

    fn while_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        self.advance();
        let cond = self.expression()?;
        let body = self.block()?;
        Ok(Stmt::While { cond, body, span })
    }

    fn for_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        self.advance();
        let var = self.expect(TokenKind::Ident, "identifier")?.lexeme;
        self.expect(TokenKind::In, "'in'")?;
        let first = self.expression()?;
        let head = if self.match_kind(TokenKind::To) {
            let to = self.expression()?;
            let step = if self.match_kind(TokenKind::Colon) {
                Some(self.expression()?)
            } else {
                None
            };
            ForHead::Numeric(ForNumeric { var, from: first, to, step })
        } else {
            ForHead::Iterator(ForIterator { var, iterable: first })
        };
        let body = self.block()?;
        Ok(Stmt::For { head, body, span })
    }

    fn fn_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        let is_public = self.match_kind(TokenKind::Public);
        let is_proc = match self.peek_kind() {
            TokenKind::Fn => {
                self.advance();
                false
            }
            TokenKind::Proc => {
                self.advance();
                true
            }
            _ => return Err(self.err_here("'fn' or 'proc'")),
        };
        let name = self.expect(TokenKind::Ident, "identifier")?.lexeme;
        let params = self.param_list()?;
        let body = self.block()?;
        Ok(Stmt::FnDecl(FnDecl { name, params, body, is_proc, is_public, span }))
    }

    fn param_list(&mut self) -> PResult<Vec<String>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.expect(TokenKind::Ident, "parameter name")?.lexeme);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    fn return_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        self.advance();
        let value = if self.check(TokenKind::Semicolon) || self.check(TokenKind::RBrace) {
            None
        } else {
            Some(self.expression()?)
        };
        self.match_kind(TokenKind::Semicolon);
        Ok(Stmt::Return { value, span })
    }

    fn try_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        self.advance();
        let body = self.block()?;
        self.expect(TokenKind::Catch, "'catch'")?;
        let catch_name = if self.check(TokenKind::LParen) {
            self.advance();
            let name = self.expect(TokenKind::Ident, "identifier")?.lexeme;
            self.expect(TokenKind::RParen, "')'")?;
            Some(name)
        } else {
            None
        };
        let catch_body = self.block()?;
        Ok(Stmt::Try { body, catch_name, catch_body, span })
    }

    fn throw_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        self.advance();
        let value = self.expression()?;
        self.match_kind(TokenKind::Semicolon);
        Ok(Stmt::Throw { value, span })
    }

    fn import_stmt(&mut self) -> PResult<Stmt> {
        let span = self.span_here();
        self.advance();
        let path_tok = self.expect(TokenKind::Str, "module path string")?;
        let path = match path_tok.literal {
            Some(Literal::Str(s)) => s,
            _ => path_tok.lexeme,
        };
        let alias = if self.match_kind(TokenKind::As) {
            Some(self.expect(TokenKind::Ident, "identifier")?.lexeme)
        } else {
            None
        };
        self.match_kind(TokenKind::Semicolon);
        Ok(Stmt::Import { path, alias, span })
    }

    fn expr_stmt(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        self.match_kind(TokenKind::Semicolon);
        Ok(Stmt::Expr(expr))
    }

    // ---- expressions ----

    fn expression(&mut self) -> PResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> PResult<Expr> {
        let target = self.or_expr()?;
        if self.check(TokenKind::Assign) {
            let span = self.span_here();
            self.advance();
            let value = self.assignment()?;
            match &target {
                Expr::Ident { .. } | Expr::Member { .. } | Expr::Index { .. } => {
                    Ok(Expr::Assign { target: Box::new(target), value: Box::new(value), span })
                }
                _ => Err(ParseError::new("invalid assignment target", span.line, self.pathname.clone())),
            }
        } else {
            Ok(target)
        }
    }

    fn or_expr(&mut self) -> PResult<Expr> {
        let mut left = self.and_expr()?;
        while self.check(TokenKind::Or) {
            let span = self.span_here();
            self.advance();
            let right = self.and_expr()?;
            left = Expr::Logical { left: Box::new(left), op: LogicalOp::Or, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> PResult<Expr> {
        let mut left = self.is_expr()?;
        while self.check(TokenKind::And) {
            let span = self.span_here();
            self.advance();
            let right = self.is_expr()?;
            left = Expr::Logical { left: Box::new(left), op: LogicalOp::And, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn is_expr(&mut self) -> PResult<Expr> {
        let mut left = self.equality()?;
        while self.check(TokenKind::Is) {
            let span = self.span_here();
            self.advance();
            let negate = self.match_kind(TokenKind::Not);
            let type_name = self.expect(TokenKind::Ident, "type name")?.lexeme;
            let is_expr = Expr::Is { value: Box::new(left), type_name, span };
            left = if negate {
                Expr::Unary { op: UnaryOp::Not, operand: Box::new(is_expr), span }
            } else {
                is_expr
            };
        }
        Ok(left)
    }

    fn equality(&mut self) -> PResult<Expr> {
        let mut left = self.comparison()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::Ne => BinaryOp::Ne,
                _ => break,
            };
            let span = self.span_here();
            self.advance();
            let right = self.comparison()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn comparison(&mut self) -> PResult<Expr> {
        let mut left = self.bitor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Le => BinaryOp::Le,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Ge => BinaryOp::Ge,
                _ => break,
            };
            let span = self.span_here();
            self.advance();
            let right = self.bitor()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn bitor(&mut self) -> PResult<Expr> {
        let mut left = self.bitxor()?;
        while self.check(TokenKind::BOr) {
            let span = self.span_here();
            self.advance();
            let right = self.bitxor()?;
            left = Expr::Binary { left: Box::new(left), op: BinaryOp::BOr, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn bitxor(&mut self) -> PResult<Expr> {
        let mut left = self.bitand()?;
        while self.check(TokenKind::BXor) {
            let span = self.span_here();
            self.advance();
            let right = self.bitand()?;
            left = Expr::Binary { left: Box::new(left), op: BinaryOp::BXor, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn bitand(&mut self) -> PResult<Expr> {
        let mut left = self.shift()?;
        while self.check(TokenKind::BAnd) {
            let span = self.span_here();
            self.advance();
            let right = self.shift()?;
            left = Expr::Binary { left: Box::new(left), op: BinaryOp::BAnd, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn shift(&mut self) -> PResult<Expr> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Shl => BinaryOp::Shl,
                TokenKind::Shr => BinaryOp::Shr,
                _ => break,
            };
            let span = self.span_here();
            self.advance();
            let right = self.term()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn term(&mut self) -> PResult<Expr> {
        let mut left = self.factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let span = self.span_here();
            self.advance();
            let right = self.factor()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn factor(&mut self) -> PResult<Expr> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            let span = self.span_here();
            self.advance();
            let right = self.unary()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn unary(&mut self) -> PResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Not => Some(UnaryOp::Not),
            TokenKind::BNot => Some(UnaryOp::BNot),
            _ => None,
        };
        if let Some(op) = op {
            let span = self.span_here();
            self.advance();
            let operand = self.unary()?;
            return Ok(Expr::Unary { op, operand: Box::new(operand), span });
        }
        self.postfix()
    }

    fn postfix(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            match self.peek_kind() {
                TokenKind::LParen => {
                    let span = self.span_here();
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        loop {
                            args.push(self.expression()?);
                            if !self.match_kind(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(TokenKind::RParen, "')'")?;
                    expr = Expr::Call { callee: Box::new(expr), args, span };
                }
                TokenKind::Dot => {
                    let span = self.span_here();
                    self.advance();
                    let name = self.expect(TokenKind::Ident, "member name")?.lexeme;
                    expr = Expr::Member { object: Box::new(expr), name, span };
                }
                TokenKind::LBracket => {
                    let span = self.span_here();
                    self.advance();
                    let index = self.expression()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    expr = Expr::Index { object: Box::new(expr), index: Box::new(index), span };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> PResult<Expr> {
        let span = self.span_here();
        match self.peek_kind() {
            TokenKind::Int | TokenKind::Float | TokenKind::Str | TokenKind::True | TokenKind::False | TokenKind::Empty => {
                let tok = self.advance();
                Ok(Expr::Literal { value: tok.literal.expect("literal token missing payload"), span })
            }
            TokenKind::Ident => {
                let tok = self.advance();
                Ok(Expr::Ident { name: tok.lexeme, span })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Array => {
                self.advance();
                self.collection_body(CollectionKind::Array, span)
            }
            TokenKind::List => {
                self.advance();
                self.collection_body(CollectionKind::List, span)
            }
            TokenKind::Dict => {
                self.advance();
                self.keyed_collection_body(CollectionKind::Dict, span)
            }
            TokenKind::Record => {
                self.advance();
                self.keyed_collection_body(CollectionKind::Record, span)
            }
            TokenKind::Fn | TokenKind::Proc => self.lambda(span),
            _ => Err(self.err_here("expression")),
        }
    }

    fn collection_body(&mut self, kind: CollectionKind, span: Span) -> PResult<Expr> {
        self.expect(TokenKind::LBracket, "'['")?;
        let mut elements = Vec::new();
        if !self.check(TokenKind::RBracket) {
            loop {
                elements.push((None, self.expression()?));
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBracket, "']'")?;
        Ok(Expr::Collection { kind, elements, span })
    }

    fn keyed_collection_body(&mut self, kind: CollectionKind, span: Span) -> PResult<Expr> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut elements = Vec::new();
        if !self.check(TokenKind::RBrace) {
            loop {
                let key = self.expect(TokenKind::Ident, "key name")?.lexeme;
                self.expect(TokenKind::Colon, "':'")?;
                let value = self.expression()?;
                elements.push((Some(key), value));
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Expr::Collection { kind, elements, span })
    }

    fn lambda(&mut self, span: Span) -> PResult<Expr> {
        let is_proc = matches!(self.peek_kind(), TokenKind::Proc);
        self.advance();
        let params = self.param_list()?;
        let body = self.block()?;
        Ok(Expr::Lambda { params, body, is_proc, span })
    }
}

//! Lexer, parser and AST for the Aster language.
//!
//! spec.md keeps the real frontend out of scope (interface-only): it only
//! requires that *something* turns source text into the token/statement/
//! expression shapes the compiler consumes. This crate is that something —
//! a straightforward reference implementation, not a hardened one.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use ast::{BinaryOp, CollectionKind, Expr, FnDecl, ForHead, ForIterator, ForNumeric, LogicalOp, Stmt, UnaryOp};
pub use error::{LexError, ParseError};
pub use lexer::Lexer;
pub use span::{Pathname, Span};
pub use token::{Literal, Token, TokenKind};

/// Lex and parse a full source file in one step.
pub fn parse_source(src: &str, pathname: Pathname) -> Result<Vec<Stmt>, String> {
    let tokens = Lexer::new(src, pathname.clone())
        .tokenize()
        .map_err(|e| e.to_string())?;
    parser::parse(tokens, pathname).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Vec<Stmt> {
        parse_source(src, Pathname::from("<test>")).expect("parse should succeed")
    }

    #[test]
    fn parses_arithmetic_precedence() {
        let stmts = parse("print(1 + 2 * 3);");
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn parses_let_and_if() {
        let stmts = parse("let mut x = 1; if x < 2 { x = 3; } else { x = 4; }");
        assert_eq!(stmts.len(), 2);
        match &stmts[0] {
            Stmt::Let { name, mutable, .. } => {
                assert_eq!(name, "x");
                assert!(*mutable);
            }
            _ => panic!("expected let"),
        }
    }

    #[test]
    fn parses_for_numeric_and_iterator() {
        let stmts = parse("for i in 0 to 10 { } for x in xs { }");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], Stmt::For { head: ForHead::Numeric(_), .. }));
        assert!(matches!(stmts[1], Stmt::For { head: ForHead::Iterator(_), .. }));
    }

    #[test]
    fn parses_try_catch_and_throw() {
        let stmts = parse("try { throw \"boom\"; } catch (e) { print(e); }");
        assert!(matches!(stmts[0], Stmt::Try { .. }));
    }

    #[test]
    fn short_circuit_logical_ops_are_distinct_from_bitwise() {
        let stmts = parse("let a = true or false and not false;");
        match &stmts[0] {
            Stmt::Let { value: Some(Expr::Logical { op: LogicalOp::Or, .. }), .. } => {}
            other => panic!("expected top-level or, got {other:?}"),
        }
    }
}

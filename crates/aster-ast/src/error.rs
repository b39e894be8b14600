use crate::span::Pathname;
use crate::token::TokenKind;
use std::fmt;

pub use crate::lexer::LexError;

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub pathname: Pathname,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: u32, pathname: Pathname) -> Self {
        Self { message: message.into(), line, pathname }
    }

    pub fn unexpected(found: TokenKind, expected: &str, line: u32, pathname: Pathname) -> Self {
        Self::new(format!("expected {expected}, found {found:?}"), line, pathname)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.pathname, self.line, self.message)
    }
}

impl std::error::Error for ParseError {}
impl std::error::Error for LexError {}

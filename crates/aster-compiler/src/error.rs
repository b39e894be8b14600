use crate::scope::ScopeError;
use aster_core::Diagnostic;
use std::fmt;

#[derive(Debug, Clone)]
pub struct CompileError {
    pub message: String,
    pub line: u32,
}

impl CompileError {
    pub fn new(message: impl Into<String>, line: u32) -> Self {
        Self { message: message.into(), line }
    }

    pub fn diagnostic(&self, pathname: &str) -> Diagnostic {
        Diagnostic::error(self.message.clone(), pathname, self.line, 1)
    }

    pub fn from_scope(err: ScopeError, line: u32) -> Self {
        Self::new(err.to_string(), line)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for CompileError {}

//! Runtime (tier 2) errors, rendered through the shared `Diagnostic` type.

use std::fmt;

use aster_core::Diagnostic;

#[derive(Debug, Clone)]
pub struct VmError {
    pub message: String,
    pub line: u32,
    pub pathname: String,
    /// `{function, line}` per frame, innermost first, for the stack trace
    /// tier 2 errors print alongside the message.
    pub trace: Vec<(String, u32)>,
}

impl VmError {
    pub fn new(message: impl Into<String>, line: u32, pathname: impl Into<String>) -> Self {
        Self { message: message.into(), line, pathname: pathname.into(), trace: Vec::new() }
    }

    pub fn with_trace(mut self, trace: Vec<(String, u32)>) -> Self {
        self.trace = trace;
        self
    }

    pub fn diagnostic(&self) -> Diagnostic {
        let mut d = Diagnostic::error(self.message.clone(), self.pathname.clone(), self.line, 1);
        for (func, line) in &self.trace {
            d = d.with_note(format!("at {func} ({}:{line})", self.pathname));
        }
        d
    }
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.pathname, self.line, self.message)
    }
}

impl std::error::Error for VmError {}

//! Source locations.
//!
//! The compiler only ever needs a line number and the originating pathname
//! (spec.md §3: "source line, source pathname"). We keep a byte offset too
//! since it makes the reference lexer/parser's error messages usable.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// A position in a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub offset: u32,
    pub line: u32,
}

impl Span {
    pub fn new(offset: u32, line: u32) -> Self {
        Self { offset, line }
    }
}

/// Interned pathname shared by every token/node produced from one parse.
pub type Pathname = Rc<str>;

//! Location-annotated diagnostics shared by the compiler and the CLI.
//!
//! Ported from the teacher's `src/diagnostics/mod.rs`: a `LineIndex` maps a
//! byte offset to a 1-indexed `(line, col)` pair by binary search, and
//! `Diagnostic::render` prints the offending source line with a caret
//! underneath it — the tier-1/tier-2 error format from §7.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub pathname: String,
    pub line: u32,
    pub col: u32,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, pathname: impl Into<String>, line: u32, col: u32) -> Self {
        Self { severity: Severity::Error, message: message.into(), pathname: pathname.into(), line, col, notes: Vec::new() }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Render as `path:line:col: error: message`, plus the source line and
    /// a caret under `col` when `source` is available.
    pub fn render(&self, source: Option<&str>) -> String {
        let mut out = format!(
            "{}:{}:{}: {}: {}\n",
            self.pathname,
            self.line,
            self.col,
            if self.severity == Severity::Error { "error" } else { "warning" },
            self.message
        );
        if let Some(src) = source {
            if let Some(line_text) = src.lines().nth(self.line.saturating_sub(1) as usize) {
                out.push_str(line_text);
                out.push('\n');
                out.push_str(&" ".repeat(self.col.saturating_sub(1) as usize));
                out.push_str("^\n");
            }
        }
        for note in &self.notes {
            out.push_str(&format!("note: {note}\n"));
        }
        out
    }
}

/// Maps byte offsets into `(line, col)` pairs, both 1-indexed.
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let col = offset - self.line_starts[line] + 1;
        (line as u32 + 1, col as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_finds_first_line() {
        let idx = LineIndex::new("abc\ndef\n");
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(2), (1, 3));
    }

    #[test]
    fn line_col_finds_second_line() {
        let idx = LineIndex::new("abc\ndef\n");
        assert_eq!(idx.line_col(4), (2, 1));
        assert_eq!(idx.line_col(6), (2, 3));
    }

    #[test]
    fn render_includes_caret_line() {
        let d = Diagnostic::error("unexpected token", "a.ast", 2, 3);
        let rendered = d.render(Some("let x = 1;\nlet .. = 2;\n"));
        assert!(rendered.contains("^"));
        assert!(rendered.contains("a.ast:2:3"));
    }
}

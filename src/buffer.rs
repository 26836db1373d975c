//! Rope-backed text addressed by 1-based line numbers.

use std::fmt;

use regex::Regex;
use ropey::Rope;

/// Read-only view of a file's text, as the command line sees it.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    rope: Rope,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Number of lines. A final line break does not start another line.
    pub fn line_count(&self) -> usize {
        let chars = self.rope.len_chars();
        if chars == 0 {
            return 0;
        }
        let lines = self.rope.len_lines();
        if matches!(self.rope.char(chars - 1), '\n' | '\r') {
            lines - 1
        } else {
            lines
        }
    }

    /// Text of line `line` without its line break.
    pub fn line(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        let text = self.rope.line(line - 1).to_string();
        let text = text
            .strip_suffix("\r\n")
            .or_else(|| text.strip_suffix('\n'))
            .or_else(|| text.strip_suffix('\r'))
            .unwrap_or(text.as_str());
        Some(text.to_string())
    }

    /// First line after `from_line` that `re` matches. Does not wrap.
    pub fn find_forward(&self, re: &Regex, from_line: usize) -> Option<usize> {
        (from_line + 1..=self.line_count())
            .find(|&n| self.line(n).is_some_and(|text| re.is_match(&text)))
    }
}

use std::fmt;

/// Delimiter that opened a pattern address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDelim {
    /// `?pattern?`, the range-start form. Closes at the first `?`.
    Question,
    /// `/pattern/`, the range-end form. Closes at the last `/` on the line.
    Slash,
}

impl SearchDelim {
    pub fn as_char(self) -> char {
        match self {
            SearchDelim::Question => '?',
            SearchDelim::Slash => '/',
        }
    }
}

/// Pattern text of a search address, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchPattern {
    pub delim: SearchDelim,
    pub text: String,
}

impl SearchPattern {
    pub fn new(delim: SearchDelim, text: impl Into<String>) -> Self {
        Self {
            delim,
            text: text.into(),
        }
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.delim.as_char();
        write!(f, "{d}{}{d}", self.text)
    }
}

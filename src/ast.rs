//! Unresolved addresses and ranges produced by the parser.

use std::fmt;

use crate::command::Command;
use crate::mark::MarkName;
use crate::offset::Offset;
use crate::search::SearchPattern;

/// What an address refers to, before any offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// A literal 1-based line number.
    AbsoluteLine(usize),
    /// `$`
    LastLine,
    /// `.`, and the base of a bare relative offset.
    CurrentLine,
    /// `'x`
    Mark(MarkName),
    /// `?text?` or `/text/`: the next line matching `text`.
    Pattern(SearchPattern),
}

/// One endpoint of a range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub kind: AddressKind,
    pub offset: Option<Offset>,
}

impl Address {
    pub fn new(kind: AddressKind) -> Self {
        Self { kind, offset: None }
    }

    pub fn with_offset(kind: AddressKind, offset: Offset) -> Self {
        Self {
            kind,
            offset: Some(offset),
        }
    }

    pub fn line(n: usize) -> Self {
        Self::new(AddressKind::AbsoluteLine(n))
    }
}

/// A single line (`end` absent) or an inclusive span of lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Address,
    pub end: Option<Address>,
}

impl Range {
    pub fn single(start: Address) -> Self {
        Self { start, end: None }
    }

    pub fn span(start: Address, end: Address) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// `%`, already expanded to `1,$`.
    pub fn whole_buffer() -> Self {
        Self::span(Address::line(1), Address::new(AddressKind::LastLine))
    }

    /// The range a count prefix stands for: `n` lines from the current one.
    pub fn for_count(n: usize) -> Self {
        let here = Address::new(AddressKind::CurrentLine);
        if n <= 1 {
            Self::single(here)
        } else {
            Self::span(
                here,
                Address::with_offset(AddressKind::CurrentLine, Offset::Pint(n - 1)),
            )
        }
    }
}

/// Everything parsed from one command line. Either part may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedLine {
    pub range: Option<Range>,
    pub command: Option<Command>,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::AbsoluteLine(n) => write!(f, "{n}"),
            AddressKind::LastLine => write!(f, "$"),
            AddressKind::CurrentLine => write!(f, "."),
            AddressKind::Mark(name) => write!(f, "'{name}"),
            AddressKind::Pattern(pattern) => write!(f, "{pattern}"),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(offset) = self.offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        if let Some(end) = &self.end {
            write!(f, ",{end}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ParsedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.range, &self.command) {
            (Some(range), Some(command)) => write!(f, "{range} {command}"),
            (Some(range), None) => write!(f, "{range}"),
            (None, Some(command)) => write!(f, "{command}"),
            (None, None) => Ok(()),
        }
    }
}

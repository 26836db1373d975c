use std::fmt;

use crate::cmd_result::RangeSyntaxError;

/// Line adjustment trailing an address, parsed from `[+-]?[0-9]*`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Offset {
    /// `+` without integer, one line forward.
    Plus,
    /// `-` without integer, one line back.
    Minus,
    /// Positive integer (e.g. `+3`, or `3` after a mark or pattern)
    Pint(usize),
    /// Negative integer (e.g. `-3`)
    Nint(usize),
}

impl Offset {
    /// Parse an offset suffix. `text` must be non-empty.
    pub fn parse(text: &str) -> Result<Self, RangeSyntaxError> {
        let magnitude = |digits: &str| {
            digits
                .parse::<usize>()
                .map_err(|_| RangeSyntaxError::MalformedOffset(text.to_string()))
        };
        match text {
            "+" => Ok(Offset::Plus),
            "-" => Ok(Offset::Minus),
            s if s.starts_with('+') => Ok(Offset::Pint(magnitude(&s[1..])?)),
            s if s.starts_with('-') => Ok(Offset::Nint(magnitude(&s[1..])?)),
            s if !s.is_empty() && s.chars().all(|ch| ch.is_ascii_digit()) => {
                Ok(Offset::Pint(magnitude(s)?))
            }
            _ => Err(RangeSyntaxError::MalformedOffset(text.to_string())),
        }
    }

    /// Signed number of lines this offset moves by.
    pub fn delta(self) -> i128 {
        match self {
            Offset::Plus => 1,
            Offset::Minus => -1,
            Offset::Pint(n) => n as i128,
            Offset::Nint(n) => -(n as i128),
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Plus => write!(f, "+"),
            Offset::Minus => write!(f, "-"),
            Offset::Pint(n) => write!(f, "+{n}"),
            Offset::Nint(n) => write!(f, "-{n}"),
        }
    }
}

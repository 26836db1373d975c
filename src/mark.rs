use std::fmt;
use std::ops::RangeInclusive;

/// Letters that may name a mark.
pub const MARK_LETTERS: RangeInclusive<char> = 'a'..='z';

/// The name of a mark: a single lowercase ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkName(u8);

impl MarkName {
    /// Returns `None` unless `letter` is in `a..=z`.
    pub fn new(letter: char) -> Option<Self> {
        if MARK_LETTERS.contains(&letter) {
            Some(MarkName(letter as u8))
        } else {
            None
        }
    }

    pub fn letter(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for MarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

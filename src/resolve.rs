//! Address resolution: turning parsed addresses into concrete line numbers.
//!
//! Buffer state is reached only through [`LineContext`], so the resolver
//! itself holds nothing and can run against any snapshot the caller provides.

use std::fmt;

use crate::ast::{Address, AddressKind, Range};
use crate::cmd_result::ResolutionError;
use crate::mark::MarkName;

/// Editor state the resolver reads. Lines are 1-based.
///
/// Implementations must not change between the calls made for one command
/// line; callers hold whatever lock they need across parse, resolve and
/// dispatch.
pub trait LineContext {
    /// Number of lines in the buffer.
    fn buffer_length(&self) -> usize;

    /// The line the cursor is on.
    fn current_line(&self) -> usize;

    /// Line previously associated with `mark`, or [`ResolutionError::UnknownMark`].
    fn lookup_mark(&self, mark: MarkName) -> Result<usize, ResolutionError>;

    /// First line after `from_line` matching `pattern`. Never wraps around
    /// to the top; fails with [`ResolutionError::PatternNotFound`] when the
    /// end of the buffer is reached.
    fn search_forward(&self, pattern: &str, from_line: usize) -> Result<usize, ResolutionError>;
}

/// An inclusive span of resolved, in-bounds line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }

    pub fn lines(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{},{}", self.start, self.end)
        }
    }
}

/// Resolve a single address. Pattern searches start after the current line.
pub fn resolve_address<C>(address: &Address, ctx: &C) -> Result<usize, ResolutionError>
where
    C: LineContext + ?Sized,
{
    resolve_from(address, ctx, ctx.current_line())
}

/// Resolve both ends of a range.
///
/// The start resolves like [`resolve_address`]. A pattern at the end searches
/// forward from the resolved start line, not from the cursor.
pub fn resolve_range<C>(range: &Range, ctx: &C) -> Result<LineRange, ResolutionError>
where
    C: LineContext + ?Sized,
{
    let start = resolve_from(&range.start, ctx, ctx.current_line())?;
    let Some(end) = &range.end else {
        return Ok(LineRange::single(start));
    };
    let end = resolve_from(end, ctx, start)?;
    if start > end {
        return Err(ResolutionError::BackwardsRange { start, end });
    }
    Ok(LineRange::new(start, end))
}

/// Base lookup, then the offset, then the bounds check.
fn resolve_from<C>(address: &Address, ctx: &C, search_from: usize) -> Result<usize, ResolutionError>
where
    C: LineContext + ?Sized,
{
    let base = match &address.kind {
        AddressKind::AbsoluteLine(n) => *n,
        AddressKind::LastLine => ctx.buffer_length(),
        AddressKind::CurrentLine => ctx.current_line(),
        AddressKind::Mark(name) => ctx.lookup_mark(*name)?,
        AddressKind::Pattern(pattern) => ctx.search_forward(&pattern.text, search_from)?,
    };
    let target = base as i128 + address.offset.map_or(0, |offset| offset.delta());
    let length = ctx.buffer_length();
    if target < 1 || target > length as i128 {
        return Err(ResolutionError::OutOfRange {
            line: target,
            length,
        });
    }
    Ok(target as usize)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::offset::Offset;
    use crate::parser::parse_line;
    use crate::search::{SearchDelim, SearchPattern};
    use pretty_assertions::assert_eq;

    /// Fixed lines, a cursor and a mark table. Patterns match by substring.
    pub(crate) struct FakeBuffer {
        pub lines: Vec<&'static str>,
        pub current: usize,
        pub marks: HashMap<char, usize>,
    }

    impl FakeBuffer {
        pub fn new(lines: &[&'static str]) -> Self {
            Self {
                lines: lines.to_vec(),
                current: 1,
                marks: HashMap::new(),
            }
        }

        pub fn numbered(count: usize) -> Self {
            Self::new(&vec!["line"; count])
        }

        pub fn at(mut self, current: usize) -> Self {
            self.current = current;
            self
        }

        pub fn mark(mut self, letter: char, line: usize) -> Self {
            self.marks.insert(letter, line);
            self
        }
    }

    impl LineContext for FakeBuffer {
        fn buffer_length(&self) -> usize {
            self.lines.len()
        }

        fn current_line(&self) -> usize {
            self.current
        }

        fn lookup_mark(&self, mark: MarkName) -> Result<usize, ResolutionError> {
            self.marks
                .get(&mark.letter())
                .copied()
                .ok_or(ResolutionError::UnknownMark(mark))
        }

        fn search_forward(&self, pattern: &str, from_line: usize) -> Result<usize, ResolutionError> {
            self.lines
                .iter()
                .enumerate()
                .skip(from_line)
                .find(|(_, text)| text.contains(pattern))
                .map(|(index, _)| index + 1)
                .ok_or_else(|| ResolutionError::PatternNotFound(pattern.to_string()))
        }
    }

    fn resolve(input: &str, ctx: &FakeBuffer) -> Result<LineRange, ResolutionError> {
        let range = parse_line(input).unwrap().range.expect("expected a range");
        resolve_range(&range, ctx)
    }

    #[test]
    fn absolute_ranges_resolve_exactly() {
        let ctx = FakeBuffer::numbered(6);
        for a in 1..=6 {
            for b in a..=6 {
                assert_eq!(resolve(&format!("{a},{b}"), &ctx), Ok(LineRange::new(a, b)));
            }
        }
    }

    #[test]
    fn percent_ignores_cursor() {
        for current in 1..=4 {
            let ctx = FakeBuffer::numbered(4).at(current);
            assert_eq!(resolve("%", &ctx), Ok(LineRange::new(1, 4)));
        }
    }

    #[test]
    fn offsets_compose() {
        let ctx = FakeBuffer::numbered(7);
        assert_eq!(resolve("5+2", &ctx), Ok(LineRange::single(7)));
        assert_eq!(
            resolve("1-5", &ctx),
            Err(ResolutionError::OutOfRange {
                line: -4,
                length: 7
            })
        );
        assert_eq!(
            resolve("5+3", &ctx),
            Err(ResolutionError::OutOfRange { line: 8, length: 7 })
        );
    }

    #[test]
    fn blank_before_offset() {
        let ctx = FakeBuffer::numbered(7).mark('a', 2);
        assert_eq!(resolve("5 +2", &ctx), Ok(LineRange::single(7)));
        assert_eq!(resolve("'a +1, $ -1", &ctx), Ok(LineRange::new(3, 6)));
    }

    #[test]
    fn bounds_are_checked_after_the_offset() {
        let ctx = FakeBuffer::numbered(7);
        assert_eq!(resolve("10-5", &ctx), Ok(LineRange::single(5)));
        assert_eq!(
            resolve("0", &ctx),
            Err(ResolutionError::OutOfRange { line: 0, length: 7 })
        );
    }

    #[test]
    fn current_and_last_line() {
        let ctx = FakeBuffer::numbered(9).at(4);
        assert_eq!(resolve(".,$", &ctx), Ok(LineRange::new(4, 9)));
        assert_eq!(resolve("-,+", &ctx), Ok(LineRange::new(3, 5)));
        assert_eq!(resolve(".-2,$-1", &ctx), Ok(LineRange::new(2, 8)));
    }

    #[test]
    fn marks() {
        let ctx = FakeBuffer::numbered(10).mark('a', 3).mark('b', 8);
        assert_eq!(resolve("'a,'b", &ctx), Ok(LineRange::new(3, 8)));
        assert_eq!(resolve("'a+1,'b-1", &ctx), Ok(LineRange::new(4, 7)));
        assert_eq!(
            resolve("'c", &ctx),
            Err(ResolutionError::UnknownMark(MarkName::new('c').unwrap()))
        );
    }

    #[test]
    fn start_search_is_forward_from_cursor_without_wrap() {
        let ctx = FakeBuffer::new(&["alpha", "beta", "gamma", "beta"]).at(2);
        assert_eq!(resolve("?beta?", &ctx), Ok(LineRange::single(4)));
        assert_eq!(
            resolve("?alpha?", &ctx),
            Err(ResolutionError::PatternNotFound("alpha".to_string()))
        );
    }

    #[test]
    fn search_from_last_line_finds_nothing() {
        let ctx = FakeBuffer::new(&["x", "x", "x"]).at(3);
        assert_eq!(
            resolve("?x?", &ctx),
            Err(ResolutionError::PatternNotFound("x".to_string()))
        );
    }

    #[test]
    fn end_search_starts_after_resolved_start() {
        let ctx = FakeBuffer::new(&["end", "begin", "body", "end", "tail"]).at(1);
        assert_eq!(resolve("2,/end/", &ctx), Ok(LineRange::new(2, 4)));
        assert_eq!(resolve("?begin?,/end/-1", &ctx), Ok(LineRange::new(2, 3)));
        assert_eq!(
            resolve("4,/end/", &ctx),
            Err(ResolutionError::PatternNotFound("end".to_string()))
        );
    }

    #[test]
    fn end_search_uses_start_after_its_offset() {
        let ctx = FakeBuffer::new(&["a", "b", "a", "b", "a"]).at(1);
        assert_eq!(resolve("1+2,/a/", &ctx), Ok(LineRange::new(3, 5)));
    }

    #[test]
    fn backwards_range() {
        let ctx = FakeBuffer::numbered(8);
        assert_eq!(
            resolve("7,3", &ctx),
            Err(ResolutionError::BackwardsRange { start: 7, end: 3 })
        );
    }

    #[test]
    fn empty_buffer_resolves_nothing() {
        let ctx = FakeBuffer::new(&[]).at(0);
        assert_eq!(
            resolve("%", &ctx),
            Err(ResolutionError::OutOfRange { line: 1, length: 0 })
        );
        assert_eq!(
            resolve(".", &ctx),
            Err(ResolutionError::OutOfRange { line: 0, length: 0 })
        );
    }

    #[test]
    fn single_address_helper() {
        let ctx = FakeBuffer::new(&["one", "two", "three"]).at(1);
        let address = Address::with_offset(
            AddressKind::Pattern(SearchPattern::new(SearchDelim::Question, "three")),
            Offset::Minus,
        );
        assert_eq!(resolve_address(&address, &ctx), Ok(2));
    }

    #[test]
    fn resolution_is_repeatable() {
        let ctx = FakeBuffer::new(&["a", "b", "c"]).mark('m', 2);
        let range = parse_line("'m,/c/").unwrap().range.unwrap();
        assert_eq!(resolve_range(&range, &ctx), resolve_range(&range, &ctx));
    }

    #[test]
    fn line_range_helpers() {
        let range = LineRange::new(3, 5);
        assert_eq!(range.line_count(), 3);
        assert!(range.contains(4));
        assert!(!range.contains(6));
        assert_eq!(range.lines().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(range.to_string(), "3,5");
        assert_eq!(LineRange::single(2).to_string(), "2");
    }
}

//! Tokenizer for a single command line.
//!
//! The line is split into address tokens, separators, a command keyword and
//! the untouched argument tail. Blanks (`[ \t]`) and newlines separate tokens
//! but are never part of one, except inside a search pattern or the tail,
//! which are kept verbatim. Pattern text is never interpreted here; the lexer
//! only finds the closing delimiter.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use itertools::Itertools;

use crate::cmd_result::LexError;
use crate::search::SearchDelim;

/// A lexical token borrowing from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Run of `0-9`, `.`, `%` and `$` (absolute, current, whole or last line).
    Run(&'a str),
    /// `'x`, holding whatever character followed the quote.
    Mark(char),
    /// `?text?` or `/text/`.
    Search { delim: SearchDelim, text: &'a str },
    /// `[+-]?[0-9]*` directly attached to the address before it.
    Offset(&'a str),
    /// `+N` or `-N` standing alone, relative to the current line.
    Relative(&'a str),
    Comma,
    /// Command word.
    Keyword(&'a str),
    /// Everything after the keyword and one separating blank, up to the newline.
    Tail(&'a str),
    Newline,
    /// A character that cannot start any token.
    Unexpected(char),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Run(text)
            | Token::Offset(text)
            | Token::Relative(text)
            | Token::Keyword(text)
            | Token::Tail(text) => f.write_str(text),
            Token::Mark(letter) => write!(f, "'{letter}"),
            Token::Search { delim, text } => {
                let d = delim.as_char();
                write!(f, "{d}{text}{d}")
            }
            Token::Comma => f.write_str(","),
            Token::Newline => f.write_str("\\n"),
            Token::Unexpected(ch) => write!(f, "{ch}"),
        }
    }
}

/// A token together with the byte column it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub token: Token<'a>,
    pub column: usize,
}

/// Split `input` into lexemes.
///
/// Only an unterminated search pattern is an error at this stage; anything
/// else odd is handed to the parser as [`Token::Unexpected`].
pub fn tokenize(input: &str) -> Result<Vec<Lexeme<'_>>, LexError> {
    let mut lexer = Lexer {
        src: input,
        chars: input.char_indices().peekable(),
        lexemes: Vec::new(),
    };
    lexer.run()?;
    Ok(lexer.lexemes)
}

struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    lexemes: Vec<Lexeme<'a>>,
}

impl<'a> Lexer<'a> {
    fn run(&mut self) -> Result<(), LexError> {
        loop {
            self.skip_blanks();
            let Some(&(column, ch)) = self.chars.peek() else {
                return Ok(());
            };
            match ch {
                '\n' => {
                    self.chars.next();
                    self.push(Token::Newline, column);
                }
                '\r' if self.src[column + 1..].starts_with('\n') => {
                    self.chars.next();
                    self.chars.next();
                    self.push(Token::Newline, column);
                }
                ',' => {
                    self.chars.next();
                    self.push(Token::Comma, column);
                }
                '0'..='9' | '.' | '%' | '$' => {
                    let run = self.take_while(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '%' | '$'));
                    self.push(Token::Run(run), column);
                    self.offset_suffix(false);
                }
                '\'' => {
                    self.chars.next();
                    match self.chars.peek().copied() {
                        Some((_, letter)) if !letter.is_whitespace() => {
                            self.chars.next();
                            self.push(Token::Mark(letter), column);
                            self.offset_suffix(true);
                        }
                        _ => self.push(Token::Unexpected('\''), column),
                    }
                }
                '?' => {
                    self.search(SearchDelim::Question, column)?;
                    self.offset_suffix(true);
                }
                '/' => {
                    self.search(SearchDelim::Slash, column)?;
                    self.offset_suffix(true);
                }
                '+' | '-' => {
                    let text = self.signed_digits();
                    self.push(Token::Relative(text), column);
                }
                ch if ch.is_alphabetic() => {
                    let word = self.take_while(|ch| !ch.is_whitespace());
                    self.push(Token::Keyword(word), column);
                    self.tail();
                }
                ch => {
                    self.chars.next();
                    self.push(Token::Unexpected(ch), column);
                }
            }
        }
    }

    fn push(&mut self, token: Token<'a>, column: usize) {
        self.lexemes.push(Lexeme { token, column });
    }

    /// Byte offset of the next unread character.
    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    /// Byte offset of the newline ending the line that contains `from`.
    fn line_end(&self, from: usize) -> usize {
        let end = self.src[from..].find('\n').map_or(self.src.len(), |i| from + i);
        if end > from && self.src[..end].ends_with('\r') {
            end - 1
        } else {
            end
        }
    }

    fn skip_blanks(&mut self) {
        while self.chars.next_if(|&(_, ch)| matches!(ch, ' ' | '\t')).is_some() {}
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos();
        let _ = self
            .chars
            .peeking_take_while(|&(_, ch)| pred(ch))
            .count();
        let end = self.pos();
        &src[start..end]
    }

    fn advance_to(&mut self, byte: usize) {
        while self.chars.next_if(|&(i, _)| i < byte).is_some() {}
    }

    /// `[+-]?[0-9]*`, assuming the next char is a sign.
    fn signed_digits(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos();
        self.chars.next();
        let _ = self
            .chars
            .peeking_take_while(|&(_, ch)| ch.is_ascii_digit())
            .count();
        let end = self.pos();
        &src[start..end]
    }

    /// An offset glued to the preceding address. A digit run only counts
    /// when `unsigned_digits` is set; after a number run the digits already
    /// belong to the number.
    fn offset_suffix(&mut self, unsigned_digits: bool) {
        let Some(&(column, ch)) = self.chars.peek() else {
            return;
        };
        let text = match ch {
            '+' | '-' => self.signed_digits(),
            '0'..='9' if unsigned_digits => self.take_while(|ch| ch.is_ascii_digit()),
            _ => return,
        };
        self.push(Token::Offset(text), column);
    }

    /// A delimited pattern. `?` closes at the next `?`; `/` closes at the
    /// last `/` before the end of the line.
    fn search(&mut self, delim: SearchDelim, column: usize) -> Result<(), LexError> {
        let src = self.src;
        let open = delim.as_char();
        let body = column + open.len_utf8();
        let end = self.line_end(body);
        let segment = &src[body..end];
        let close = match delim {
            SearchDelim::Question => segment.find(open),
            SearchDelim::Slash => segment.rfind(open),
        };
        let Some(close) = close else {
            return Err(LexError::UnterminatedSearch { delim: open, column });
        };
        self.push(
            Token::Search {
                delim,
                text: &segment[..close],
            },
            column,
        );
        self.advance_to(body + close + open.len_utf8());
        Ok(())
    }

    /// After a keyword: drop one separating blank, then take the rest of the
    /// line as is.
    fn tail(&mut self) {
        self.chars.next_if(|&(_, ch)| matches!(ch, ' ' | '\t'));
        let src = self.src;
        let start = self.pos();
        let end = self.line_end(start);
        if end > start {
            self.push(Token::Tail(&src[start..end]), start);
            self.advance_to(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|lexeme| lexeme.token)
            .collect()
    }

    #[test]
    fn test_empty_line() {
        assert!(tokens("").is_empty());
        assert!(tokens("  \t ").is_empty());
    }

    #[test]
    fn test_number_range_with_command() {
        assert_eq!(
            tokens("3,7 edit foo bar\n"),
            vec![
                Token::Run("3"),
                Token::Comma,
                Token::Run("7"),
                Token::Keyword("edit"),
                Token::Tail("foo bar"),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_only_one_blank_is_consumed_before_tail() {
        assert_eq!(
            tokens("edit   spaced  \r\n"),
            vec![
                Token::Keyword("edit"),
                Token::Tail("  spaced  "),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_keyword_without_tail() {
        assert_eq!(tokens("set"), vec![Token::Keyword("set")]);
        assert_eq!(tokens("edit \n"), vec![Token::Keyword("edit"), Token::Newline]);
    }

    #[test]
    fn test_offsets_attach_to_addresses() {
        assert_eq!(
            tokens("5+2,'a3"),
            vec![
                Token::Run("5"),
                Token::Offset("+2"),
                Token::Comma,
                Token::Mark('a'),
                Token::Offset("3"),
            ]
        );
        assert_eq!(tokens(".-"), vec![Token::Run("."), Token::Offset("-")]);
    }

    #[test]
    fn test_detached_sign_is_relative() {
        assert_eq!(
            tokens("+3, -"),
            vec![Token::Relative("+3"), Token::Comma, Token::Relative("-")]
        );
        assert_eq!(tokens("5 +2"), vec![Token::Run("5"), Token::Relative("+2")]);
    }

    #[test]
    fn test_question_search_stops_at_first_delimiter() {
        assert_eq!(
            tokens("?a/b?-1,5"),
            vec![
                Token::Search {
                    delim: SearchDelim::Question,
                    text: "a/b",
                },
                Token::Offset("-1"),
                Token::Comma,
                Token::Run("5"),
            ]
        );
    }

    #[test]
    fn test_search_keeps_blanks_verbatim() {
        assert_eq!(
            tokens("? two  words ?"),
            vec![Token::Search {
                delim: SearchDelim::Question,
                text: " two  words ",
            }]
        );
    }

    #[test]
    fn test_slash_search_is_greedy() {
        assert_eq!(
            tokens("1,/a/b/ set wrap"),
            vec![
                Token::Run("1"),
                Token::Comma,
                Token::Search {
                    delim: SearchDelim::Slash,
                    text: "a/b",
                },
                Token::Keyword("set"),
                Token::Tail("wrap"),
            ]
        );
        assert_eq!(
            tokens("1,/x/ edit a/b"),
            vec![
                Token::Run("1"),
                Token::Comma,
                Token::Search {
                    delim: SearchDelim::Slash,
                    text: "x/ edit a",
                },
                Token::Keyword("b"),
            ]
        );
    }

    #[test]
    fn test_slash_search_does_not_cross_newline() {
        assert_eq!(
            tokenize("1,/x\n/"),
            Err(LexError::UnterminatedSearch {
                delim: '/',
                column: 2
            })
        );
    }

    #[test]
    fn test_unterminated_question_search() {
        assert_eq!(
            tokenize("?abc"),
            Err(LexError::UnterminatedSearch {
                delim: '?',
                column: 0
            })
        );
    }

    #[test]
    fn test_columns_are_byte_offsets() {
        let lexemes = tokenize("  'b, $ set wrap").unwrap();
        let columns: Vec<usize> = lexemes.iter().map(|l| l.column).collect();
        assert_eq!(columns, vec![2, 4, 6, 8, 12]);
    }

    #[test]
    fn test_quote_without_letter() {
        assert_eq!(tokens("' "), vec![Token::Unexpected('\'')]);
        assert_eq!(tokens("'A"), vec![Token::Mark('A')]);
    }

    #[test]
    fn test_unexpected_characters() {
        assert_eq!(tokens("#"), vec![Token::Unexpected('#')]);
    }
}

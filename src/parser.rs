//! Recursive descent parser for command lines.
//!
//! Transforms the lexer's token stream into a [`ParsedLine`]. Addresses are
//! checked for shape only; turning them into line numbers is the resolver's
//! job.
//!
//! ```text
//! line       := range? command? newline*
//! range      := start ( ',' end )?
//! start      := ( run[0-9.%] | mark | ?pattern? | relative ) offset?
//! end        := ( run[0-9.$] | mark | /pattern/ | relative ) offset?
//! command    := 'set' option | 'edit' tail?
//! ```

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::ast::{Address, AddressKind, ParsedLine, Range};
use crate::cmd_result::{CmdError, CmdResult, RangeSyntaxError};
use crate::command::{Command, CommandName, SetOption};
use crate::lexer::{Lexeme, Token, tokenize};
use crate::mark::MarkName;
use crate::offset::Offset;
use crate::search::{SearchDelim, SearchPattern};

/// Parse one command line into a [`ParsedLine`].
pub fn parse_line(input: &str) -> CmdResult<ParsedLine> {
    let mut parser = Parser {
        lexemes: tokenize(input)?.into_iter().peekable(),
    };
    let range = parser.parse_range()?;
    let command = parser.parse_command()?;
    parser.expect_end()?;
    Ok(ParsedLine { range, command })
}

struct Parser<'a> {
    lexemes: Peekable<IntoIter<Lexeme<'a>>>,
}

/// Which side of the comma an address sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Start => "start",
            Side::End => "end",
        }
    }
}

/// A parsed address, or `%` before it has been expanded.
enum Endpoint {
    Address(Address),
    WholeBuffer,
}

impl<'a> Parser<'a> {
    fn peek(&mut self) -> Option<Token<'a>> {
        self.lexemes.peek().map(|lexeme| lexeme.token)
    }

    /// Parse `start (',' end)?`. `%` on its own becomes `1,$` here.
    fn parse_range(&mut self) -> CmdResult<Option<Range>> {
        let start = self.parse_address(Side::Start)?;
        let comma = self.lexemes.next_if(|lexeme| lexeme.token == Token::Comma);

        let range = match (start, comma) {
            (None, None) => None,
            (None, Some(comma)) => {
                return Err(RangeSyntaxError::MissingStart {
                    column: comma.column,
                }
                .into());
            }
            (Some(Endpoint::WholeBuffer), None) => Some(Range::whole_buffer()),
            (Some(Endpoint::WholeBuffer), Some(_)) => {
                return Err(RangeSyntaxError::MisplacedAddress {
                    address: "%".to_string(),
                    position: "start with an explicit end",
                }
                .into());
            }
            (Some(Endpoint::Address(start)), None) => Some(Range::single(start)),
            (Some(Endpoint::Address(start)), Some(comma)) => match self.parse_end()? {
                Some(end) => Some(Range::span(start, end)),
                None => {
                    return Err(RangeSyntaxError::DanglingComma {
                        column: comma.column,
                    }
                    .into());
                }
            },
        };
        Ok(range)
    }

    fn parse_end(&mut self) -> CmdResult<Option<Address>> {
        match self.parse_address(Side::End)? {
            None => Ok(None),
            Some(Endpoint::Address(address)) => Ok(Some(address)),
            Some(Endpoint::WholeBuffer) => Err(RangeSyntaxError::MisplacedAddress {
                address: "%".to_string(),
                position: Side::End.name(),
            }
            .into()),
        }
    }

    /// Parse one address and its offset suffix, if the next token starts one.
    fn parse_address(&mut self, side: Side) -> CmdResult<Option<Endpoint>> {
        let Some(lexeme) = self.lexemes.peek().copied() else {
            return Ok(None);
        };
        let kind = match lexeme.token {
            Token::Run(text) => {
                self.lexemes.next();
                match run_kind(text, side)? {
                    Some(kind) => kind,
                    None => {
                        if let Some(Token::Offset(offset) | Token::Relative(offset)) = self.peek() {
                            return Err(
                                RangeSyntaxError::MalformedAddress(format!("{text}{offset}")).into()
                            );
                        }
                        return Ok(Some(Endpoint::WholeBuffer));
                    }
                }
            }
            Token::Mark(letter) => {
                self.lexemes.next();
                let name = MarkName::new(letter).ok_or(RangeSyntaxError::InvalidMark(letter))?;
                AddressKind::Mark(name)
            }
            Token::Search { delim, text } => {
                self.lexemes.next();
                let pattern = SearchPattern::new(delim, text);
                let allowed = match side {
                    Side::Start => SearchDelim::Question,
                    Side::End => SearchDelim::Slash,
                };
                if delim != allowed {
                    return Err(RangeSyntaxError::MisplacedAddress {
                        address: pattern.to_string(),
                        position: side.name(),
                    }
                    .into());
                }
                if text.is_empty() {
                    return Err(RangeSyntaxError::EmptyPattern {
                        column: lexeme.column,
                    }
                    .into());
                }
                AddressKind::Pattern(pattern)
            }
            Token::Relative(text) => {
                self.lexemes.next();
                let offset = Offset::parse(text)?;
                return Ok(Some(Endpoint::Address(Address::with_offset(
                    AddressKind::CurrentLine,
                    offset,
                ))));
            }
            _ => return Ok(None),
        };

        // A blank may separate an address from its offset.
        let offset = match self.peek() {
            Some(Token::Offset(text) | Token::Relative(text)) => {
                self.lexemes.next();
                Some(Offset::parse(text)?)
            }
            _ => None,
        };
        Ok(Some(Endpoint::Address(Address { kind, offset })))
    }

    /// Parse the command keyword and its arguments, if any.
    fn parse_command(&mut self) -> CmdResult<Option<Command>> {
        let Some(Token::Keyword(word)) = self.peek() else {
            return Ok(None);
        };
        self.lexemes.next();
        let name =
            CommandName::lookup(word).ok_or_else(|| CmdError::UnknownCommand(word.to_string()))?;

        let tail = match self.peek() {
            Some(Token::Tail(tail)) => {
                self.lexemes.next();
                tail
            }
            _ => "",
        };

        let command = match name {
            CommandName::Set => Command::Set(parse_set_option(tail)?),
            CommandName::Edit => Command::Edit(tail.to_string()),
        };
        Ok(Some(command))
    }

    /// Only trailing newlines may follow.
    fn expect_end(&mut self) -> CmdResult<()> {
        while self
            .lexemes
            .next_if(|lexeme| lexeme.token == Token::Newline)
            .is_some()
        {}
        match self.lexemes.next() {
            None => Ok(()),
            Some(lexeme) => Err(RangeSyntaxError::Unexpected {
                found: format!("'{}'", lexeme.token),
                column: lexeme.column,
            }
            .into()),
        }
    }
}

/// Classify a run of `0-9 . % $`. `None` means `%`.
fn run_kind(text: &str, side: Side) -> Result<Option<AddressKind>, RangeSyntaxError> {
    match text {
        "." => Ok(Some(AddressKind::CurrentLine)),
        "%" => Ok(None),
        "$" if side == Side::End => Ok(Some(AddressKind::LastLine)),
        "$" => Err(RangeSyntaxError::MisplacedAddress {
            address: text.to_string(),
            position: side.name(),
        }),
        s if s.chars().all(|ch| ch.is_ascii_digit()) => s
            .parse::<usize>()
            .map(|n| Some(AddressKind::AbsoluteLine(n)))
            .map_err(|_| RangeSyntaxError::MalformedAddress(text.to_string())),
        _ => Err(RangeSyntaxError::MalformedAddress(text.to_string())),
    }
}

/// `set` takes exactly one recognised option.
fn parse_set_option(tail: &str) -> CmdResult<SetOption> {
    let mut words = tail.split_whitespace();
    match (words.next(), words.next()) {
        (Some(word), None) => {
            SetOption::lookup(word).ok_or_else(|| CmdError::UnknownOption(word.to_string()))
        }
        (None, _) => Err(CmdError::UnknownOption(String::new())),
        (Some(_), Some(_)) => Err(CmdError::UnknownOption(tail.trim().to_string())),
    }
}

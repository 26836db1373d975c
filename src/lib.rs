//! Line-oriented command language for a text editor: range addresses,
//! `set` and `edit`.
//!
//! A command line is parsed into an unresolved [`ParsedLine`], resolved
//! against a [`LineContext`] and dispatched to a [`CommandHandler`].
//! [`Session`] bundles a buffer with marks, a cursor and settings and plays
//! both roles.
//!
//! # Example
//!
//! ```rust
//! use edcmd::{ExecOutcome, LineRange, Session};
//!
//! let mut session = Session::from_str("alpha\nbeta\ngamma\n");
//!
//! let outcome = session.execute("2,$").unwrap();
//! assert_eq!(outcome, ExecOutcome::Goto(LineRange::new(2, 3)));
//!
//! session.execute("set nowrap").unwrap();
//! assert!(!session.config().wrap);
//!
//! let err = session.execute("'a").unwrap_err();
//! assert_eq!(err.to_string(), "mark 'a' is not set");
//! ```

pub mod ast;
mod buffer;
mod cmd_result;
pub mod command;
mod config;
mod dispatch;
mod lexer;
pub mod logging;
mod mark;
mod marks;
mod offset;
pub mod parser;
mod resolve;
mod search;
mod session;

pub use ast::{Address, AddressKind, ParsedLine, Range};
pub use buffer::Buffer;
pub use cmd_result::{
    CmdError, CmdResult, ErrorKind, LexError, RangeSyntaxError, ResolutionError,
};
pub use command::{
    Command, CommandName, SetOption, complete_command, complete_line, complete_option,
};
pub use config::Config;
pub use dispatch::{CommandHandler, ExecOutcome, dispatch, execute};
pub use lexer::{Lexeme, Token, tokenize};
pub use mark::{MARK_LETTERS, MarkName};
pub use marks::MarkSet;
pub use offset::Offset;
pub use parser::parse_line;
pub use resolve::{LineContext, LineRange, resolve_address, resolve_range};
pub use search::{SearchDelim, SearchPattern};
pub use session::{EditRequest, Session};

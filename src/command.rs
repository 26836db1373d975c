//! Command keywords and `set` options.
//!
//! Both are closed sets. Lookups go through static maps so the recognised
//! names live in exactly one place, and completion is derived from them.

use std::fmt;

use itertools::Itertools;
use phf::{Map, phf_map};

/// A recognised command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    Set,
    Edit,
}

/// A recognised `set` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOption {
    Wrap,
    NoWrap,
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// `set wrap` / `set nowrap`
    Set(SetOption),
    /// `edit <argument text>`, argument kept verbatim.
    Edit(String),
}

/// Keep names sorted alphabetically.
const COMMAND_MAP: Map<&'static str, CommandName> = phf_map! {
    "edit" => CommandName::Edit,
    "set" => CommandName::Set,
};

/// Keep names sorted alphabetically.
const SET_OPTION_MAP: Map<&'static str, SetOption> = phf_map! {
    "nowrap" => SetOption::NoWrap,
    "wrap" => SetOption::Wrap,
};

impl CommandName {
    pub fn lookup(word: &str) -> Option<Self> {
        COMMAND_MAP.get(word).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Set => "set",
            CommandName::Edit => "edit",
        }
    }
}

impl SetOption {
    pub fn lookup(word: &str) -> Option<Self> {
        SET_OPTION_MAP.get(word).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SetOption::Wrap => "wrap",
            SetOption::NoWrap => "nowrap",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SetOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Set(option) => write!(f, "set {option}"),
            Command::Edit(text) if text.is_empty() => write!(f, "edit"),
            Command::Edit(text) => write!(f, "edit {text}"),
        }
    }
}

/// Command keywords starting with `prefix`, sorted.
pub fn complete_command(prefix: &str) -> Vec<&'static str> {
    COMMAND_MAP
        .keys()
        .copied()
        .filter(|name| name.starts_with(prefix))
        .sorted()
        .collect()
}

/// `set` options starting with `prefix`, sorted.
pub fn complete_option(prefix: &str) -> Vec<&'static str> {
    SET_OPTION_MAP
        .keys()
        .copied()
        .filter(|name| name.starts_with(prefix))
        .sorted()
        .collect()
}

/// Candidates for the word being typed at the end of `line`: options after
/// `set`, nothing after another command, command keywords otherwise.
pub fn complete_line(line: &str) -> Vec<&'static str> {
    let not_alphabetic = |ch: char| !ch.is_alphabetic();
    let (head, word) = match line.rfind([' ', '\t']) {
        Some(i) => (&line[..i], &line[i + 1..]),
        None => ("", line),
    };
    let previous = head
        .trim_end()
        .rsplit([' ', '\t'])
        .next()
        .unwrap_or_default()
        .trim_start_matches(not_alphabetic);
    match CommandName::lookup(previous) {
        Some(CommandName::Set) => complete_option(word),
        Some(CommandName::Edit) => Vec::new(),
        None => complete_command(word.trim_start_matches(not_alphabetic)),
    }
}

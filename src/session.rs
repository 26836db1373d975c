use std::fmt;

use regex::Regex;
use tracing::{debug, info};

use crate::buffer::Buffer;
use crate::cmd_result::{CmdResult, ResolutionError};
use crate::command::SetOption;
use crate::config::Config;
use crate::dispatch::{self, CommandHandler, ExecOutcome};
use crate::mark::MarkName;
use crate::marks::MarkSet;
use crate::resolve::{LineContext, LineRange};

/// An `edit` command as handed to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub range: Option<LineRange>,
    pub argument_text: String,
}

/// One buffer with its cursor, marks and display settings.
#[derive(Debug, Clone)]
pub struct Session {
    buffer: Buffer,
    marks: MarkSet,
    current_line: usize,
    config: Config,
    edits: Vec<EditRequest>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_buffer(Buffer::new())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        Self::with_buffer(Buffer::from_str(s))
    }

    fn with_buffer(buffer: Buffer) -> Self {
        let current_line = buffer.line_count().min(1);
        Session {
            buffer,
            marks: MarkSet::new(),
            current_line,
            config: Config::default(),
            edits: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    /// Point `name` at `line`, which must exist.
    pub fn set_mark(&mut self, name: MarkName, line: usize) -> Result<(), ResolutionError> {
        self.check_line(line)?;
        self.marks.set(name, line);
        debug!(%name, line, "mark set");
        Ok(())
    }

    /// Move the cursor to `line`, which must exist.
    pub fn set_current_line(&mut self, line: usize) -> Result<(), ResolutionError> {
        self.check_line(line)?;
        self.current_line = line;
        Ok(())
    }

    /// Every `edit` command executed so far, oldest first.
    pub fn edit_requests(&self) -> &[EditRequest] {
        &self.edits
    }

    /// Parse, resolve and run one command line.
    pub fn execute(&mut self, input: &str) -> CmdResult<ExecOutcome> {
        dispatch::execute(input, self)
    }

    fn check_line(&self, line: usize) -> Result<(), ResolutionError> {
        let length = self.buffer.line_count();
        if line == 0 || line > length {
            return Err(ResolutionError::OutOfRange {
                line: line as i128,
                length,
            });
        }
        Ok(())
    }
}

impl LineContext for Session {
    fn buffer_length(&self) -> usize {
        self.buffer.line_count()
    }

    fn current_line(&self) -> usize {
        self.current_line
    }

    fn lookup_mark(&self, mark: MarkName) -> Result<usize, ResolutionError> {
        self.marks.get(mark).ok_or(ResolutionError::UnknownMark(mark))
    }

    fn search_forward(&self, pattern: &str, from_line: usize) -> Result<usize, ResolutionError> {
        let re = Regex::new(pattern).map_err(|err| ResolutionError::BadPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        self.buffer
            .find_forward(&re, from_line)
            .ok_or_else(|| ResolutionError::PatternNotFound(pattern.to_string()))
    }
}

impl CommandHandler for Session {
    fn goto_range(&mut self, range: LineRange) {
        debug!(%range, "goto");
        self.current_line = range.end;
    }

    fn apply_set(&mut self, option: SetOption) {
        self.config.apply(option);
    }

    fn apply_edit(&mut self, range: Option<LineRange>, argument_text: &str) {
        info!(range = ?range, argument_text, "edit requested");
        self.edits.push(EditRequest {
            range,
            argument_text: argument_text.to_string(),
        });
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.buffer)
    }
}

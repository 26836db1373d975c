//! Command dispatch for parsed lines.
//!
//! A [`ParsedLine`] is resolved against a [`LineContext`] and then handed to
//! exactly one [`CommandHandler`] method. Resolution happens only after the
//! whole line has parsed (so an unknown command never costs a search), and
//! nothing is dispatched unless every address resolves.

use tracing::{debug, trace, warn};

use crate::ast::ParsedLine;
use crate::cmd_result::CmdResult;
use crate::command::{Command, SetOption};
use crate::parser::parse_line;
use crate::resolve::{LineContext, LineRange, resolve_range};

/// Side effects a command line can have on the editor.
pub trait CommandHandler {
    /// A range with no command: move to it.
    fn goto_range(&mut self, range: LineRange);

    /// `set <option>`.
    fn apply_set(&mut self, option: SetOption);

    /// `edit <argument_text>`. The argument is passed through uninterpreted.
    fn apply_edit(&mut self, range: Option<LineRange>, argument_text: &str);
}

/// What executing a line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Blank line, nothing dispatched.
    Noop,
    Goto(LineRange),
    Set {
        range: Option<LineRange>,
        option: SetOption,
    },
    Edit {
        range: Option<LineRange>,
        argument_text: String,
    },
}

/// Parse, resolve and dispatch one line against an object that is both the
/// context and the handler.
pub fn execute<S>(input: &str, session: &mut S) -> CmdResult<ExecOutcome>
where
    S: LineContext + CommandHandler + ?Sized,
{
    let result = parse_line(input).and_then(|line| {
        let outcome = resolve_line(&line, &*session)?;
        apply(&outcome, session);
        Ok(outcome)
    });
    if let Err(err) = &result {
        warn!(input, %err, "command line rejected");
    }
    result
}

/// Resolve an already parsed line and dispatch it.
pub fn dispatch<C, H>(line: &ParsedLine, ctx: &C, handler: &mut H) -> CmdResult<ExecOutcome>
where
    C: LineContext + ?Sized,
    H: CommandHandler + ?Sized,
{
    let outcome = resolve_line(line, ctx)?;
    apply(&outcome, handler);
    Ok(outcome)
}

/// Work out the single action a line stands for, resolving its range.
fn resolve_line<C>(line: &ParsedLine, ctx: &C) -> CmdResult<ExecOutcome>
where
    C: LineContext + ?Sized,
{
    debug!(%line, "dispatching");
    let range = match &line.range {
        Some(range) => {
            let resolved = resolve_range(range, ctx)?;
            trace!(%range, %resolved, "range resolved");
            Some(resolved)
        }
        None => None,
    };

    let outcome = match (&line.command, range) {
        (None, None) => ExecOutcome::Noop,
        (None, Some(range)) => ExecOutcome::Goto(range),
        (Some(Command::Set(option)), range) => ExecOutcome::Set {
            range,
            option: *option,
        },
        (Some(Command::Edit(text)), range) => ExecOutcome::Edit {
            range,
            argument_text: text.clone(),
        },
    };
    Ok(outcome)
}

fn apply<H>(outcome: &ExecOutcome, handler: &mut H)
where
    H: CommandHandler + ?Sized,
{
    match outcome {
        ExecOutcome::Noop => {}
        ExecOutcome::Goto(range) => handler.goto_range(*range),
        ExecOutcome::Set { option, .. } => handler.apply_set(*option),
        ExecOutcome::Edit {
            range,
            argument_text,
        } => handler.apply_edit(*range, argument_text),
    }
}

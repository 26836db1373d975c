use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use edcmd::{ExecOutcome, MarkName, Session, complete_line, logging};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to address; an empty buffer when absent
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Initial current line
    #[arg(short = 'l', long, value_name = "N")]
    line: Option<usize>,

    /// Set a mark before reading commands, e.g. `--mark a=10`
    #[arg(short = 'm', long = "mark", value_name = "X=N", value_parser = parse_mark)]
    marks: Vec<(MarkName, usize)>,

    /// Start with line wrapping off
    #[arg(long)]
    nowrap: bool,

    /// Log filter used when EDCMD_LOG and RUST_LOG are unset
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

fn parse_mark(s: &str) -> Result<(MarkName, usize), String> {
    let (letter, line) = s
        .split_once('=')
        .ok_or_else(|| format!("expected X=N, got '{s}'"))?;
    let mut chars = letter.chars();
    let name = match (chars.next(), chars.next()) {
        (Some(c), None) => MarkName::new(c),
        _ => None,
    }
    .ok_or_else(|| format!("'{letter}' is not a mark name (a to z)"))?;
    let line = line
        .parse()
        .map_err(|err| format!("bad line number '{line}': {err}"))?;
    Ok((name, line))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level)?;

    let mut session = match args.file.as_ref() {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
            let session = Session::from_str(&text);
            info!(path, lines = session.buffer().line_count(), "file loaded");
            session
        }
        None => Session::new(),
    };

    if let Some(line) = args.line {
        session
            .set_current_line(line)
            .with_context(|| format!("--line {line}"))?;
    }
    for (name, line) in args.marks {
        session
            .set_mark(name, line)
            .with_context(|| format!("--mark {name}={line}"))?;
    }
    if args.nowrap {
        session.config_mut().wrap = false;
    }

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for input in stdin.lock().lines() {
        let input = input.context("failed to read stdin")?;
        if let Some(partial) = input.strip_suffix('\t') {
            let candidates = complete_line(partial);
            if candidates.is_empty() {
                writeln!(out, "? no completions for '{partial}'")?;
            } else {
                writeln!(out, "{}", candidates.join(" "))?;
            }
            continue;
        }
        match session.execute(&input) {
            Ok(ExecOutcome::Noop) => {}
            Ok(ExecOutcome::Goto(range)) => {
                for n in range.lines() {
                    writeln!(out, "{}", session.buffer().line(n).unwrap_or_default())?;
                }
            }
            Ok(ExecOutcome::Set { option, .. }) => writeln!(out, "{option}")?,
            Ok(ExecOutcome::Edit {
                range: Some(range),
                argument_text,
            }) => writeln!(out, "edit {range}: {argument_text}")?,
            Ok(ExecOutcome::Edit {
                range: None,
                argument_text,
            }) => writeln!(out, "edit: {argument_text}")?,
            Err(err) => writeln!(out, "? {err}")?,
        }
    }
    Ok(())
}

//! Logging setup.
//!
//! Filter priority:
//!
//! 1. `EDCMD_LOG`
//! 2. `RUST_LOG`
//! 3. the directive passed to [`init`] (the CLI's `--log-level`)
//!
//! Output goes to stderr so that stdout carries only command results.

use std::env;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Calling it again is harmless.
pub fn init(default_directive: &str) -> anyhow::Result<()> {
    let filter = create_filter(default_directive)?;
    if let Err(err) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::debug!(%err, "logging already initialised");
    }
    Ok(())
}

fn create_filter(default_directive: &str) -> anyhow::Result<EnvFilter> {
    if let Ok(directives) = env::var("EDCMD_LOG") {
        return EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid EDCMD_LOG filter '{directives}'"));
    }
    if let Ok(directives) = env::var("RUST_LOG") {
        return EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid RUST_LOG filter '{directives}'"));
    }
    EnvFilter::try_new(default_directive)
        .with_context(|| format!("invalid log level '{default_directive}'"))
}

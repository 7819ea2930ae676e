use std::io::{self, Write};

use anyhow::{Context as _, Result};
use clap::Args;
use clap_complete::{Shell, generate};

/// Binary name completions are registered for.
const BIN_NAME: &str = "hd";

/// Arguments for `hd completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Print the completion script for `args.shell` to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(args.shell, command, &mut out)
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) -> Result<()> {
    generate(shell, command, BIN_NAME, out);
    out.flush().context("flush completion script")
}

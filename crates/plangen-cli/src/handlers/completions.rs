//! Shell completions command handler

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;
use clap::CommandFactory;
use std::io::{self, Write};

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    write_completions(args, &mut io::stdout())
}

fn write_completions(args: CompletionsArgs, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    clap_complete::generate(args.shell.to_clap_shell(), &mut cmd, name, out);
    Ok(())
}

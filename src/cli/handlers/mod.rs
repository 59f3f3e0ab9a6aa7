//! Command handlers for the CLI.

mod render;
mod tree;

use std::io;

use anyhow::Result;
use clap::CommandFactory;

use super::{Cli, CompletionsArgs};

pub use render::handle_render;
pub use tree::handle_tree;

/// Handle the `completions` command.
pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, extract::extract, init::init},
};

/// Dispatch a parsed command line to its command handler.
///
/// # Returns
/// - `Ok(CommandResult)` with the command's summary
/// - `Err` if the command fails (e.g., bad config, unreadable files, malformed JSON)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

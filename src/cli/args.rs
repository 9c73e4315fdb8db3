//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translation keys and create or merge translation files
//! - `init`: Initialize tkm configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Files to extract from instead of walking the input directory
    pub files: Vec<PathBuf>,

    /// Source root directory (overrides config file)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Translation files directory (overrides config file)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Comma-delimited languages, e.g. "en,fr" (overrides config file)
    #[arg(short, long)]
    pub langs: Option<String>,

    /// Value of every generated key instead of a placeholder
    #[arg(long)]
    pub default_value: Option<String>,

    /// Comma-delimited leading key segments to keep flat in the global scope
    #[arg(long)]
    pub keep_flat: Option<String>,

    /// Transloco config file declaring `scopeMapping`
    #[arg(long)]
    pub transloco_config: Option<PathBuf>,

    /// Overwrite existing translation files of extracted scopes instead of merging
    #[arg(long)]
    pub replace: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys and create or merge translation files
    Extract(ExtractCommand),
    /// Initialize a new .tkmrc.json configuration file
    Init,
}

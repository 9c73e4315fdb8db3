use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::{ExtractArgs, ExtractCommand},
    report::ConsoleReporter,
};
use super::{CommandResult, CommandSummary};
use crate::{
    config::{Config, ConfigLoadResult, load_config, normalize_output_dir, split_list},
    core::{RunOptions, run_extraction},
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let cwd = env::current_dir().context("Failed to read the current directory")?;
    let ConfigLoadResult { config, from_file } = load_config(&cwd)?;

    if args.verbose && !from_file {
        eprintln!(
            "{} No configuration file found, using defaults",
            "note:".bold().cyan()
        );
    }

    let options = resolve_options(args, config);
    let mut reporter = ConsoleReporter::stdout(options.verbose);
    let summary = run_extraction(&options, &mut reporter)?;

    Ok(CommandResult {
        summary: CommandSummary::Extract(summary),
    })
}

/// Merge CLI arguments over the config file, which is already merged over
/// the built-in defaults.
fn resolve_options(args: ExtractArgs, config: Config) -> RunOptions {
    let keep_flat = match args.keep_flat {
        Some(list) => split_list(&list),
        None => config
            .keep_flat
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
    };

    RunOptions {
        input: args.input.unwrap_or_else(|| PathBuf::from(&config.input)),
        files: args.files,
        output: normalize_output_dir(args.output.as_deref().unwrap_or(&config.output)),
        langs: args.langs.unwrap_or(config.langs),
        transloco_config: args
            .transloco_config
            .or_else(|| config.transloco_config.map(PathBuf::from)),
        keep_flat,
        default_value: args.default_value.or(config.default_value),
        ignores: config.ignores,
        replace: args.replace,
        verbose: args.verbose,
    }
}

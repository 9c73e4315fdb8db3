//! Console output.
//!
//! Progress of an extraction is printed by [`ConsoleReporter`] as events
//! arrive; [`print`] reports the final outcome of a command. Kept apart from
//! the core so the engine can be used as a library without output.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary};
use crate::{config::CONFIG_FILE_NAME, core::Reporter};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Prints run progress to a writer.
pub struct ConsoleReporter<W: Write> {
    writer: W,
    verbose: bool,
    created: Vec<PathBuf>,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W, verbose: bool) -> Self {
        Self {
            writer,
            verbose,
            created: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn success(&mut self, message: String) {
        let _ = writeln!(self.writer, "{} {}", SUCCESS_MARK.green(), message.green());
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn extraction_started(&mut self, lang_count: usize) {
        let _ = writeln!(
            self.writer,
            "Extracting translation keys for {}",
            plural(lang_count, "language", "languages").bold()
        );
    }

    fn keys_found(&mut self, key_count: usize, file_count: usize) {
        self.success(format!(
            "Extracted {} from {}",
            plural(key_count, "key", "keys"),
            plural(file_count, "file", "files")
        ));
    }

    fn paths_skipped(&mut self, count: usize) {
        print_skipped_warning(count, self.verbose);
    }

    fn file_created(&mut self, path: &Path) {
        self.created.push(path.to_path_buf());
    }

    fn files_merged(&mut self, count: usize, replaced: bool) {
        let verb = if replaced { "Updated" } else { "Merged" };
        self.success(format!(
            "{} {}",
            verb,
            plural(count, "existing translation file", "existing translation files")
        ));
    }

    fn finished(&mut self) {
        if !self.created.is_empty() {
            self.success(format!(
                "Created {}",
                plural(self.created.len(), "translation file", "translation files")
            ));
            if self.verbose {
                for path in &self.created {
                    let _ = writeln!(self.writer, "  {} {}", "+".cyan(), path.display());
                }
            }
        }
        let _ = writeln!(self.writer, "{}", "Done".bold());
    }
}

/// Print a warning about input paths that could not be read.
pub fn print_skipped_warning(count: usize, verbose: bool) {
    print_skipped_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a skipped-paths warning to a custom writer. Verbose runs already
/// printed one warning per path.
pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Print the outcome of a command to stdout.
pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        // Progress and totals were already printed by the reporter.
        CommandSummary::Extract(_) => {}
        CommandSummary::Init(summary) => {
            if summary.created {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!("Created {}", CONFIG_FILE_NAME).green()
                );
            }
        }
    }
}

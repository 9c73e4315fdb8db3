//! Run orchestration: scopes -> extraction -> materialization.
//!
//! The source and markup pipelines share no state, so they run concurrently
//! on the rayon pool and each builds its own key tree. The markup tree is
//! merged on top of the source tree once both have finished.

use std::path::PathBuf;

use anyhow::Result;

use crate::{
    config::split_list,
    core::{
        extract::{
            ExtractOptions, ExtractResult, markup::extract_markup_keys,
            source::extract_source_keys,
        },
        file_scanner::{ScanResult, classify_files, scan_files},
        materialize::materialize,
        reporter::Reporter,
        scope::load_scope_map,
        tree::KeyTree,
    },
};

/// Everything a run needs, after CLI arguments and config are merged.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root directory walked when no explicit files are given.
    pub input: PathBuf,
    /// Explicit file list; replaces the directory walk when non-empty.
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
    /// Comma-delimited language codes.
    pub langs: String,
    pub transloco_config: Option<PathBuf>,
    pub keep_flat: Vec<String>,
    pub default_value: Option<String>,
    pub ignores: Vec<String>,
    pub replace: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub keys: KeyTree,
    pub key_count: usize,
    pub file_count: usize,
    /// Input paths the directory walk could not read.
    pub skipped_count: usize,
    pub merged_count: usize,
    pub created_count: usize,
}

/// Extract keys from both file sets concurrently and merge the two trees.
pub fn build_keys(files: &ScanResult, options: &ExtractOptions) -> Result<ExtractResult> {
    let (source, markup) = rayon::join(
        || extract_source_keys(&files.source_files, options),
        || extract_markup_keys(&files.markup_files, options),
    );
    let ExtractResult {
        mut keys,
        file_count: source_count,
    } = source?;
    let markup = markup?;

    keys.merge(markup.keys);

    Ok(ExtractResult {
        keys,
        file_count: source_count + markup.file_count,
    })
}

/// Run the whole pipeline and write the translation files.
///
/// # Errors
///
/// Returns error if:
/// - The Transloco config cannot be read or its `scopeMapping` is malformed
/// - A source or markup file cannot be read
/// - An existing translation file is not a JSON object, or cannot be written
pub fn run_extraction(options: &RunOptions, reporter: &mut dyn Reporter) -> Result<RunSummary> {
    let extract_options = ExtractOptions {
        scopes: load_scope_map(options.transloco_config.as_deref())?,
        keep_flat: options.keep_flat.clone(),
        default_value: options.default_value.clone(),
    };

    reporter.extraction_started(split_list(&options.langs).len());

    let files = if options.files.is_empty() {
        scan_files(&options.input, &options.ignores, options.verbose)
    } else {
        classify_files(&options.files)
    };
    if files.skipped_count > 0 {
        reporter.paths_skipped(files.skipped_count);
    }

    let ExtractResult { keys, file_count } = build_keys(&files, &extract_options)?;
    let key_count = keys.key_count();
    reporter.keys_found(key_count, file_count);

    let summary = materialize(
        &keys,
        &options.langs,
        &options.output,
        options.replace,
        reporter,
    )?;
    reporter.finished();

    Ok(RunSummary {
        keys,
        key_count,
        file_count,
        skipped_count: files.skipped_count,
        merged_count: summary.merged.len(),
        created_count: summary.created.len(),
    })
}

//! Progress reporting for a run.
//!
//! The orchestrator and the materializer report through this trait instead of
//! printing, so the library can run silently and the CLI decides how output
//! looks.

use std::path::Path;

pub trait Reporter {
    /// Extraction is about to start for `lang_count` languages.
    fn extraction_started(&mut self, lang_count: usize);

    /// Extraction finished.
    fn keys_found(&mut self, key_count: usize, file_count: usize);

    /// Paths under the input directory could not be read during the walk.
    fn paths_skipped(&mut self, count: usize);

    /// A translation file that did not exist yet was written.
    fn file_created(&mut self, path: &Path);

    /// Existing translation files were rewritten, merged or replaced.
    fn files_merged(&mut self, count: usize, replaced: bool);

    fn finished(&mut self);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn extraction_started(&mut self, _lang_count: usize) {}

    fn keys_found(&mut self, _key_count: usize, _file_count: usize) {}

    fn paths_skipped(&mut self, _count: usize) {}

    fn file_created(&mut self, _path: &Path) {}

    fn files_merged(&mut self, _count: usize, _replaced: bool) {}

    fn finished(&mut self) {}
}

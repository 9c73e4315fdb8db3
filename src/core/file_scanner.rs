use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Which pipeline a file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// TypeScript sources (`.ts`), excluding test files.
    Source,
    /// Angular templates (`.html`).
    Markup,
}

impl FileKind {
    pub fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts") if !is_test_file(path) => Some(FileKind::Source),
            Some("html") => Some(FileKind::Markup),
            _ => None,
        }
    }
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub source_files: Vec<PathBuf>,
    pub markup_files: Vec<PathBuf>,
    pub skipped_count: usize,
}

impl ScanResult {
    pub fn push(&mut self, path: PathBuf) {
        match FileKind::of(&path) {
            Some(FileKind::Source) => self.source_files.push(path),
            Some(FileKind::Markup) => self.markup_files.push(path),
            None => {}
        }
    }

    pub fn file_count(&self) -> usize {
        self.source_files.len() + self.markup_files.len()
    }
}

/// Walk `base_dir` and sort its files into source and markup sets.
///
/// Entries are visited in file-name order so repeated runs see the same
/// sequence of keys.
pub fn scan_files(base_dir: &Path, ignore_patterns: &[String], verbose: bool) -> ScanResult {
    let mut result = ScanResult::default();

    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        match Pattern::new(p) {
            Ok(pattern) => glob_patterns.push(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
            }
        }
    }

    if !base_dir.exists() {
        if verbose {
            eprintln!(
                "{} Input path does not exist: {}",
                "warning:".bold().yellow(),
                base_dir.display()
            );
        }
        return result;
    }

    for entry in WalkDir::new(base_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if entry.file_type().is_file() {
            result.push(path.to_path_buf());
        }
    }

    result
}

/// Sort an explicit file list into source and markup sets.
pub fn classify_files(files: &[PathBuf]) -> ScanResult {
    let mut result = ScanResult::default();
    for file in files {
        result.push(file.clone());
    }
    result
}

fn is_test_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    TEST_FILE_PATTERNS
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .any(|pattern| pattern.matches(&path_str))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_scan_splits_by_kind() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.component.ts")).unwrap();
        File::create(dir_path.join("app.component.html")).unwrap();
        File::create(dir_path.join("app.component.spec.ts")).unwrap();
        File::create(dir_path.join("styles.css")).unwrap();

        let result = scan_files(dir_path, &[], false);

        assert_eq!(names(&result.source_files), vec!["app.component.ts"]);
        assert_eq!(names(&result.markup_files), vec!["app.component.html"]);
        assert_eq!(result.file_count(), 2);
    }

    #[test]
    fn test_scan_is_sorted_and_recursive() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        fs::create_dir_all(dir_path.join("b")).unwrap();
        fs::create_dir_all(dir_path.join("a")).unwrap();
        File::create(dir_path.join("b/z.html")).unwrap();
        File::create(dir_path.join("a/y.html")).unwrap();
        File::create(dir_path.join("x.html")).unwrap();

        let result = scan_files(dir_path, &[], false);

        assert_eq!(names(&result.markup_files), vec!["y.html", "z.html", "x.html"]);
    }

    #[test]
    fn test_scan_respects_ignores() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        fs::create_dir_all(dir_path.join("node_modules/lib")).unwrap();
        File::create(dir_path.join("node_modules/lib/index.ts")).unwrap();
        File::create(dir_path.join("main.ts")).unwrap();

        let result = scan_files(dir_path, &["**/node_modules/**".to_string()], false);

        assert_eq!(names(&result.source_files), vec!["main.ts"]);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let result = scan_files(&dir.path().join("missing"), &[], false);
        assert_eq!(result.file_count(), 0);
    }

    #[test]
    fn test_classify_files() {
        let files = vec![
            PathBuf::from("src/a.ts"),
            PathBuf::from("src/a.html"),
            PathBuf::from("src/a.spec.ts"),
            PathBuf::from("README.md"),
        ];
        let result = classify_files(&files);

        assert_eq!(result.source_files, vec![PathBuf::from("src/a.ts")]);
        assert_eq!(result.markup_files, vec![PathBuf::from("src/a.html")]);
    }

    #[test]
    fn test_file_kind() {
        assert_eq!(FileKind::of(Path::new("a.ts")), Some(FileKind::Source));
        assert_eq!(FileKind::of(Path::new("a.html")), Some(FileKind::Markup));
        assert_eq!(FileKind::of(Path::new("dir/a.spec.ts")), None);
        assert_eq!(FileKind::of(Path::new("a.json")), None);
    }
}

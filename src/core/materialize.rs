//! Reconcile a key tree with the translation files on disk.
//!
//! Every scope of the tree yields one `<lang>.json` per language, in the
//! output root for the global scope and in `<output>/<scope>/` otherwise.
//! Files that already exist are merged: values found in the file always win,
//! extracted keys only fill the gaps. Missing files are created from the tree.

use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::{
    config::split_list,
    core::{
        reporter::Reporter,
        tree::{KeyTree, Scope, is_valid_scope_name, merge_deep},
    },
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MaterializeSummary {
    /// Pre-existing files that were rewritten.
    pub merged: Vec<PathBuf>,
    /// Files written for the first time.
    pub created: Vec<PathBuf>,
}

/// Write the translation files for `tree`.
///
/// `langs` is a comma-delimited list of language codes. With `replace`, the
/// existing files of extracted scopes are overwritten with the tree's values
/// instead of being merged.
pub fn materialize(
    tree: &KeyTree,
    langs: &str,
    output_dir: &Path,
    replace: bool,
    reporter: &mut dyn Reporter,
) -> Result<MaterializeSummary> {
    let langs = split_list(langs);
    if langs.is_empty() {
        bail!("No language to generate translation files for");
    }

    if let Some(dir) = tree
        .scopes()
        .filter_map(Scope::directory)
        .find(|dir| !is_valid_scope_name(dir))
    {
        bail!(
            "Invalid scope name \"{}\": must be a relative path inside the output directory",
            dir
        );
    }

    let expected = expected_files(tree, &langs);
    ensure_output_dirs(tree, output_dir)?;

    let mut summary = MaterializeSummary::default();
    let mut satisfied: HashSet<PathBuf> = HashSet::new();

    for path in find_json_files(output_dir)? {
        let relative = path.strip_prefix(output_dir).unwrap_or(&path).to_path_buf();
        let scope = scope_of(&relative);
        let existing = read_json_object(&path)?;

        let content = match (replace, tree.get(&scope)) {
            (true, Some(keys)) => keys.clone(),
            (_, keys) => {
                let mut merged = keys.cloned().unwrap_or_default();
                merge_deep(&mut merged, &existing);
                merged
            }
        };
        write_json_object(&path, &content)?;

        satisfied.insert(relative);
        summary.merged.push(path);
    }

    for (relative, scope) in expected {
        if satisfied.contains(&relative) {
            continue;
        }
        let path = output_dir.join(&relative);
        let keys = tree.get(&scope).cloned().unwrap_or_default();
        write_json_object(&path, &keys)?;

        reporter.file_created(&relative);
        summary.created.push(path);
    }

    if !summary.merged.is_empty() {
        reporter.files_merged(summary.merged.len(), replace);
    }

    Ok(summary)
}

/// Every `(scope, lang)` file the tree calls for, relative to the output root.
fn expected_files(tree: &KeyTree, langs: &[String]) -> Vec<(PathBuf, Scope)> {
    tree.scopes()
        .flat_map(|scope| {
            langs.iter().map(move |lang| {
                let file_name = format!("{}.json", lang);
                let relative = match scope.directory() {
                    Some(dir) => Path::new(dir).join(file_name),
                    None => PathBuf::from(file_name),
                };
                (relative, scope.clone())
            })
        })
        .collect()
}

fn ensure_output_dirs(tree: &KeyTree, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    for dir in tree.scopes().filter_map(Scope::directory) {
        let path = output_dir.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    Ok(())
}

fn find_json_files(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(output_dir).sort_by_file_name() {
        let entry = entry.with_context(|| {
            format!("Failed to scan output directory: {}", output_dir.display())
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Scope a translation file belongs to, from its path relative to the output
/// root: `en.json` is global, `admin/users/en.json` belongs to `admin/users`.
fn scope_of(relative: &Path) -> Scope {
    let dirs: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|component| match component {
                    Component::Normal(name) => Some(name.to_string_lossy().to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if dirs.is_empty() {
        Scope::Global
    } else {
        Scope::Named(dirs.join("/"))
    }
}

fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("Root of JSON file must be an object: {}", path.display()),
    }
}

/// Uses 2-space indentation and adds a trailing newline.
fn write_json_object(path: &Path, map: &Map<String, Value>) -> Result<()> {
    let content = serde_json::to_string_pretty(map).context("Failed to serialize JSON")?;

    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

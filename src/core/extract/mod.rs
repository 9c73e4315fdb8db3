//! Key extraction from source and markup files.
//!
//! Each extractor turns a file's text into [`RawReference`]s. A [`KeyBuilder`]
//! resolves those against the scope mapping and collects them into a
//! [`KeyTree`].
//!
//! ## Module Structure
//!
//! - `patterns`: regular expressions for every recognized syntactic form
//! - `source`: TypeScript sources (`translate()` and `TranslocoService`)
//! - `markup`: Angular templates (containers, directives and pipes)

pub mod markup;
pub mod patterns;
pub mod source;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::{
    scope::{ScopeMap, to_camel_case},
    tree::{CanonicalReference, KeyTree, Scope, is_valid_scope_name},
};

/// Prefix of the placeholder value generated for keys without a default.
pub const MISSING_VALUE: &str = "Missing value for";

/// A key reference as matched, before scope resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawReference {
    /// A key literal, optionally with an explicit scope argument.
    Literal { key: String, scope: Option<String> },
    /// A key read through a container's bound variable (`t.home.title`),
    /// relative to the container's `read` clause.
    Bound {
        read: Option<String>,
        path: Vec<String>,
    },
}

impl RawReference {
    pub fn literal(key: impl Into<String>) -> Self {
        RawReference::Literal {
            key: key.into(),
            scope: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub scopes: ScopeMap,
    /// Leading key segments whose keys are stored flat in the global scope.
    pub keep_flat: Vec<String>,
    /// Value for every generated key; a placeholder is generated when unset.
    pub default_value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExtractResult {
    pub keys: KeyTree,
    pub file_count: usize,
}

/// Resolves raw references and accumulates them into a key tree.
pub struct KeyBuilder<'a> {
    options: &'a ExtractOptions,
    tree: KeyTree,
}

impl<'a> KeyBuilder<'a> {
    pub fn new(options: &'a ExtractOptions) -> Self {
        Self {
            options,
            tree: KeyTree::new(),
        }
    }

    pub fn add(&mut self, reference: &RawReference) {
        if let Some(canonical) = self.canonicalize(reference) {
            self.tree.insert_reference(canonical);
        }
    }

    pub fn finish(self) -> KeyTree {
        self.tree
    }

    /// Resolve a reference to its scope, key path and value.
    ///
    /// Returns `None` for references without any key segment.
    pub fn canonicalize(&self, reference: &RawReference) -> Option<CanonicalReference> {
        match reference {
            RawReference::Literal { key, scope } => {
                let path = split_key(key);
                if path.is_empty() {
                    return None;
                }
                if self.keeps_flat(&path) {
                    return Some(self.flat(key.trim()));
                }
                match scope.as_deref().filter(|s| !s.is_empty()) {
                    Some(scope) => {
                        let scope_key = self.options.scopes.resolve_explicit(scope);
                        if !is_valid_scope_name(scope_key) {
                            return Some(self.unscoped(path));
                        }
                        let full_key = format!("{}.{}", scope_key, path.join("."));
                        Some(self.scoped(Scope::named(scope_key), path, &full_key))
                    }
                    None => Some(self.unscoped(path)),
                }
            }
            RawReference::Bound { read, path } => {
                if path.is_empty() {
                    return None;
                }
                if self.keeps_flat(path) {
                    return Some(self.flat(&path.join(".")));
                }
                match read.as_deref().filter(|r| !r.is_empty()) {
                    Some(read) => Some(self.read_scoped(read, path)),
                    None => Some(self.unscoped(path.clone())),
                }
            }
        }
    }

    fn keeps_flat(&self, path: &[String]) -> bool {
        path.first()
            .is_some_and(|leading| self.options.keep_flat.contains(leading))
    }

    fn flat(&self, key: &str) -> CanonicalReference {
        CanonicalReference {
            scope: Scope::Global,
            path: vec![key.to_string()],
            value: self.options.default_value.clone().unwrap_or_default(),
        }
    }

    /// A key without explicit scope: its leading segment names a scope when it
    /// matches a normalized scope identifier.
    fn unscoped(&self, path: Vec<String>) -> CanonicalReference {
        let full_key = path.join(".");

        if path.len() > 1
            && let Some(scope_key) = self.options.scopes.scope_for_identifier(&path[0])
            && is_valid_scope_name(scope_key)
        {
            let inner = path[1..].to_vec();
            return self.scoped(Scope::named(scope_key), inner, &full_key);
        }

        self.scoped(Scope::Global, path, &full_key)
    }

    /// A container key relative to `read`. The first `read` segment selects a
    /// declared scope when its normalized form is known, the rest prefixes the
    /// key. Otherwise the whole `read` value is used as the scope.
    fn read_scoped(&self, read: &str, path: &[String]) -> CanonicalReference {
        let full_key = format!("{}.{}", read, path.join("."));
        let mut segments = read.split('.');
        let first = segments.next().unwrap_or_default();

        let (scope, inner) = match self.options.scopes.scope_for_identifier(&to_camel_case(first)) {
            Some(scope_key) => (
                scope_key,
                segments
                    .map(str::to_string)
                    .chain(path.iter().cloned())
                    .collect(),
            ),
            None => (read, path.to_vec()),
        };

        if !is_valid_scope_name(scope) {
            return self.unscoped(path.to_vec());
        }
        self.scoped(Scope::named(scope), inner, &full_key)
    }

    fn scoped(&self, scope: Scope, path: Vec<String>, full_key: &str) -> CanonicalReference {
        CanonicalReference {
            scope,
            path,
            value: self.value_for(full_key),
        }
    }

    fn value_for(&self, full_key: &str) -> String {
        match &self.options.default_value {
            Some(value) => value.clone(),
            None => format!("{} '{}'", MISSING_VALUE, full_key),
        }
    }
}

fn split_key(key: &str) -> Vec<String> {
    let key = key.trim();
    if key.is_empty() {
        return Vec::new();
    }
    key.split('.').map(str::to_string).collect()
}

/// Collect every literal key matched by `regex` in `text`.
///
/// A match carrying both `key` and `key2` yields both keys. Otherwise the key
/// (or backtick key) is stripped of quotes and whitespace and split on `:`,
/// which separates the branches of a ternary captured as a single group.
pub fn literal_references(regex: &Regex, text: &str, references: &mut Vec<RawReference>) {
    for captures in regex.captures_iter(text) {
        let scope = captures
            .name("scope")
            .or_else(|| captures.name("backtickScope"))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());

        let keys: Vec<String> = match (captures.name("key"), captures.name("key2")) {
            (Some(key), Some(key2)) => vec![key.as_str().to_string(), key2.as_str().to_string()],
            (key, _) => {
                let Some(raw) = key.or_else(|| captures.name("backtickKey")) else {
                    continue;
                };
                let cleaned: String = raw
                    .as_str()
                    .chars()
                    .filter(|c| !matches!(c, '\'' | '"') && !c.is_whitespace())
                    .collect();
                cleaned
                    .split(':')
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect()
            }
        };

        references.extend(keys.into_iter().map(|key| RawReference::Literal {
            key,
            scope: scope.clone(),
        }));
    }
}

/// Run `collect` over every file and build one key tree from the results.
///
/// Files are processed in order; the first unreadable file aborts extraction.
pub fn extract_files(
    files: &[PathBuf],
    options: &ExtractOptions,
    collect: fn(&str) -> Result<Vec<RawReference>>,
) -> Result<ExtractResult> {
    let mut builder = KeyBuilder::new(options);

    for file in files {
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read file: {}", file.display()))?;
        let references = collect(&content)
            .with_context(|| format!("Failed to extract keys from: {}", file.display()))?;
        for reference in &references {
            builder.add(reference);
        }
    }

    Ok(ExtractResult {
        keys: builder.finish(),
        file_count: files.len(),
    })
}

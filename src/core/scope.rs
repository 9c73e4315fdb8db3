//! Scope mapping loaded from the Transloco configuration.
//!
//! A Transloco config declares `scopeMapping: { 'declared/path': 'scopeKey' }`.
//! Templates and sources refer to a scope through the camel-cased form of its
//! key (`todos-page` is read as `todosPage`), so besides the declared mapping
//! we keep a reverse lookup from that identifier back to the scope key.

use std::{collections::HashMap, fs, path::Path, sync::LazyLock};

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde_json::{Map, Value};

static SCOPE_MAPPING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"scopeMapping\s*:\s*(?P<scopes>\{[^}]*\})").unwrap());

/// Declared scopes plus their normalized reverse lookup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScopeMap {
    /// `declared path -> scope key`, exactly as written in the config.
    scope_map: HashMap<String, String>,
    /// `camelCase(scope key) -> scope key`.
    keys_map: HashMap<String, String>,
}

impl ScopeMap {
    pub fn new(scope_map: HashMap<String, String>) -> Self {
        let keys_map = scope_map
            .values()
            .map(|scope_key| (to_camel_case(scope_key), scope_key.clone()))
            .collect();

        Self {
            scope_map,
            keys_map,
        }
    }

    /// Parse the `scopeMapping` declaration out of a config file's text.
    ///
    /// Single quotes are normalized to double quotes before the object is read
    /// as JSON. A file without a declaration yields an empty map.
    pub fn parse(content: &str) -> Result<Self> {
        let Some(captures) = SCOPE_MAPPING_REGEX.captures(content) else {
            return Ok(Self::default());
        };
        let sanitized = captures["scopes"].trim().replace('\'', "\"");

        let declared: Map<String, Value> = serde_json::from_str(&sanitized)
            .with_context(|| format!("Invalid scopeMapping declaration: {}", sanitized))?;

        let mut scope_map = HashMap::with_capacity(declared.len());
        for (path, value) in declared {
            let Value::String(scope_key) = value else {
                bail!(
                    "Invalid scopeMapping declaration: value of \"{}\" must be a string",
                    path
                );
            };
            scope_map.insert(path, scope_key);
        }

        Ok(Self::new(scope_map))
    }

    /// Scope key declared for an exact path.
    pub fn declared(&self, path: &str) -> Option<&str> {
        self.scope_map.get(path).map(String::as_str)
    }

    /// Scope key whose normalized identifier is `identifier`.
    pub fn scope_for_identifier(&self, identifier: &str) -> Option<&str> {
        self.keys_map.get(identifier).map(String::as_str)
    }

    /// Resolve an explicit scope argument (`translate(key, params, 'scope')`).
    ///
    /// The scope string is matched against the declared paths, then once more
    /// with its last `/` segment trimmed. Anything else is used verbatim as a
    /// new scope.
    pub fn resolve_explicit<'a>(&'a self, scope: &'a str) -> &'a str {
        if let Some(scope_key) = self.declared(scope) {
            return scope_key;
        }

        if let Some((parent, _)) = scope.rsplit_once('/')
            && !parent.is_empty()
            && let Some(scope_key) = self.declared(parent)
        {
            return scope_key;
        }

        scope
    }
}

/// Load the scope mapping from an optional Transloco config file.
pub fn load_scope_map(config_path: Option<&Path>) -> Result<ScopeMap> {
    let Some(path) = config_path else {
        return Ok(ScopeMap::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read Transloco config: {}", path.display()))?;

    ScopeMap::parse(&content)
        .with_context(|| format!("Failed to load scopes from: {}", path.display()))
}

/// Fold a scope key into the identifier form used in templates.
///
/// The first word character is lowercased, every word character that starts a
/// new word (after a non-word character) is uppercased, then whitespace, `_`,
/// `-` and `/` are removed. Note that `_` is itself a word character, so it
/// does not start a new word: `user_profile` becomes `userprofile`.
pub fn to_camel_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_word = false;

    for (index, c) in value.chars().enumerate() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';

        let folded = if is_word && index == 0 {
            c.to_ascii_lowercase()
        } else if is_word && !previous_is_word {
            c.to_ascii_uppercase()
        } else {
            c
        };
        previous_is_word = is_word;

        if folded.is_whitespace() || matches!(folded, '_' | '-' | '/') {
            continue;
        }
        result.push(folded);
    }

    result
}

//! The key tree: scope -> dotted key -> value.
//!
//! Both extraction pipelines build one of these, the two trees are merged and
//! the result is handed to the materializer. Values inside a scope are kept as
//! a `serde_json::Map` so insertion order survives into the written files.

use std::{
    collections::BTreeMap,
    path::{Component, Path},
};

use serde_json::{Map, Value};

/// Bucket a key belongs to. `Global` holds keys without a resolved scope and
/// is written to the output root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    Global,
    Named(String),
}

impl Scope {
    pub fn named(name: impl Into<String>) -> Self {
        Scope::Named(name.into())
    }

    /// Sub-directory of the output root holding this scope's files.
    pub fn directory(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::Named(name) => Some(name),
        }
    }
}

/// Whether `name` can name a scope bucket: a relative `/`-separated path of
/// plain segments, so the scope's files stay inside the output root.
pub fn is_valid_scope_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('\\')
        && name
            .split('/')
            .all(|segment| !matches!(segment, "" | "." | ".."))
        && Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

/// A reference after scope resolution: where it goes and with which value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalReference {
    pub scope: Scope,
    pub path: Vec<String>,
    pub value: String,
}

impl CanonicalReference {
    /// Dotted key stored inside the scope's file.
    pub fn key(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyTree {
    scopes: BTreeMap<Scope, Map<String, Value>>,
}

impl Default for KeyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTree {
    /// An empty tree. The global bucket always exists so that root files are
    /// produced even for projects without unscoped keys.
    pub fn new() -> Self {
        Self {
            scopes: BTreeMap::from([(Scope::Global, Map::new())]),
        }
    }

    /// Insert a value; an existing value at the same path is overwritten.
    pub fn insert(&mut self, scope: Scope, key: impl Into<String>, value: impl Into<String>) {
        self.scopes
            .entry(scope)
            .or_default()
            .insert(key.into(), Value::String(value.into()));
    }

    pub fn insert_reference(&mut self, reference: CanonicalReference) {
        let key = reference.key();
        self.insert(reference.scope, key, reference.value);
    }

    pub fn get(&self, scope: &Scope) -> Option<&Map<String, Value>> {
        self.scopes.get(scope)
    }

    pub fn value(&self, scope: &Scope, key: &str) -> Option<&str> {
        self.scopes.get(scope)?.get(key)?.as_str()
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.keys()
    }

    /// Number of leaf keys across all scopes.
    pub fn key_count(&self) -> usize {
        self.scopes.values().map(count_leaves).sum()
    }

    /// Merge `other` on top of this tree. For identical scope and path the
    /// value from `other` wins.
    pub fn merge(&mut self, other: KeyTree) {
        for (scope, keys) in other.scopes {
            merge_deep(self.scopes.entry(scope).or_default(), &keys);
        }
    }
}

/// Recursively merge `overlay` into `base`.
///
/// Nested objects present on both sides are merged key by key; for every other
/// collision the overlay value replaces the base value. Keys only in `base`
/// are left untouched and keep their position.
pub fn merge_deep(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        if let (Some(Value::Object(base_inner)), Value::Object(overlay_inner)) =
            (base.get_mut(key), value)
        {
            merge_deep(base_inner, overlay_inner);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}

fn count_leaves(map: &Map<String, Value>) -> usize {
    map.values()
        .map(|value| match value {
            Value::Object(inner) => count_leaves(inner),
            _ => 1,
        })
        .sum()
}

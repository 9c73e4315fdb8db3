//! Key extraction from TypeScript sources.
//!
//! Two calling conventions are recognized:
//! - a `TranslocoService` injected under some alias: `this.<alias>.translate('key')`
//! - the `translate` function imported directly: `translate('key')`
//!
//! When a file injects the service, only calls through the alias are read.

use std::path::PathBuf;

use anyhow::Result;

use super::{
    ExtractOptions, ExtractResult, RawReference, extract_files, literal_references,
    patterns::{
        DIRECT_IMPORT, SERVICE_INJECT_FN, SERVICE_INJECTION, TRANSLOCO_PACKAGES,
        translation_calls,
    },
};

/// Extract keys from every source file into one key tree.
pub fn extract_source_keys(files: &[PathBuf], options: &ExtractOptions) -> Result<ExtractResult> {
    extract_files(files, options, collect_references)
}

/// Collect the key references of a single source file.
pub fn collect_references(content: &str) -> Result<Vec<RawReference>> {
    let mut references = Vec::new();

    if !TRANSLOCO_PACKAGES.iter().any(|p| content.contains(p)) {
        return Ok(references);
    }

    let service_name = SERVICE_INJECTION
        .captures(content)
        .or_else(|| SERVICE_INJECT_FN.captures(content))
        .map(|captures| captures["serviceName"].to_string());

    let calls = match service_name {
        Some(name) => translation_calls(Some(&name))?,
        None if DIRECT_IMPORT.is_match(content) => translation_calls(None)?,
        None => return Ok(references),
    };

    literal_references(&calls, content, &mut references);
    Ok(references)
}

//! Regular expressions recognizing translation key references.
//!
//! Every pattern that yields literal keys uses the same capture groups so the
//! matches can be consumed by one routine (`super::literal_references`):
//!
//! - `key`: the key literal
//! - `key2`: second branch of a ternary (`cond ? 'a' : 'b'`)
//! - `backtickKey`: a static template literal used as key
//! - `scope` / `backtickScope`: explicit scope argument

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// Module specifiers a source file must mention to be scanned at all.
pub const TRANSLOCO_PACKAGES: &[&str] = &["@ngneat/transloco", "@jsverse/transloco"];

/// Attribute the structural directive marker is renamed to before the
/// markup is handed to the HTML parser.
pub const STRUCTURAL_ATTRIBUTE: &str = "__transloco";
pub const STRUCTURAL_MARKER: &str = "*transloco";

// ============================================================
// Source files
// ============================================================

// constructor(private readonly translate: TranslocoService)
pub static SERVICE_INJECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(?:private|protected|public|readonly)\s+)+(?P<serviceName>[\w$]+)\s*:\s*TranslocoService\b",
    )
    .unwrap()
});

// private translate = inject(TranslocoService)
pub static SERVICE_INJECT_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<serviceName>[\w$]+)\s*(?::\s*TranslocoService\s*)?=\s*inject\(\s*TranslocoService\s*\)",
    )
    .unwrap()
});

// import { translate } from '@ngneat/transloco'
pub static DIRECT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"import\s*\{[^}]*\btranslate\b[^}]*\}\s*from\s*['"]@(?:ngneat|jsverse)/transloco['"]"#,
    )
    .unwrap()
});

const CALL_ARGUMENTS: &str = concat!(
    r"\(\s*",
    // 'key', cond ? 'key' : 'key2', or `key`
    r#"(?:(?:[^?'"`()]*\?\s*)?['"](?P<key>[^'"]+)['"](?:\s*:\s*['"](?P<key2>[^'"]+)['"])?"#,
    r"|`(?P<backtickKey>[^`$]*)`)",
    // , params, 'scope'
    r#"(?:\s*,\s*(?:\{[^}]*\}|[\w.$]+)\s*,\s*(?:['"](?P<scope>[^'"]*)['"]|`(?P<backtickScope>[^`$]*)`))?"#,
);

/// Calls of `translate(...)`, or of `<service>.translate(...)` when a service
/// alias is given.
pub fn translation_calls(service_name: Option<&str>) -> Result<Regex> {
    let callee = match service_name {
        Some(name) => format!(r"\b{}\.translate", regex::escape(name)),
        None => r"(?:^|[^\w$.])translate".to_string(),
    };

    Regex::new(&format!("{}{}", callee, CALL_ARGUMENTS))
        .with_context(|| format!("Failed to build translation call pattern for {:?}", service_name))
}

// ============================================================
// Markup files
// ============================================================

pub static NG_TEMPLATE_CONTAINER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<ng-template[^>]*transloco[^>]*>").unwrap());

pub static STRUCTURAL_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"let\s+(?P<varName>\w+)").unwrap());

pub static STRUCTURAL_READ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:read|prefix)\s*:\s*['"](?P<read>[^'"]*)['"]"#).unwrap()
});

/// Uses of a container's bound variable: `t.a.b`, `t['a.b']` or `t('a.b')`.
pub fn bound_variable_keys(var_name: &str) -> Result<Regex> {
    Regex::new(&format!(
        r#"(?:^|[^\w$.]){}(?:(?P<accessor>(?:\.[\w$]+|\[\s*['"][^'"\]]+['"]\s*\])+)|\(\s*['"](?P<call>[^'"]+)['"])"#,
        regex::escape(var_name)
    ))
    .with_context(|| format!("Failed to build key pattern for variable '{}'", var_name))
}

// <span transloco="home.title">
pub static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\stransloco\s*=\s*["'](?P<key>[^'"\s]+)["']"#).unwrap()
});

// <span [transloco]="'home.title'">
pub static DIRECTIVE_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s\[transloco\]\s*=\s*["']\s*['"](?P<key>[^'"\s]+)['"]\s*["']"#).unwrap()
});

// <span [transloco]="isAdmin ? 'admin.title' : 'user.title'">
pub static DIRECTIVE_TERNARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\s\[transloco\]\s*=\s*["'][^'"?]*\?\s*"#,
        r#"['"](?P<key>[^'"]+)['"]\s*:\s*['"](?P<key2>[^'"]+)['"]\s*["']"#,
    ))
    .unwrap()
});

// {{ 'home.title' | transloco }}, [title]="'home.title' | transloco"
pub static PIPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?:\{\{\s*|\[?[\w.-]+\]?\s*=\s*["']\s*)"#,
        r#"(?:\(?[^'"{}?|]*\?\s*)?"#,
        r#"['"](?P<key>[^'"{}|\r\n]+)['"](?:\s*:\s*['"](?P<key2>[^'"{}|\r\n]+)['"])?"#,
        r"\s*\)?\s*\|\s*transloco\b",
    ))
    .unwrap()
});

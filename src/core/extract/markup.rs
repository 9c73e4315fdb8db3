//! Key extraction from Angular templates.
//!
//! Containers (`*transloco="let t; read: 'home'"` and
//! `<ng-template transloco let-t translocoRead="home">`) are located with an
//! HTML parser; keys read through their bound variable are resolved relative
//! to the container's `read` value. Directives and pipes are matched over the
//! raw text of the whole file.

use std::{borrow::Cow, path::PathBuf, sync::LazyLock};

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

use super::{
    ExtractOptions, ExtractResult, RawReference, extract_files, literal_references,
    patterns::{
        DIRECTIVE, DIRECTIVE_BINDING, DIRECTIVE_TERNARY, NG_TEMPLATE_CONTAINER, PIPE,
        STRUCTURAL_ATTRIBUTE, STRUCTURAL_MARKER, STRUCTURAL_READ, STRUCTURAL_VARIABLE,
        bound_variable_keys,
    },
};

static STRUCTURAL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("[{}]", STRUCTURAL_ATTRIBUTE)).unwrap());

static NG_TEMPLATE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ng-template[transloco]").unwrap());

/// The HTML parser lowercases attribute names.
const READ_ATTRIBUTES: &[&str] = &[
    "translocoread",
    "[translocoread]",
    "translocoprefix",
    "[translocoprefix]",
];

/// Extract keys from every markup file into one key tree.
pub fn extract_markup_keys(files: &[PathBuf], options: &ExtractOptions) -> Result<ExtractResult> {
    extract_files(files, options, collect_references)
}

/// Collect the key references of a single markup file.
pub fn collect_references(content: &str) -> Result<Vec<RawReference>> {
    let mut references = Vec::new();

    if !content.contains("transloco") {
        return Ok(references);
    }

    let has_structural = content.contains(STRUCTURAL_MARKER);
    let has_ng_template = NG_TEMPLATE_CONTAINER.is_match(content);

    if has_structural || has_ng_template {
        let markup = if has_structural {
            Cow::Owned(content.replace(STRUCTURAL_MARKER, STRUCTURAL_ATTRIBUTE))
        } else {
            Cow::Borrowed(content)
        };
        let document = Html::parse_fragment(&markup);

        if has_ng_template {
            for element in document.select(&NG_TEMPLATE_SELECTOR) {
                if let Some(container) = Container::from_ng_template(element) {
                    container.collect(&mut references)?;
                }
            }
        }
        if has_structural {
            for element in document.select(&STRUCTURAL_SELECTOR) {
                if let Some(container) = Container::from_structural(element) {
                    container.collect(&mut references)?;
                }
            }
        }
    }

    for regex in [&*DIRECTIVE, &*DIRECTIVE_BINDING, &*DIRECTIVE_TERNARY, &*PIPE] {
        literal_references(regex, content, &mut references);
    }

    Ok(references)
}

/// A scoping container and the markup it encloses.
#[derive(Debug)]
struct Container {
    var_name: String,
    read: Option<String>,
    inner_html: String,
}

impl Container {
    /// `<div *transloco="let t; read: 'home'">`. Containers without a `let`
    /// binding are skipped.
    fn from_structural(element: ElementRef<'_>) -> Option<Self> {
        let data = element.value().attr(STRUCTURAL_ATTRIBUTE)?;
        let var_name = STRUCTURAL_VARIABLE.captures(data)?["varName"].to_string();
        let read = STRUCTURAL_READ
            .captures(data)
            .map(|captures| captures["read"].to_string());

        Some(Self {
            var_name,
            read,
            inner_html: decode_entities(&element.inner_html()).into_owned(),
        })
    }

    /// `<ng-template transloco let-t translocoRead="home">`.
    fn from_ng_template(element: ElementRef<'_>) -> Option<Self> {
        let attrs = element.value();
        let var_name = attrs
            .attrs()
            .find_map(|(name, _)| name.strip_prefix("let-"))
            .filter(|name| !name.is_empty())?
            .to_string();
        let read = READ_ATTRIBUTES
            .iter()
            .find_map(|name| attrs.attr(name))
            .map(|value| value.replace(['\'', '"'], ""));

        Some(Self {
            var_name,
            read,
            inner_html: decode_entities(&element.inner_html()).into_owned(),
        })
    }

    fn collect(&self, references: &mut Vec<RawReference>) -> Result<()> {
        let regex = bound_variable_keys(&self.var_name)?;

        for captures in regex.captures_iter(&self.inner_html) {
            let path = if let Some(call) = captures.name("call") {
                split_path(call.as_str())
            } else if let Some(accessor) = captures.name("accessor") {
                split_path(&normalize_accessor(accessor.as_str()))
            } else {
                continue;
            };

            references.push(RawReference::Bound {
                read: self.read.clone(),
                path,
            });
        }

        Ok(())
    }
}

/// Undo the escaping applied when the parser serializes markup back to text,
/// so quotes inside attribute values match the key patterns again.
/// `&amp;` goes last so `&amp;quot;` stays a literal `&quot;`.
fn decode_entities(html: &str) -> Cow<'_, str> {
    if !html.contains('&') {
        return Cow::Borrowed(html);
    }
    Cow::Owned(
        html.replace("&quot;", "\"")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&nbsp;", "\u{a0}")
            .replace("&amp;", "&"),
    )
}

/// `['a.b'].c` -> `.a.b.c`
fn normalize_accessor(accessor: &str) -> String {
    accessor
        .chars()
        .filter_map(|c| match c {
            '[' => Some('.'),
            '\'' | '"' | ']' => None,
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .collect()
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

//! tkm - translation keys extractor for Transloco
//!
//! tkm is a CLI tool and library that scans an Angular project for Transloco
//! translation keys, in TypeScript sources and HTML templates, and writes them
//! into per-scope, per-language JSON files. Existing translations are merged,
//! never lost.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, console output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (scopes, extractors, key tree, materializer)

pub mod cli;
pub mod config;
pub mod core;

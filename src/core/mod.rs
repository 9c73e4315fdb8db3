//! Core extraction engine.
//!
//! A run goes through three phases:
//!
//! 1. **Scopes**: load the `scopeMapping` of the Transloco config (`scope`)
//! 2. **Extract**: walk the input (`file_scanner`) and pull key references out
//!    of sources and templates concurrently (`extract`), building a `tree`
//! 3. **Materialize**: create or merge one JSON file per scope and language
//!    (`materialize`)
//!
//! `pipeline` ties the phases together and reports progress through a
//! `reporter::Reporter`.

pub mod extract;
pub mod file_scanner;
pub mod materialize;
pub mod pipeline;
pub mod reporter;
pub mod scope;
pub mod tree;

pub use pipeline::{RunOptions, RunSummary, build_keys, run_extraction};
pub use reporter::{Reporter, SilentReporter};
pub use scope::ScopeMap;
pub use tree::{KeyTree, Scope};

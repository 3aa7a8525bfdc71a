#![forbid(unsafe_code)]
//! docsync: keeps conky's declared identifiers, their documentation and the editor syntax files in agreement.
//!
//! A run extracts the text objects and config settings declared in the C++ sources, reads the identifiers
//! documented in the YAML docs, reports every identifier present on one side only, and rewrites the keyword lists
//! in the vim and nano syntax files from the declared sets.
//!
//! ## Layout
//!
//! - [`extract`] - pattern-driven identifier extraction from source text
//! - [`docs`] - documented identifiers from the YAML docs
//! - [`reconcile`] - set comparison, report rendering and canonical keyword lists
//! - [`regen`] - anchor-line rewriting of syntax files
//! - [`sync`] - the end-to-end pipeline
//!
//! The registries these modules read (pattern rules, anchors, numbered families, exclusions) live in
//! `docsync_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod extract;
pub mod ident;
pub mod reconcile;
pub mod regen;
pub mod sync;
pub mod version;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use ident::IdentifierSet;
pub use reconcile::{CanonicalSets, MismatchReport, canonical_sets, reconcile};
pub use regen::{Regenerated, regenerate_text};

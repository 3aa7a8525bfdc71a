//! Docsync vocabulary registries.
//!
//! This module is the “front door” for everything docsync knows about the audited application: which identifier
//! families exist, how declarations are recognized in source text, which documented names are synthetic, which
//! numbered variants get synthesized, and where keyword lists live inside editor syntax files.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no regex engine, no IO, no side effects. Patterns are stored as
//!   strings and compiled by the caller.
//!
//! ## Examples
//! ```rust
//! use docsync_core::vocab::numbered;
//!
//! assert!(numbered::is_numbered_member("color7"));
//! assert!(!numbered::is_numbered_member("color10"));
//! ```

pub mod exclusions;
pub mod family;
pub mod numbered;
pub mod rules;
pub mod syntax;

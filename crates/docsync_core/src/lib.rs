//! Provide the pure, IO-free vocabulary registries that drive docsync.
//!
//! Everything that decides *what* gets extracted, excluded or regenerated lives here as `const` tables:
//! identifier families, line-pattern rules, exclusion rules, numbered families and the anchor lines of each
//! editor syntax format. The `docsync` crate owns all IO and turns these tables into behavior.
//!
//! ## Notes
//!
//! - This is a “registry-first” crate: **no IO**, no global state, no third-party dependencies.
//! - Callers should reach for these tables instead of hard-coding spellings such as anchor prefixes or
//!   wildcard tokens (a guardrail test in the `docsync` crate enforces this for anchors).
//!
//! ## Examples
//! ```rust
//! use docsync_core::vocab::family::{self, Family};
//!
//! assert_eq!(family::from_str("objects"), Some(Family::Objects));
//! assert_eq!(family::as_str(Family::Configs), "configs");
//! ```

pub mod vocab;

//! docsync version information.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The docsync version string (for example, `0.1.0`).
pub const DOCSYNC_VERSION: &str = env!("CARGO_PKG_VERSION");

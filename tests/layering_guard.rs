//! Layering guardrails to keep the registry crate free of dependencies.
//!
//! `docsync_core` holds only const tables and pure predicates over them. This test scans its `Cargo.toml` and fails
//! if any `[dependencies]` entry appears, so the tables stay usable from the fuzz target and any future tooling
//! without pulling in the I/O stack.

#[test]
fn core_crate_has_no_dependencies() {
    let manifest = include_str!("../crates/docsync_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let name = line.split('=').next().unwrap_or("").trim();
        panic!("`docsync_core` must not depend on `{name}`; keep I/O and parsing in the `docsync` crate");
    }
}

#[test]
fn core_crate_does_not_depend_on_docsync() {
    let manifest = include_str!("../crates/docsync_core/Cargo.toml");
    assert!(
        !manifest.lines().any(|l| l.trim_start().starts_with("docsync ") || l.trim_start().starts_with("docsync=")),
        "`docsync_core` must not depend on the `docsync` crate"
    );
}

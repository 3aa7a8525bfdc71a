//! Exclusion rules for reconciliation.
//!
//! Documentation and sources both contain entries that are *structurally synthetic*: they describe a whole family
//! of numbered variants (`colorN`, `templateN`) or act as a sentinel rather than naming a real identifier. Such
//! entries are exempt from set-membership comparison in both directions.
//!
//! ## Notes
//! - Literal rules compare exactly; wildcard rules compare ignoring ASCII case, because documentation spells the
//!   placeholder both as `colorN` and `colorn`.
//! - A rule may be scoped to one [`Family`] or apply to all of them.
//!
//! ## Examples
//! ```rust
//! use docsync_core::vocab::exclusions;
//! use docsync_core::vocab::family::Family;
//!
//! assert!(exclusions::is_excluded(Family::Configs, "templaten"));
//! assert!(exclusions::is_excluded(Family::Objects, "text"));
//! assert!(!exclusions::is_excluded(Family::Configs, "text"));
//! ```

use super::family::Family;
use super::numbered;

/// How an exclusion rule decides membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionKind {
    /// Exact spelling.
    Literal(&'static str),
    /// Any wildcard token of a numbered run (`colorN`, `templateN`), case-insensitive.
    WildcardToken,
    /// Any member of a numbered run (`color0`..`color9`, ...).
    NumberedMember,
}

/// A predicate marking identifiers as synthetic.
#[derive(Debug, Clone, Copy)]
pub struct ExclusionRule {
    pub kind: ExclusionKind,
    /// `None` applies the rule to every family.
    pub family: Option<Family>,
    pub description: &'static str,
}

/// The object-family sentinel dropped during extraction.
pub const TEXT_SENTINEL: &str = "text";

/// Registry of exclusion rules.
pub const EXCLUSIONS: &[ExclusionRule] = &[
    ExclusionRule {
        kind: ExclusionKind::Literal(TEXT_SENTINEL),
        family: Some(Family::Objects),
        description: "Plain text is the implicit object between variables, not a declared object.",
    },
    ExclusionRule {
        kind: ExclusionKind::WildcardToken,
        family: None,
        description: "Wildcard placeholders document a numbered run rather than one identifier.",
    },
    ExclusionRule {
        kind: ExclusionKind::NumberedMember,
        family: None,
        description: "Numbered members are synthesized after reconciliation and never compared.",
    },
];

impl ExclusionRule {
    /// True if this rule applies to `family` and matches `ident`.
    pub fn matches(&self, family: Family, ident: &str) -> bool {
        if self.family.is_some_and(|f| f != family) {
            return false;
        }
        match self.kind {
            ExclusionKind::Literal(lit) => ident == lit,
            ExclusionKind::WildcardToken => numbered::is_wildcard_token(ident),
            ExclusionKind::NumberedMember => numbered::is_numbered_member(ident),
        }
    }
}

/// True if any registered rule marks `ident` as synthetic for `family`.
pub fn is_excluded(family: Family, ident: &str) -> bool {
    EXCLUSIONS.iter().any(|rule| rule.matches(family, ident))
}

/// True if `ident` is the extraction sentinel for `family` and should be dropped outright.
pub fn is_sentinel(family: Family, ident: &str) -> bool {
    family == Family::Objects && ident == TEXT_SENTINEL
}

//! Numbered identifier families.
//!
//! Some identifiers come in suffix-numbered runs (`color0`..`color9`, `template0`..`template9`). Documentation
//! describes such a run once, through a wildcard token (`colorN`), while the editor syntax files need every
//! member spelled out. This registry records each run so callers can:
//!
//! - collapse extracted members into the wildcard token ([`NumberedFamily::collapse_on_extract`]),
//! - recognize members and wildcard tokens so they are exempt from reconciliation,
//! - expand the full run into canonical keyword lists after reconciliation.
//!
//! ## Examples
//! ```rust
//! use docsync_core::vocab::numbered::{self, NUMBERED_FAMILIES};
//!
//! let color = &NUMBERED_FAMILIES[0];
//! assert_eq!(color.wildcard(), "colorN");
//! assert_eq!(color.members().count(), 10);
//! assert_eq!(numbered::collapse("color7"), Some("colorN".to_string()));
//! ```

/// Suffix used to spell the wildcard token of a run (`color` + `N`).
pub const WILDCARD_SUFFIX: &str = "N";

/// A suffix-numbered run of identifiers.
#[derive(Debug, Clone, Copy)]
pub struct NumberedFamily {
    pub prefix: &'static str,
    /// First member index (inclusive).
    pub first: u8,
    /// Last member index (inclusive).
    pub last: u8,
    /// Whether extraction collapses digit-suffixed declarations into the wildcard token.
    pub collapse_on_extract: bool,
}

/// Registry of numbered runs.
pub const NUMBERED_FAMILIES: &[NumberedFamily] = &[
    NumberedFamily {
        prefix: "color",
        first: 0,
        last: 9,
        collapse_on_extract: true,
    },
    NumberedFamily {
        prefix: "template",
        first: 0,
        last: 9,
        collapse_on_extract: false,
    },
];

impl NumberedFamily {
    /// The wildcard token documenting the whole run, e.g. `colorN`.
    pub fn wildcard(&self) -> String {
        format!("{}{}", self.prefix, WILDCARD_SUFFIX)
    }

    /// Every member of the run, in index order.
    pub fn members(&self) -> impl Iterator<Item = String> + '_ {
        (self.first..=self.last).map(move |i| format!("{}{}", self.prefix, i))
    }

    /// True if `ident` is the prefix followed by one or more ASCII digits, regardless of range.
    pub fn matches_shape(&self, ident: &str) -> bool {
        ident
            .strip_prefix(self.prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    }

    /// True if `ident` is exactly one of the run's members (`color0`..`color9`).
    pub fn is_member(&self, ident: &str) -> bool {
        let Some(rest) = ident.strip_prefix(self.prefix) else {
            return false;
        };
        // Reject leading zeros so `color07` is not mistaken for `color7`.
        if rest.len() > 1 && rest.starts_with('0') {
            return false;
        }
        match rest.parse::<u8>() {
            Ok(n) => self.matches_shape(ident) && (self.first..=self.last).contains(&n),
            Err(_) => false,
        }
    }

    /// True if `ident` spells the wildcard token, ignoring ASCII case (`colorN`, `colorn`).
    pub fn is_wildcard(&self, ident: &str) -> bool {
        ident.eq_ignore_ascii_case(&self.wildcard())
    }
}

/// Collapse a digit-suffixed identifier into its wildcard token.
///
/// ## Returns
/// - `Some(wildcard)` if `ident` has the shape of a run marked `collapse_on_extract`.
/// - `None` otherwise (the identifier is kept as-is).
pub fn collapse(ident: &str) -> Option<String> {
    NUMBERED_FAMILIES
        .iter()
        .filter(|f| f.collapse_on_extract)
        .find(|f| f.matches_shape(ident))
        .map(NumberedFamily::wildcard)
}

/// True if `ident` is a member of any numbered run.
pub fn is_numbered_member(ident: &str) -> bool {
    NUMBERED_FAMILIES.iter().any(|f| f.is_member(ident))
}

/// True if `ident` is the wildcard token of any numbered run (case-insensitive).
pub fn is_wildcard_token(ident: &str) -> bool {
    NUMBERED_FAMILIES.iter().any(|f| f.is_wildcard(ident))
}

/// Every member of every run, in registry order.
pub fn all_members() -> impl Iterator<Item = String> {
    NUMBERED_FAMILIES.iter().flat_map(|f| f.members())
}

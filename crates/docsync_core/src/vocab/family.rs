//! Identifier families.
//!
//! Every identifier docsync tracks belongs to exactly one family: the names of runtime display primitives
//! (*objects*, e.g. `cpu`, `time`) or the names of configuration keys (*configs*, e.g. `update_interval`).
//! Families never mix: extraction, reconciliation and regeneration all run once per family.
//!
//! ## Examples
//! ```rust
//! use docsync_core::vocab::family::{self, Family};
//!
//! assert_eq!(family::from_str("configs"), Some(Family::Configs));
//! assert_eq!(family::info_for(Family::Objects).item_noun, "an object");
//! ```

/// Stable identifier for an identifier family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Objects,
    Configs,
}

/// Metadata for a family.
///
/// ## Notes
/// - `list_noun` and `item_noun` feed the human-readable mismatch report, so changing them changes the report
///   wording.
#[derive(Debug, Clone, Copy)]
pub struct FamilyInfo {
    pub id: Family,
    pub canonical: &'static str,
    pub list_noun: &'static str,
    pub item_noun: &'static str,
    pub description: &'static str,
}

/// Registry of all families, in report order.
pub const FAMILIES: &[FamilyInfo] = &[
    FamilyInfo {
        id: Family::Objects,
        canonical: "objects",
        list_noun: "object list",
        item_noun: "an object",
        description: "Names of runtime display primitives usable in the text section.",
    },
    FamilyInfo {
        id: Family::Configs,
        canonical: "configs",
        list_noun: "config settings",
        item_noun: "a config setting",
        description: "Names of configuration keys.",
    },
];

/// Resolve a spelling to a [`Family`].
///
/// Lookup is case-sensitive.
pub fn from_str(name: &str) -> Option<Family> {
    FAMILIES.iter().find(|f| f.canonical == name).map(|f| f.id)
}

/// Return the canonical spelling for a family.
pub fn as_str(id: Family) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a family.
pub fn info_for(id: Family) -> &'static FamilyInfo {
    match id {
        Family::Objects => &FAMILIES[0],
        Family::Configs => &FAMILIES[1],
    }
}

impl Family {
    /// All families in report order.
    pub fn all() -> impl Iterator<Item = Family> {
        FAMILIES.iter().map(|f| f.id)
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}

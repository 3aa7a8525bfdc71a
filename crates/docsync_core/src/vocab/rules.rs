//! Line-pattern rules for recognizing declarations in source text.
//!
//! Declarations are recognized with surface patterns, not a grammar. Each rule is a declarative
//! `(id, family, pattern, capture)` row: `pattern` is a regular expression applied to the whole source text and
//! `capture` is the index of the group holding the declared identifier. Keeping the rules in a table makes the
//! rule set auditable and testable without touching the filesystem.
//!
//! ## Notes
//! - Patterns use the syntax of the `regex` crate; this crate stores them as strings and never compiles them.
//! - A rule may match several times on one line (e.g. an initializer list of numbered settings).
//! - `\s` spans line breaks, so declarations wrapped after the opening parenthesis still match.
//! - Object rules are anchored to a statement start (optionally after `END` or `else`) so the macro
//!   definitions themselves (`#define OBJ(a, n) ...`) are not read as declarations.
//!
//! ## Examples
//! ```rust
//! use docsync_core::vocab::family::Family;
//! use docsync_core::vocab::rules::{self, RuleId};
//!
//! assert_eq!(rules::from_str("OBJ_ARG"), Some(RuleId::ObjArg));
//! assert!(rules::rules_for(Family::Objects).all(|r| r.family == Family::Objects));
//! ```

use super::family::Family;

/// Stable identifier for a pattern rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    // Text objects
    Obj,
    ObjArg,
    ObjIf,
    ObjIfArg,

    // Config settings
    ConfigSetting,
    ColorSetting,
    TemplateSetting,
    ConfMacro,
}

/// A declarative extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub id: RuleId,
    pub canonical: &'static str,
    pub family: Family,
    pub pattern: &'static str,
    pub capture: usize,
    pub description: &'static str,
}

/// Registry of extraction rules, in application order.
pub const PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        id: RuleId::Obj,
        canonical: "OBJ",
        family: Family::Objects,
        pattern: r"(?m)^[ \t]*(?:(?:END|else)[ \t]+)?OBJ\(\s*(\w+)\s*,",
        capture: 1,
        description: "Plain text object declaration.",
    },
    PatternRule {
        id: RuleId::ObjArg,
        canonical: "OBJ_ARG",
        family: Family::Objects,
        pattern: r"(?m)^[ \t]*(?:(?:END|else)[ \t]+)?OBJ_ARG\(\s*(\w+)\s*,",
        capture: 1,
        description: "Text object that requires an argument.",
    },
    PatternRule {
        id: RuleId::ObjIf,
        canonical: "OBJ_IF",
        family: Family::Objects,
        pattern: r"(?m)^[ \t]*(?:(?:END|else)[ \t]+)?OBJ_IF\(\s*(\w+)\s*,",
        capture: 1,
        description: "Conditional (`if_*`) text object.",
    },
    PatternRule {
        id: RuleId::ObjIfArg,
        canonical: "OBJ_IF_ARG",
        family: Family::Objects,
        pattern: r"(?m)^[ \t]*(?:(?:END|else)[ \t]+)?OBJ_IF_ARG\(\s*(\w+)\s*,",
        capture: 1,
        description: "Conditional text object that requires an argument.",
    },
    PatternRule {
        id: RuleId::ConfigSetting,
        canonical: "config_setting",
        family: Family::Configs,
        pattern: r#"\b\w*config_setting<.*?>\s*\w+\s*[({]\s*"(\w+)""#,
        capture: 1,
        description: "Typed setting declaration, e.g. `simple_config_setting<bool> x(\"name\", ...)`.",
    },
    PatternRule {
        id: RuleId::ColorSetting,
        canonical: "color_setting",
        family: Family::Configs,
        pattern: r#"\{\s*"(color\d+)"\s*,"#,
        capture: 1,
        description: "Entry of the numbered color settings initializer list.",
    },
    PatternRule {
        id: RuleId::TemplateSetting,
        canonical: "template_setting",
        family: Family::Configs,
        pattern: r#"\{\s*"(template\d+)"\s*,"#,
        capture: 1,
        description: "Entry of the numbered template settings initializer list.",
    },
    PatternRule {
        id: RuleId::ConfMacro,
        canonical: "CONF",
        family: Family::Configs,
        pattern: r#"\bCONF\(\s*"(\w+)""#,
        capture: 1,
        description: "Legacy `CONF(\"name\")` setting declaration.",
    },
];

/// Resolve a spelling to a [`RuleId`].
pub fn from_str(name: &str) -> Option<RuleId> {
    PATTERN_RULES.iter().find(|r| r.canonical == name).map(|r| r.id)
}

/// Return the canonical spelling for a rule.
pub fn as_str(id: RuleId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a rule.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: RuleId) -> &'static PatternRule {
    PATTERN_RULES.iter().find(|r| r.id == id).expect("pattern rule missing")
}

/// Rules belonging to `family`, in application order.
pub fn rules_for(family: Family) -> impl Iterator<Item = &'static PatternRule> {
    PATTERN_RULES.iter().filter(move |r| r.family == family)
}

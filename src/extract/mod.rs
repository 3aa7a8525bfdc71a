//! Pattern-based identifier extraction.
//!
//! Declarations are recognized with the rules from [`docsync_core::vocab::rules`], each applied to the whole
//! source text; there is no grammar and no AST. Text that matches no rule is skipped silently.
//!
//! ## Normalization
//!
//! - Digit-suffixed members of a collapsing numbered run (`color7`) become the run's wildcard token (`colorN`).
//! - The object-family sentinel (`text`) is dropped.

use regex::Regex;

use docsync_core::vocab::exclusions;
use docsync_core::vocab::family::Family;
use docsync_core::vocab::numbered;
use docsync_core::vocab::rules::{self, PatternRule, RuleId};

use crate::error::{SyncError, SyncResult};
use crate::ident::IdentifierSet;

/// A pattern rule with its compiled regex.
#[derive(Debug)]
struct CompiledRule {
    rule: &'static PatternRule,
    regex: Regex,
}

/// Applies a table of pattern rules to source text.
#[derive(Debug)]
pub struct PatternExtractor {
    rules: Vec<CompiledRule>,
}

impl PatternExtractor {
    /// Compile every registered rule.
    pub fn new() -> SyncResult<Self> {
        Self::with_rules(rules::PATTERN_RULES)
    }

    /// Compile a custom rule table.
    ///
    /// ## Errors
    ///
    /// Returns [`SyncError::InvalidPattern`] for the first rule whose pattern fails to compile.
    pub fn with_rules(table: &'static [PatternRule]) -> SyncResult<Self> {
        let rules = table
            .iter()
            .map(|rule| {
                Regex::new(rule.pattern)
                    .map(|regex| CompiledRule { rule, regex })
                    .map_err(|source| SyncError::InvalidPattern {
                        rule: rule.canonical.to_string(),
                        source,
                    })
            })
            .collect::<SyncResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Produce one normalized set per rule, in rule order.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn extract_per_rule(&self, source: &str) -> Vec<(RuleId, IdentifierSet)> {
        self.rules
            .iter()
            .map(|compiled| (compiled.rule.id, apply_rule(compiled, source)))
            .collect()
    }

    /// Produce the union of every rule of `family`.
    pub fn extract(&self, source: &str, family: Family) -> IdentifierSet {
        let mut out = IdentifierSet::new(family);
        for compiled in self.rules.iter().filter(|c| c.rule.family == family) {
            out.union_with(&apply_rule(compiled, source));
        }
        tracing::debug!(%family, count = out.len(), "extracted identifiers");
        out
    }

    /// Extract `family` from several sources, unioned in order.
    pub fn extract_all<'a>(&self, sources: impl IntoIterator<Item = &'a str>, family: Family) -> IdentifierSet {
        let mut out = IdentifierSet::new(family);
        for source in sources {
            out.union_with(&self.extract(source, family));
        }
        out
    }
}

fn apply_rule(compiled: &CompiledRule, source: &str) -> IdentifierSet {
    let family = compiled.rule.family;
    let mut set = IdentifierSet::new(family);
    // Whole-text matching: clang-format wraps long declarations after the opening parenthesis.
    for caps in compiled.regex.captures_iter(source) {
        let Some(m) = caps.get(compiled.rule.capture) else {
            continue;
        };
        if let Some(ident) = normalize(family, m.as_str()) {
            set.insert(ident);
        }
    }
    set
}

/// Apply extraction normalization to one raw identifier.
///
/// ## Returns
/// - `None` if the identifier is a sentinel that must be dropped.
/// - The wildcard token for members of collapsing numbered runs.
/// - The identifier unchanged otherwise.
pub fn normalize(family: Family, raw: &str) -> Option<String> {
    if exclusions::is_sentinel(family, raw) {
        return None;
    }
    Some(numbered::collapse(raw).unwrap_or_else(|| raw.to_string()))
}

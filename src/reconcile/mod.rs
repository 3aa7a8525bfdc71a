//! Reconciliation of declared and documented identifiers.
//!
//! Reconciliation is read-only: it compares two [`IdentifierSet`]s of one family and produces typed
//! [`Finding`]s. Rendering findings for humans or tools lives in [`report`]. Building the canonical keyword
//! lists (declared sets plus every numbered run) also lives here, since it always follows reconciliation.

pub mod report;

use std::collections::BTreeSet;

use serde::Serialize;

use docsync_core::vocab::exclusions;
use docsync_core::vocab::family::Family;
use docsync_core::vocab::numbered;

use crate::ident::IdentifierSet;

/// Which side of the comparison an identifier is missing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    DocumentedNotDeclared,
    DeclaredNotDocumented,
}

/// One unreconciled identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(serialize_with = "serialize_family")]
    pub family: Family,
    pub direction: Direction,
    pub identifier: String,
}

fn serialize_family<S: serde::Serializer>(family: &Family, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(docsync_core::vocab::family::as_str(*family))
}

/// Findings for one family, both directions sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyReport {
    pub family: Family,
    pub documented_not_declared: Vec<String>,
    pub declared_not_documented: Vec<String>,
}

impl FamilyReport {
    pub fn is_clean(&self) -> bool {
        self.documented_not_declared.is_empty() && self.declared_not_documented.is_empty()
    }

    /// Findings in report order: documented-not-declared first.
    pub fn findings(&self) -> impl Iterator<Item = Finding> + '_ {
        let docs = self
            .documented_not_declared
            .iter()
            .map(move |ident| (Direction::DocumentedNotDeclared, ident));
        let decl = self
            .declared_not_documented
            .iter()
            .map(move |ident| (Direction::DeclaredNotDocumented, ident));
        docs.chain(decl).map(move |(direction, ident)| Finding {
            family: self.family,
            direction,
            identifier: ident.clone(),
        })
    }
}

/// Reports for every family, in family order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MismatchReport {
    pub families: Vec<FamilyReport>,
}

impl MismatchReport {
    pub fn push(&mut self, report: FamilyReport) {
        self.families.push(report);
    }

    pub fn is_clean(&self) -> bool {
        self.families.iter().all(FamilyReport::is_clean)
    }

    pub fn findings(&self) -> Vec<Finding> {
        self.families.iter().flat_map(FamilyReport::findings).collect()
    }

    pub fn family(&self, family: Family) -> Option<&FamilyReport> {
        self.families.iter().find(|r| r.family == family)
    }
}

/// Compare declared and documented identifiers of one family.
///
/// - `documented_not_declared` = documented − declared, minus exclusion matches;
/// - `declared_not_documented` = declared − documented, minus exclusion matches.
pub fn reconcile(family: Family, declared: &IdentifierSet, documented: &IdentifierSet) -> FamilyReport {
    let keep = |ident: &String| !exclusions::is_excluded(family, ident);

    let documented_not_declared: Vec<String> = documented.difference(declared).into_iter().filter(keep).collect();
    let declared_not_documented: Vec<String> = declared.difference(documented).into_iter().filter(keep).collect();

    tracing::debug!(
        %family,
        undeclared = documented_not_declared.len(),
        undocumented = declared_not_documented.len(),
        "reconciled"
    );

    FamilyReport {
        family,
        documented_not_declared,
        declared_not_documented,
    }
}

/// Canonical keyword lists handed to the regenerator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalSets {
    pub objects: Vec<String>,
    pub configs: Vec<String>,
}

impl CanonicalSets {
    pub fn for_family(&self, family: Family) -> &[String] {
        match family {
            Family::Objects => &self.objects,
            Family::Configs => &self.configs,
        }
    }
}

/// Merge the declared sets with every numbered run, sorted and deduplicated.
///
/// Runs are added unconditionally; findings never influence the canonical lists.
pub fn canonical_sets(declared_objects: &IdentifierSet, declared_configs: &IdentifierSet) -> CanonicalSets {
    CanonicalSets {
        objects: canonical_list(declared_objects),
        configs: canonical_list(declared_configs),
    }
}

fn canonical_list(declared: &IdentifierSet) -> Vec<String> {
    let mut all: BTreeSet<String> = declared.iter().map(str::to_string).collect();
    all.extend(numbered::all_members());
    all.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(family: Family, items: &[&str]) -> IdentifierSet {
        let mut s = IdentifierSet::new(family);
        s.extend(items.iter().copied());
        s
    }

    #[test]
    fn undocumented_object_reported() {
        let declared = set(Family::Objects, &["foo", "bar"]);
        let documented = set(Family::Objects, &["foo"]);
        let report = reconcile(Family::Objects, &declared, &documented);
        assert!(report.documented_not_declared.is_empty());
        assert_eq!(report.declared_not_documented, vec!["bar"]);
    }

    #[test]
    fn undeclared_object_reported() {
        let declared = set(Family::Objects, &["foo"]);
        let documented = set(Family::Objects, &["foo", "baz"]);
        let report = reconcile(Family::Objects, &declared, &documented);
        assert_eq!(report.documented_not_declared, vec!["baz"]);
        assert!(report.declared_not_documented.is_empty());
    }

    #[test]
    fn numbered_and_wildcards_never_reported() {
        let declared = set(Family::Configs, &["colorN", "template3", "color4"]);
        let documented = set(Family::Configs, &["templateN", "color9", "colorn"]);
        let report = reconcile(Family::Configs, &declared, &documented);
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn findings_keep_direction_order() {
        let declared = set(Family::Configs, &["b", "a"]);
        let documented = set(Family::Configs, &["d", "c"]);
        let report = reconcile(Family::Configs, &declared, &documented);
        let findings: Vec<(Direction, String)> =
            report.findings().map(|f| (f.direction, f.identifier)).collect();
        assert_eq!(
            findings,
            vec![
                (Direction::DocumentedNotDeclared, "c".to_string()),
                (Direction::DocumentedNotDeclared, "d".to_string()),
                (Direction::DeclaredNotDocumented, "a".to_string()),
                (Direction::DeclaredNotDocumented, "b".to_string()),
            ]
        );
    }

    #[test]
    fn canonical_sets_add_every_numbered_member() {
        let objects = set(Family::Objects, &["cpu", "colorN"]);
        let configs = set(Family::Configs, &["colorN", "update_interval"]);
        let canon = canonical_sets(&objects, &configs);

        for list in [&canon.objects, &canon.configs] {
            assert!(list.contains(&"colorN".to_string()));
            for i in 0..=9 {
                assert!(list.contains(&format!("color{i}")));
                assert!(list.contains(&format!("template{i}")));
            }
            assert!(list.windows(2).all(|w| w[0] < w[1]), "not strictly sorted: {list:?}");
        }
        assert_eq!(canon.configs.len(), 22);
    }

    #[test]
    fn canonical_merge_deduplicates_declared_members() {
        let configs = set(Family::Configs, &["template0", "template5"]);
        let canon = canonical_sets(&IdentifierSet::new(Family::Objects), &configs);
        assert_eq!(canon.configs.iter().filter(|c| *c == "template0").count(), 1);
        assert_eq!(canon.configs.len(), 20);
    }

    #[test]
    fn mismatch_report_aggregates_families() {
        let mut report = MismatchReport::default();
        report.push(reconcile(Family::Objects, &set(Family::Objects, &["x"]), &set(Family::Objects, &["x"])));
        assert!(report.is_clean());
        report.push(reconcile(Family::Configs, &set(Family::Configs, &["y"]), &set(Family::Configs, &[])));
        assert!(!report.is_clean());
        assert_eq!(report.findings().len(), 1);
        assert!(report.family(Family::Configs).is_some());
    }
}

//! Identifier sets.

use indexmap::IndexSet;

use docsync_core::vocab::family::Family;

/// A set of unique identifiers for one family and one artifact.
///
/// Insertion order is kept (first occurrence wins) so diagnostics can point at identifiers in the order they were
/// found; equality and set operations ignore order. The family tag is provenance only: two sets holding the same
/// identifiers are equal whether or not they were tagged.
#[derive(Debug, Clone, Default)]
pub struct IdentifierSet {
    family: Option<Family>,
    items: IndexSet<String>,
}

impl IdentifierSet {
    pub fn new(family: Family) -> Self {
        Self {
            family: Some(family),
            items: IndexSet::new(),
        }
    }

    pub fn family(&self) -> Option<Family> {
        self.family
    }

    /// Insert `ident`, returning `false` if it was already present.
    pub fn insert(&mut self, ident: impl Into<String>) -> bool {
        self.items.insert(ident.into())
    }

    pub fn contains(&self, ident: &str) -> bool {
        self.items.contains(ident)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Identifiers in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Add every identifier of `other`, keeping this set's order for identifiers already present.
    pub fn union_with(&mut self, other: &IdentifierSet) {
        for ident in other.iter() {
            self.items.insert(ident.to_string());
        }
    }

    /// Identifiers of `self` missing from `other`, sorted.
    pub fn difference(&self, other: &IdentifierSet) -> Vec<String> {
        let mut out: Vec<String> = self
            .items
            .iter()
            .filter(|ident| !other.contains(ident))
            .cloned()
            .collect();
        out.sort();
        out
    }

    /// Identifiers sorted into the canonical byte-wise order.
    pub fn sorted(&self) -> Vec<String> {
        let mut out: Vec<String> = self.items.iter().cloned().collect();
        out.sort();
        out
    }
}

impl PartialEq for IdentifierSet {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().all(|i| other.contains(i))
    }
}

impl Eq for IdentifierSet {}

impl<S: Into<String>> Extend<S> for IdentifierSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for ident in iter {
            self.items.insert(ident.into());
        }
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = IdentifierSet::default();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins_for_order() {
        let mut set = IdentifierSet::new(Family::Objects);
        assert!(set.insert("cpu"));
        assert!(set.insert("mem"));
        assert!(!set.insert("cpu"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["cpu", "mem"]);
    }

    #[test]
    fn equality_ignores_order() {
        let a: IdentifierSet = ["a", "b"].into_iter().collect();
        let b: IdentifierSet = ["b", "a"].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn collected_set_equals_family_scoped_set() {
        let collected: IdentifierSet = ["cpu", "mem"].into_iter().collect();
        let mut scoped = IdentifierSet::new(Family::Objects);
        scoped.extend(["mem", "cpu"]);
        assert_eq!(collected.family(), None);
        assert_eq!(scoped.family(), Some(Family::Objects));
        assert_eq!(collected, scoped);
        assert_ne!(collected, IdentifierSet::new(Family::Objects));
    }

    #[test]
    fn difference_is_sorted() {
        let a: IdentifierSet = ["zeta", "alpha", "mid"].into_iter().collect();
        let b: IdentifierSet = ["mid"].into_iter().collect();
        assert_eq!(a.difference(&b), vec!["alpha", "zeta"]);
    }

    #[test]
    fn union_keeps_existing_order() {
        let mut a: IdentifierSet = ["b", "a"].into_iter().collect();
        let b: IdentifierSet = ["c", "a"].into_iter().collect();
        a.union_with(&b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }
}

//! Documentation reader.
//!
//! Documentation is a YAML tree holding a sequence of entries. Each entry documents one identifier, found by
//! following a projection path through nested mappings (by default `term → command → option`):
//!
//! ```yaml
//! values:
//!   - term:
//!       command:
//!         option: cpu
//!     desc: CPU usage in percents.
//! ```
//!
//! Entries whose identifier is synthetic (see [`docsync_core::vocab::exclusions`]) are kept in traversal order but
//! left out of the comparison set. Entries without the projection path are reported and skipped; they never abort
//! the run.

use std::fmt;
use std::path::Path;

use serde_yaml::Value;

use docsync_core::vocab::exclusions;
use docsync_core::vocab::family::Family;

use crate::error::{SyncError, SyncResult};
use crate::ident::IdentifierSet;

/// Path of mapping keys leading from an entry to its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocProjection {
    segments: Vec<String>,
}

impl DocProjection {
    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted path such as `term.command.option`.
    pub fn parse(dotted: &str) -> Self {
        Self::new(dotted.split('.').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Follow the projection through `entry`.
    ///
    /// A sequence met along the way resolves to its first element, so an entry listing several terms is
    /// identified by the first one.
    fn project<'a>(&self, entry: &'a Value) -> Result<&'a str, String> {
        let mut current = first_of(entry);
        for segment in &self.segments {
            current = match current.get(segment.as_str()) {
                Some(next) => first_of(next),
                None => return Err(format!("missing '{segment}' (projection {self})")),
            };
        }
        match current {
            Value::String(s) => Ok(s.trim()),
            other => Err(format!("projection {self} is not a string: {}", kind_of(other))),
        }
    }
}

impl Default for DocProjection {
    fn default() -> Self {
        Self::new(["term", "command", "option"])
    }
}

impl fmt::Display for DocProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// One documented entry, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    pub index: usize,
    pub identifier: String,
    /// True if an exclusion rule keeps this entry out of the comparison set.
    pub excluded: bool,
}

/// An entry skipped because its identifier could not be projected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    pub index: usize,
    pub reason: String,
}

impl fmt::Display for MalformedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry #{}: {}", self.index, self.reason)
    }
}

/// Everything a document says about one family.
#[derive(Debug, Clone)]
pub struct DocumentedSet {
    pub entries: Vec<DocEntry>,
    pub comparable: IdentifierSet,
    pub malformed: Vec<MalformedEntry>,
}

/// Reads documented identifiers out of YAML documents.
#[derive(Debug, Clone)]
pub struct DocReader {
    entries_key: Option<String>,
    projection: DocProjection,
}

impl Default for DocReader {
    fn default() -> Self {
        Self {
            entries_key: Some("values".to_string()),
            projection: DocProjection::default(),
        }
    }
}

impl DocReader {
    pub fn new(entries_key: Option<String>, projection: DocProjection) -> Self {
        Self {
            entries_key,
            projection,
        }
    }

    /// Read and parse the document at `path`.
    pub fn read_path(&self, path: &Path, family: Family) -> SyncResult<DocumentedSet> {
        let text = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        self.read_str(&text, family).map_err(|message| SyncError::Document {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse `text` as YAML and read its entries.
    ///
    /// ## Errors
    ///
    /// Returns a message if the text is not YAML or holds no entry sequence. Individual bad entries are not errors.
    pub fn read_str(&self, text: &str, family: Family) -> Result<DocumentedSet, String> {
        let doc: Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
        self.read_value(&doc, family)
    }

    #[tracing::instrument(skip_all, fields(%family))]
    pub fn read_value(&self, doc: &Value, family: Family) -> Result<DocumentedSet, String> {
        let entries = self.entry_sequence(doc)?;

        let mut out = DocumentedSet {
            entries: Vec::with_capacity(entries.len()),
            comparable: IdentifierSet::new(family),
            malformed: Vec::new(),
        };

        for (index, entry) in entries.iter().enumerate() {
            match self.projection.project(entry) {
                Ok(ident) if ident.is_empty() => {
                    out.malformed.push(MalformedEntry {
                        index,
                        reason: format!("projection {} is empty", self.projection),
                    });
                }
                Ok(ident) => {
                    let excluded = exclusions::is_excluded(family, ident);
                    if !excluded && !out.comparable.insert(ident) {
                        tracing::debug!(index, ident, "identifier documented more than once");
                    }
                    out.entries.push(DocEntry {
                        index,
                        identifier: ident.to_string(),
                        excluded,
                    });
                }
                Err(reason) => out.malformed.push(MalformedEntry { index, reason }),
            }
        }

        for bad in &out.malformed {
            tracing::warn!(%family, "skipping malformed documentation {bad}");
        }
        Ok(out)
    }

    fn entry_sequence<'a>(&self, doc: &'a Value) -> Result<&'a Vec<Value>, String> {
        if let Value::Sequence(seq) = doc {
            return Ok(seq);
        }
        let Some(key) = &self.entries_key else {
            return Err(format!("expected a sequence of entries, found {}", kind_of(doc)));
        };
        match doc.get(key.as_str()) {
            Some(Value::Sequence(seq)) => Ok(seq),
            Some(other) => Err(format!("'{key}' must be a sequence, found {}", kind_of(other))),
            None => Err(format!("no '{key}' sequence at the document root")),
        }
    }
}

fn first_of(value: &Value) -> &Value {
    match value {
        Value::Sequence(seq) => seq.first().unwrap_or(value),
        other => other,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIABLES: &str = r#"
desc: Text objects.
values:
  - term:
      command:
        option: cpu
    desc: CPU usage.
  - term:
      command:
        option: " exec "
  - term:
      command:
        option: colorN
  - term:
      command: {}
  - desc: no term at all
  - term:
      command:
        - option: if_up
        - option: if_down
  - term:
      command:
        option: cpu
"#;

    fn read(text: &str) -> DocumentedSet {
        DocReader::default().read_str(text, Family::Objects).unwrap()
    }

    #[test]
    fn reads_entries_in_traversal_order() {
        let doc = read(VARIABLES);
        let idents: Vec<&str> = doc.entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(idents, vec!["cpu", "exec", "colorN", "if_up", "cpu"]);
    }

    #[test]
    fn wildcard_entries_recorded_but_not_compared() {
        let doc = read(VARIABLES);
        let color = doc.entries.iter().find(|e| e.identifier == "colorN").unwrap();
        assert!(color.excluded);
        assert!(!doc.comparable.contains("colorN"));
        assert_eq!(doc.comparable.sorted(), vec!["cpu", "exec", "if_up"]);
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let doc = read(VARIABLES);
        let indices: Vec<usize> = doc.malformed.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![3, 4]);
        assert!(doc.malformed[0].reason.contains("'option'"));
        assert!(doc.malformed[1].reason.contains("'term'"));
    }

    #[test]
    fn lowercase_wildcard_is_excluded() {
        let text = "values:\n  - term: {command: {option: templaten}}\n";
        let doc = DocReader::default().read_str(text, Family::Configs).unwrap();
        assert_eq!(doc.entries.len(), 1);
        assert!(doc.entries[0].excluded);
        assert!(doc.comparable.is_empty());
    }

    #[test]
    fn root_sequence_and_custom_projection() {
        let reader = DocReader::new(None, DocProjection::parse("name"));
        let doc = reader.read_str("- name: a\n- name: b\n", Family::Configs).unwrap();
        assert_eq!(doc.comparable.sorted(), vec!["a", "b"]);
    }

    #[test]
    fn non_string_identifier_is_malformed() {
        let reader = DocReader::new(None, DocProjection::parse("name"));
        let doc = reader.read_str("- name: 42\n", Family::Configs).unwrap();
        assert!(doc.entries.is_empty());
        assert!(doc.malformed[0].reason.contains("a number"));
    }

    #[test]
    fn missing_entry_sequence_is_an_error() {
        let err = DocReader::default().read_str("desc: nothing\n", Family::Objects).unwrap_err();
        assert!(err.contains("'values'"));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(DocReader::default().read_str("values: [unclosed", Family::Objects).is_err());
    }

    #[test]
    fn projection_parse_and_display_round_trip() {
        let p = DocProjection::parse("term.command.option");
        assert_eq!(p, DocProjection::default());
        assert_eq!(p.to_string(), "term.command.option");
    }
}

//! Mismatch report rendering.
//!
//! The text renderer reproduces the historical wording byte for byte, since existing tooling greps for it:
//!
//! ```text
//! comparing docs against object list...
//! 'baz' is documented, but doesn't seem to be an object
//! done comparing docs against object list.
//! comparing object list against docs...
//! 'bar' seems to be undocumented
//! done comparing object list against docs.
//! ```
//!
//! The JSON renderer emits the same findings as a typed array for machine consumers.

use docsync_core::vocab::family;

use super::{FamilyReport, MismatchReport};

/// Output format for a [`MismatchReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn renderer(self) -> Box<dyn ReportRenderer> {
        match self {
            ReportFormat::Text => Box::new(TextRenderer),
            ReportFormat::Json => Box::new(JsonRenderer),
        }
    }
}

/// Turns a report into printable output.
pub trait ReportRenderer {
    fn render(&self, report: &MismatchReport) -> String;
}

/// Line-oriented human-readable report.
pub struct TextRenderer;

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &MismatchReport) -> String {
        let mut out = String::new();
        for family_report in &report.families {
            render_family(&mut out, family_report);
        }
        out
    }
}

fn render_family(out: &mut String, report: &FamilyReport) {
    let info = family::info_for(report.family);

    out.push_str(&format!("comparing docs against {}...\n", info.list_noun));
    for ident in &report.documented_not_declared {
        out.push_str(&format!(
            "'{ident}' is documented, but doesn't seem to be {}\n",
            info.item_noun
        ));
    }
    out.push_str(&format!("done comparing docs against {}.\n", info.list_noun));

    out.push_str(&format!("comparing {} against docs...\n", info.list_noun));
    for ident in &report.declared_not_documented {
        out.push_str(&format!("'{ident}' seems to be undocumented\n"));
    }
    out.push_str(&format!("done comparing {} against docs.\n", info.list_noun));
}

/// JSON array of findings.
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &MismatchReport) -> String {
        // Findings hold only strings and unit enums; serialization cannot fail.
        let mut out = serde_json::to_string_pretty(&report.findings()).unwrap_or_else(|_| "[]".to_string());
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::IdentifierSet;
    use crate::reconcile::reconcile;
    use docsync_core::vocab::family::Family;

    fn set(family: Family, items: &[&str]) -> IdentifierSet {
        let mut s = IdentifierSet::new(family);
        s.extend(items.iter().copied());
        s
    }

    fn sample() -> MismatchReport {
        let mut report = MismatchReport::default();
        report.push(reconcile(
            Family::Objects,
            &set(Family::Objects, &["foo", "bar"]),
            &set(Family::Objects, &["foo", "baz"]),
        ));
        report.push(reconcile(
            Family::Configs,
            &set(Family::Configs, &["font"]),
            &set(Family::Configs, &["font", "colorN"]),
        ));
        report
    }

    #[test]
    fn text_report_uses_historical_wording() {
        let text = TextRenderer.render(&sample());
        insta::assert_snapshot!(text, @r"
        comparing docs against object list...
        'baz' is documented, but doesn't seem to be an object
        done comparing docs against object list.
        comparing object list against docs...
        'bar' seems to be undocumented
        done comparing object list against docs.
        comparing docs against config settings...
        done comparing docs against config settings.
        comparing config settings against docs...
        done comparing config settings against docs.
        ");
    }

    #[test]
    fn config_findings_use_config_noun() {
        let mut report = MismatchReport::default();
        report.push(reconcile(
            Family::Configs,
            &set(Family::Configs, &[]),
            &set(Family::Configs, &["own_window"]),
        ));
        let text = TextRenderer.render(&report);
        assert!(text.contains("'own_window' is documented, but doesn't seem to be a config setting\n"));
    }

    #[test]
    fn json_report_lists_typed_findings() {
        let json = JsonRenderer.render(&sample());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {"family": "objects", "direction": "documented_not_declared", "identifier": "baz"},
                {"family": "objects", "direction": "declared_not_documented", "identifier": "bar"},
            ])
        );
    }

    #[test]
    fn empty_report_renders_nothing() {
        assert_eq!(TextRenderer.render(&MismatchReport::default()), "");
        assert_eq!(JsonRenderer.render(&MismatchReport::default()), "[]\n");
    }

    #[test]
    fn format_selects_renderer() {
        let text = ReportFormat::Text.renderer().render(&sample());
        assert!(text.starts_with("comparing docs against object list..."));
        let json = ReportFormat::Json.renderer().render(&sample());
        assert!(json.trim_start().starts_with('['));
    }
}

//! Editor syntax formats and their anchor lines.
//!
//! Each supported editor syntax file carries two *anchor lines*: lines recognized by a fixed literal prefix whose
//! remainder is a regenerable keyword list. The anchors of a format are listed in file order; the last one is
//! terminal, meaning nothing after it is examined once it has been rewritten.
//!
//! ## Notes
//! - Anchor prefixes include their trailing space; the keyword list starts right after the prefix.
//! - Lookup via [`from_str`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use docsync_core::vocab::syntax::{self, SyntaxFormat};
//!
//! assert_eq!(syntax::from_str("nano"), Some(SyntaxFormat::Nano));
//! assert_eq!(SyntaxFormat::Vim.render_keywords(&["a", "b"]), "a b");
//! assert_eq!(SyntaxFormat::Nano.render_keywords(&["a", "b"]), r#""\<(a|b)\>""#);
//! ```

use super::family::Family;

/// Stable identifier for a target syntax format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxFormat {
    Vim,
    Nano,
}

/// A regenerable anchor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorSpec {
    pub format: SyntaxFormat,
    pub prefix: &'static str,
    pub family: Family,
}

/// Metadata for a syntax format.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxFormatInfo {
    pub id: SyntaxFormat,
    pub canonical: &'static str,
    pub description: &'static str,
    pub anchors: &'static [AnchorSpec],
}

/// Vim anchors: keyword groups for settings and variable names.
pub const VIM_ANCHORS: &[AnchorSpec] = &[
    AnchorSpec {
        format: SyntaxFormat::Vim,
        prefix: "syn keyword ConkyrcSetting ",
        family: Family::Configs,
    },
    AnchorSpec {
        format: SyntaxFormat::Vim,
        prefix: "syn keyword ConkyrcVarName contained nextgroup=ConkyrcNumber,ConkyrcColour skipwhite ",
        family: Family::Objects,
    },
];

/// Nano anchors: colored keyword alternations.
pub const NANO_ANCHORS: &[AnchorSpec] = &[
    AnchorSpec {
        format: SyntaxFormat::Nano,
        prefix: "color green ",
        family: Family::Configs,
    },
    AnchorSpec {
        format: SyntaxFormat::Nano,
        prefix: "color brightblue ",
        family: Family::Objects,
    },
];

/// Registry of supported syntax formats.
pub const SYNTAX_FORMATS: &[SyntaxFormatInfo] = &[
    SyntaxFormatInfo {
        id: SyntaxFormat::Vim,
        canonical: "vim",
        description: "Vim syntax file; keywords are space-delimited bare words.",
        anchors: VIM_ANCHORS,
    },
    SyntaxFormatInfo {
        id: SyntaxFormat::Nano,
        canonical: "nano",
        description: "Nano rc file; keywords form a quoted, word-bounded alternation.",
        anchors: NANO_ANCHORS,
    },
];

/// Resolve a spelling to a [`SyntaxFormat`].
pub fn from_str(name: &str) -> Option<SyntaxFormat> {
    SYNTAX_FORMATS.iter().find(|f| f.canonical == name).map(|f| f.id)
}

/// Return the canonical spelling for a format.
pub fn as_str(id: SyntaxFormat) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a format.
pub fn info_for(id: SyntaxFormat) -> &'static SyntaxFormatInfo {
    match id {
        SyntaxFormat::Vim => &SYNTAX_FORMATS[0],
        SyntaxFormat::Nano => &SYNTAX_FORMATS[1],
    }
}

impl SyntaxFormat {
    /// Anchors of this format, in file order.
    pub fn anchors(self) -> &'static [AnchorSpec] {
        info_for(self).anchors
    }

    /// Render a keyword list in this format's separator convention, without a trailing separator.
    pub fn render_keywords<S: AsRef<str>>(self, keywords: &[S]) -> String {
        match self {
            SyntaxFormat::Vim => join(keywords, " "),
            SyntaxFormat::Nano => format!(r#""\<({})\>""#, join(keywords, "|")),
        }
    }
}

impl std::fmt::Display for SyntaxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}

impl AnchorSpec {
    /// Build the full replacement line (without line terminator).
    pub fn render_line<S: AsRef<str>>(&self, keywords: &[S]) -> String {
        format!("{}{}", self.prefix, self.format.render_keywords(keywords))
    }
}

fn join<S: AsRef<str>>(items: &[S], sep: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(item.as_ref());
    }
    out
}

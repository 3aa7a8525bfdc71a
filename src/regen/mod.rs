//! Syntax file regeneration.
//!
//! A target file is modelled as an ordered list of lines tagged by whether they start with one of the format's
//! anchor prefixes. Only tagged lines are rebuilt (prefix + freshly rendered keyword list + the line's original
//! terminator); every other line is copied through untouched. Once the terminal anchor (the last one the format
//! declares) has been rewritten, the rest of the file is copied without being examined.
//!
//! Anchors that never match are reported as unmatched; the file is then left as it was for those lines.

mod write;

use std::path::{Path, PathBuf};

use docsync_core::vocab::syntax::{AnchorSpec, SyntaxFormat};

use crate::error::{SyncError, SyncResult};
use crate::reconcile::CanonicalSets;

pub use write::{TargetLock, write_atomic};

/// A line of a target file, tagged for regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedLine<'a> {
    /// A line with no anchor, terminator included.
    Plain(&'a str),
    /// A line starting with the anchor at `index` in the format's anchor table.
    Anchor { index: usize, ending: &'a str },
    /// Everything after the terminal anchor, copied verbatim.
    Unexamined(&'a str),
}

/// Split `content` into tagged lines.
pub fn tag_lines<'a>(content: &'a str, anchors: &[AnchorSpec]) -> Vec<TaggedLine<'a>> {
    let mut tagged = Vec::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        offset += line.len();
        let (body, ending) = split_line_ending(line);

        let Some(index) = anchors.iter().position(|a| body.starts_with(a.prefix)) else {
            tagged.push(TaggedLine::Plain(line));
            continue;
        };
        tagged.push(TaggedLine::Anchor { index, ending });

        if index + 1 == anchors.len() {
            if offset < content.len() {
                tagged.push(TaggedLine::Unexamined(&content[offset..]));
            }
            break;
        }
    }
    tagged
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// The result of regenerating one file's content in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regenerated {
    pub text: String,
    /// Anchors rewritten at least once, in table order.
    pub rewritten: Vec<AnchorSpec>,
    /// Anchors never found, in table order.
    pub unmatched: Vec<AnchorSpec>,
    /// True if `text` differs from the input.
    pub changed: bool,
}

/// Regenerate every anchor line of `content`.
pub fn regenerate_text(content: &str, format: SyntaxFormat, canonical: &CanonicalSets) -> Regenerated {
    let anchors = format.anchors();
    let mut matched = vec![false; anchors.len()];
    let mut text = String::with_capacity(content.len());

    for line in tag_lines(content, anchors) {
        match line {
            TaggedLine::Plain(raw) | TaggedLine::Unexamined(raw) => text.push_str(raw),
            TaggedLine::Anchor { index, ending } => {
                let anchor = &anchors[index];
                text.push_str(&anchor.render_line(canonical.for_family(anchor.family)));
                text.push_str(ending);
                matched[index] = true;
            }
        }
    }

    let (rewritten, unmatched): (Vec<_>, Vec<_>) = anchors.iter().zip(&matched).partition(|(_, hit)| **hit);
    let changed = text != content;
    Regenerated {
        text,
        rewritten: rewritten.into_iter().map(|(a, _)| *a).collect(),
        unmatched: unmatched.into_iter().map(|(a, _)| *a).collect(),
        changed,
    }
}

/// Whether regenerated content is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file atomically when its content changes.
    Write,
    /// Compute the result only.
    Check,
}

/// A target syntax file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    pub path: PathBuf,
    pub format: SyntaxFormat,
}

/// The result of regenerating one target file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub target: TargetFile,
    pub original: String,
    pub regenerated: Regenerated,
    pub written: bool,
}

/// Regenerate `target` on disk.
///
/// In [`WriteMode::Write`] the target is locked for the whole read-transform-write cycle and replaced through a
/// temporary file; unchanged content is not rewritten.
///
/// ## Errors
///
/// - [`SyncError::TargetLocked`] if another process holds the target's lock.
/// - [`SyncError::Io`] / [`SyncError::Persist`] on read or write failures.
#[tracing::instrument(skip_all, fields(path = %target.path.display(), format = %target.format))]
pub fn regenerate_file(target: &TargetFile, canonical: &CanonicalSets, mode: WriteMode) -> SyncResult<FileOutcome> {
    let _lock = match mode {
        WriteMode::Write => Some(TargetLock::acquire(&target.path)?),
        WriteMode::Check => None,
    };

    let original = read_target(&target.path)?;
    let regenerated = regenerate_text(&original, target.format, canonical);

    for anchor in &regenerated.unmatched {
        tracing::warn!(
            "anchor {:?} not found in '{}'; its keyword list was not regenerated",
            anchor.prefix.trim_end(),
            target.path.display()
        );
    }

    let written = mode == WriteMode::Write && regenerated.changed;
    if written {
        write_atomic(&target.path, &regenerated.text)?;
        tracing::debug!("rewrote target");
    }

    Ok(FileOutcome {
        target: target.clone(),
        original,
        regenerated,
        written,
    })
}

fn read_target(path: &Path) -> SyncResult<String> {
    std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))
}

/// Line diff between two versions of a file, in the `-NNNN | old` / `+NNNN | new` style.
pub fn line_diff(before: &str, after: &str) -> Option<String> {
    if before == after {
        return None;
    }

    let mut diff = String::new();
    let before_lines: Vec<&str> = before.lines().collect();
    let after_lines: Vec<&str> = after.lines().collect();

    for i in 0..before_lines.len().max(after_lines.len()) {
        let old = before_lines.get(i).copied().unwrap_or("");
        let new = after_lines.get(i).copied().unwrap_or("");
        if old != new {
            diff.push_str(&format!("-{:4} | {}\n", i + 1, old));
            diff.push_str(&format!("+{:4} | {}\n", i + 1, new));
        }
    }
    Some(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_core::vocab::syntax::{NANO_ANCHORS, VIM_ANCHORS};

    fn canonical() -> CanonicalSets {
        CanonicalSets {
            objects: vec!["cpu".to_string(), "mem".to_string()],
            configs: vec!["alignment".to_string(), "font".to_string()],
        }
    }

    const NANO: &str = "## conky nanorc\nsyntax \"conky\" \"(\\.*conkyrc.*$|conky.conf)\"\ncolor green \"\\<(old|stuff)\\>\"\ncolor yellow \"\\<(yes|no)\\>\"\ncolor brightblue \"\\<(stale)\\>\"\ncolor brightblue \"not an anchor we touch\"\n";

    #[test]
    fn nano_anchors_rewritten_in_place() {
        let out = regenerate_text(NANO, SyntaxFormat::Nano, &canonical());
        let lines: Vec<&str> = out.text.lines().collect();
        assert_eq!(lines[2], r#"color green "\<(alignment|font)\>""#);
        assert_eq!(lines[4], r#"color brightblue "\<(cpu|mem)\>""#);
        assert!(out.unmatched.is_empty());
        assert_eq!(out.rewritten.len(), 2);
        assert!(out.changed);
    }

    #[test]
    fn lines_after_terminal_anchor_unexamined() {
        let out = regenerate_text(NANO, SyntaxFormat::Nano, &canonical());
        let lines: Vec<&str> = out.text.lines().collect();
        assert_eq!(lines[5], "color brightblue \"not an anchor we touch\"");
        assert_eq!(lines.len(), NANO.lines().count());
    }

    #[test]
    fn non_anchor_lines_byte_identical() {
        let out = regenerate_text(NANO, SyntaxFormat::Nano, &canonical());
        for (i, (a, b)) in NANO.lines().zip(out.text.lines()).enumerate() {
            if i != 2 && i != 4 {
                assert_eq!(a, b, "line {i} changed");
            }
        }
    }

    #[test]
    fn vim_anchors_space_delimited() {
        let vim = "\" Vim syntax file\nsyn keyword ConkyrcSetting old\nsyn keyword ConkyrcVarName contained nextgroup=ConkyrcNumber,ConkyrcColour skipwhite old\n";
        let out = regenerate_text(vim, SyntaxFormat::Vim, &canonical());
        assert_eq!(
            out.text,
            "\" Vim syntax file\nsyn keyword ConkyrcSetting alignment font\nsyn keyword ConkyrcVarName contained nextgroup=ConkyrcNumber,ConkyrcColour skipwhite cpu mem\n"
        );
    }

    #[test]
    fn preserves_crlf_and_missing_final_newline() {
        let input = "a\r\ncolor green old\r\nb\r\ncolor brightblue old";
        let out = regenerate_text(input, SyntaxFormat::Nano, &canonical());
        assert_eq!(
            out.text,
            "a\r\ncolor green \"\\<(alignment|font)\\>\"\r\nb\r\ncolor brightblue \"\\<(cpu|mem)\\>\""
        );
    }

    #[test]
    fn missing_anchors_reported_and_content_kept() {
        let input = "nothing\nto see\n";
        let out = regenerate_text(input, SyntaxFormat::Vim, &canonical());
        assert_eq!(out.text, input);
        assert!(!out.changed);
        assert_eq!(out.unmatched, VIM_ANCHORS.to_vec());
    }

    #[test]
    fn partial_match_reports_the_other_anchor() {
        let input = "color brightblue old\ncolor green old\n";
        let out = regenerate_text(input, SyntaxFormat::Nano, &canonical());
        // The terminal anchor comes first, so the config anchor after it is never examined.
        assert_eq!(out.rewritten, vec![NANO_ANCHORS[1]]);
        assert_eq!(out.unmatched, vec![NANO_ANCHORS[0]]);
        assert!(out.text.ends_with("color green old\n"));
    }

    #[test]
    fn regeneration_is_idempotent() {
        let once = regenerate_text(NANO, SyntaxFormat::Nano, &canonical());
        let twice = regenerate_text(&once.text, SyntaxFormat::Nano, &canonical());
        assert_eq!(once.text, twice.text);
        assert!(!twice.changed);
    }

    #[test]
    fn tag_lines_marks_anchors_and_remainder() {
        let tagged = tag_lines("x\ncolor green a\ncolor brightblue b\ny\nz\n", NANO_ANCHORS);
        assert_eq!(
            tagged,
            vec![
                TaggedLine::Plain("x\n"),
                TaggedLine::Anchor { index: 0, ending: "\n" },
                TaggedLine::Anchor { index: 1, ending: "\n" },
                TaggedLine::Unexamined("y\nz\n"),
            ]
        );
    }

    #[test]
    fn line_diff_reports_changed_lines_only() {
        assert_eq!(line_diff("a\nb\n", "a\nb\n"), None);
        let diff = line_diff("a\nb\nc\n", "a\nB\nc\n").unwrap();
        assert_eq!(diff, "-   2 | b\n+   2 | B\n");
    }
}

//! The docsync pipeline.
//!
//! A run is a full re-derivation: verify that every artifact exists, extract declared identifiers, read
//! documented identifiers, reconcile both families, build the canonical keyword lists and (optionally) regenerate
//! the syntax targets. Nothing is cached between runs.
//!
//! Runs are sequential and single-threaded. Callers must not run two pipelines against the same targets at once;
//! the per-target lock taken by [`crate::regen::regenerate_file`] rejects such attempts.

use std::path::{Path, PathBuf};

use docsync_core::vocab::family::Family;

use crate::config::SyncConfig;
use crate::docs::DocumentedSet;
use crate::error::{SyncError, SyncResult};
use crate::extract::PatternExtractor;
use crate::ident::IdentifierSet;
use crate::reconcile::{self, CanonicalSets, MismatchReport};
use crate::regen::{self, FileOutcome, TargetFile, WriteMode};

/// Abort unless every path exists and is a regular file.
///
/// All missing paths are collected before failing so one run reports every problem.
pub fn verify_artifacts<P: AsRef<Path>>(paths: &[P]) -> SyncResult<()> {
    let missing: Vec<PathBuf> = paths
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_file())
        .map(Path::to_path_buf)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SyncError::MissingArtifact { paths: missing })
    }
}

/// Everything learned about the artifacts, before any file is rewritten.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub declared_objects: IdentifierSet,
    pub declared_configs: IdentifierSet,
    pub documented_objects: DocumentedSet,
    pub documented_configs: DocumentedSet,
    pub report: MismatchReport,
    pub canonical: CanonicalSets,
}

impl Analysis {
    pub fn declared(&self, family: Family) -> &IdentifierSet {
        match family {
            Family::Objects => &self.declared_objects,
            Family::Configs => &self.declared_configs,
        }
    }

    pub fn documented(&self, family: Family) -> &DocumentedSet {
        match family {
            Family::Objects => &self.documented_objects,
            Family::Configs => &self.documented_configs,
        }
    }

    /// Total number of documentation entries skipped as malformed.
    pub fn malformed_count(&self) -> usize {
        self.documented_objects.malformed.len() + self.documented_configs.malformed.len()
    }
}

/// Extract, read and reconcile.
///
/// ## Errors
///
/// - [`SyncError::MissingArtifact`] before any reading if an input is missing.
/// - [`SyncError::Io`] / [`SyncError::Document`] if an input cannot be read or parsed.
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn analyze(root: &Path, config: &SyncConfig) -> SyncResult<Analysis> {
    verify_artifacts(&config.input_paths(root))?;
    analyze_verified(root, config)
}

fn analyze_verified(root: &Path, config: &SyncConfig) -> SyncResult<Analysis> {
    let extractor = PatternExtractor::new()?;
    let declared_objects = extract_family(&extractor, root, &config.objects_sources, Family::Objects)?;
    let declared_configs = extract_family(&extractor, root, &config.configs_sources, Family::Configs)?;

    let reader = config.doc_reader();
    let documented_objects = reader.read_path(&root.join(&config.objects_doc), Family::Objects)?;
    let documented_configs = reader.read_path(&root.join(&config.configs_doc), Family::Configs)?;

    let mut report = MismatchReport::default();
    report.push(reconcile::reconcile(
        Family::Objects,
        &declared_objects,
        &documented_objects.comparable,
    ));
    report.push(reconcile::reconcile(
        Family::Configs,
        &declared_configs,
        &documented_configs.comparable,
    ));

    let canonical = reconcile::canonical_sets(&declared_objects, &declared_configs);

    Ok(Analysis {
        declared_objects,
        declared_configs,
        documented_objects,
        documented_configs,
        report,
        canonical,
    })
}

fn extract_family(
    extractor: &PatternExtractor,
    root: &Path,
    sources: &[PathBuf],
    family: Family,
) -> SyncResult<IdentifierSet> {
    let mut texts = Vec::with_capacity(sources.len());
    for source in sources {
        let path = root.join(source);
        texts.push(std::fs::read_to_string(&path).map_err(|e| SyncError::io(&path, e))?);
    }
    Ok(extractor.extract_all(texts.iter().map(String::as_str), family))
}

/// How [`run`] treats the syntax targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: WriteMode,
    /// Treat an anchor missing from a target as fatal. Checked before any target is rewritten.
    pub strict: bool,
}

impl RunOptions {
    pub fn new(mode: WriteMode) -> Self {
        Self { mode, strict: false }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(WriteMode::Write)
    }
}

/// Regenerate every configured target from `canonical`.
///
/// Targets are verified up front; a missing target aborts before any file is touched.
pub fn regenerate_targets(
    root: &Path,
    config: &SyncConfig,
    canonical: &CanonicalSets,
    mode: WriteMode,
) -> SyncResult<Vec<FileOutcome>> {
    let targets = config.targets(root);
    let paths: Vec<&Path> = targets.iter().map(|t| t.path.as_path()).collect();
    verify_artifacts(&paths)?;
    regenerate_each(&targets, canonical, mode)
}

fn regenerate_each(targets: &[TargetFile], canonical: &CanonicalSets, mode: WriteMode) -> SyncResult<Vec<FileOutcome>> {
    targets
        .iter()
        .map(|target| regen::regenerate_file(target, canonical, mode))
        .collect()
}

/// Fail with every anchor that no target line matched.
fn ensure_anchored(outcomes: &[FileOutcome]) -> SyncResult<()> {
    let missing: Vec<(PathBuf, String)> = outcomes
        .iter()
        .flat_map(|o| {
            o.regenerated
                .unmatched
                .iter()
                .map(|a| (o.target.path.clone(), a.prefix.trim_end().to_string()))
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SyncError::UnmatchedAnchor { missing })
    }
}

/// Full run: analysis followed by regeneration.
///
/// Every input and target is verified once, before the first byte is read. With
/// [`RunOptions::strict`] the targets are first regenerated in memory, and a missing anchor aborts the run
/// before anything is written.
#[tracing::instrument(skip_all, fields(mode = ?options.mode, strict = options.strict))]
pub fn run(root: &Path, config: &SyncConfig, options: RunOptions) -> SyncResult<(Analysis, Vec<FileOutcome>)> {
    let targets = config.targets(root);
    let mut required = config.input_paths(root);
    required.extend(targets.iter().map(|t| t.path.clone()));
    verify_artifacts(&required)?;

    let analysis = analyze_verified(root, config)?;

    if options.strict && options.mode == WriteMode::Write {
        ensure_anchored(&regenerate_each(&targets, &analysis.canonical, WriteMode::Check)?)?;
    }
    let outcomes = regenerate_each(&targets, &analysis.canonical, options.mode)?;
    if options.strict {
        ensure_anchored(&outcomes)?;
    }
    Ok((analysis, outcomes))
}

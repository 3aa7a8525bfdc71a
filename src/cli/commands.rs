//! CLI command implementations
//!
//! All functions return `CliResult<T>` instead of calling `process::exit`.
//! Report output goes to stdout; logs go to stderr through `tracing`.

use std::path::PathBuf;

use docsync_core::vocab::family::Family;

use super::{CliError, CliResult, ExitCode, ReportArgs};
use crate::config::SyncConfig;
use crate::reconcile::report::ReportFormat;
use crate::regen::{self, WriteMode};
use crate::sync::{self, Analysis, RunOptions};

/// Resolved root and configuration shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub config: SyncConfig,
}

impl Context {
    pub fn load(root: PathBuf, config: Option<PathBuf>) -> CliResult<Self> {
        let config = SyncConfig::discover(&root, config.as_deref())?;
        Ok(Self { root, config })
    }
}

/// Flags of the `sync` command beyond the shared report options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncFlags {
    pub check: bool,
    pub diff: bool,
    pub strict: bool,
}

// ============================================================================
// check
// ============================================================================

/// Print the mismatch report without touching any target.
pub fn check(ctx: &Context, report: ReportArgs) -> CliResult<ExitCode> {
    let analysis = sync::analyze(&ctx.root, &ctx.config)?;
    print_report(&analysis, report.format);
    Ok(drift_exit_code(&analysis, report))
}

// ============================================================================
// sync
// ============================================================================

/// Print the mismatch report, then regenerate both syntax targets.
pub fn sync(ctx: &Context, report: ReportArgs, flags: SyncFlags) -> CliResult<ExitCode> {
    let mode = if flags.check || flags.diff {
        WriteMode::Check
    } else {
        WriteMode::Write
    };
    let options = RunOptions::new(mode).with_strict(flags.strict);
    let (analysis, outcomes) = sync::run(&ctx.root, &ctx.config, options)?;
    print_report(&analysis, report.format);

    let mut stale = 0;
    for outcome in &outcomes {
        let path = outcome.target.path.display();
        let changed = outcome.regenerated.changed;

        if flags.diff && changed {
            status(report.format, &format!("--- {path}"));
            if let Some(diff) = regen::line_diff(&outcome.original, &outcome.regenerated.text) {
                status(report.format, diff.trim_end());
            }
        }

        match mode {
            WriteMode::Check if changed => {
                status(report.format, &format!("Would regenerate: {path}"));
                stale += 1;
            }
            WriteMode::Check => {}
            WriteMode::Write if outcome.written => status(report.format, &format!("Regenerated: {path}")),
            WriteMode::Write => status(report.format, &format!("Unchanged: {path}")),
        }
    }

    if mode == WriteMode::Check {
        if stale > 0 {
            return Err(CliError::failure(format!("\n{stale} file(s) would be regenerated")));
        }
        status(report.format, &format!("✓ {} file(s) up to date", outcomes.len()));
    } else {
        let written = outcomes.iter().filter(|o| o.written).count();
        status(report.format, &format!("\n✓ {written} file(s) regenerated"));
    }

    Ok(drift_exit_code(&analysis, report))
}

// ============================================================================
// keywords
// ============================================================================

/// Print the canonical keyword list of `family`, one keyword per line.
pub fn keywords(ctx: &Context, family: Family) -> CliResult<ExitCode> {
    let analysis = sync::analyze(&ctx.root, &ctx.config)?;
    for keyword in analysis.canonical.for_family(family) {
        println!("{keyword}");
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helpers
// ============================================================================

fn print_report(analysis: &Analysis, format: ReportFormat) {
    print!("{}", format.renderer().render(&analysis.report));
    let malformed = analysis.malformed_count();
    if malformed > 0 {
        tracing::info!("{malformed} documentation entr(y/ies) skipped as malformed");
    }
}

/// Progress lines share stdout with text reports; JSON output must stay parseable, so they go to the log instead.
fn status(format: ReportFormat, line: &str) {
    match format {
        ReportFormat::Text => println!("{line}"),
        ReportFormat::Json => tracing::info!("{}", line.trim_start()),
    }
}

fn drift_exit_code(analysis: &Analysis, report: ReportArgs) -> ExitCode {
    if report.deny_drift && !analysis.report.is_clean() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in ["src", "doc", "extras/vim/syntax", "extras/nano"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        fs::write(root.join("src/core.cc"), "OBJ(cpu, nullptr)\nOBJ_ARG(exec, 0, \"x\")\n").unwrap();
        fs::write(
            root.join("src/conky.cc"),
            "conky::simple_config_setting<bool> out_to_x(\"out_to_x\", true, false);\n",
        )
        .unwrap();
        fs::write(
            root.join("doc/variables.yaml"),
            "values:\n  - term:\n      command:\n        option: cpu\n  - term:\n      command:\n        option: exec\n",
        )
        .unwrap();
        fs::write(
            root.join("doc/config_settings.yaml"),
            "values:\n  - term:\n      command:\n        option: out_to_x\n",
        )
        .unwrap();
        fs::write(root.join("extras/vim/syntax/conkyrc.vim"), "syn keyword ConkyrcSetting old\n").unwrap();
        fs::write(root.join("extras/nano/conky.nanorc"), "color green old\ncolor brightblue old\n").unwrap();
        dir
    }

    fn context(dir: &tempfile::TempDir) -> Context {
        Context::load(dir.path().to_path_buf(), None).unwrap()
    }

    #[test]
    fn check_succeeds_on_consistent_tree() {
        let dir = fixture();
        let code = check(&context(&dir), ReportArgs { format: ReportFormat::Text, deny_drift: true }).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn deny_drift_fails_on_findings() {
        let dir = fixture();
        fs::write(dir.path().join("src/core.cc"), "OBJ(cpu, nullptr)\nOBJ(mem, nullptr)\n").unwrap();
        let ctx = context(&dir);

        let lenient = check(&ctx, ReportArgs { format: ReportFormat::Text, deny_drift: false }).unwrap();
        assert_eq!(lenient, ExitCode::SUCCESS);
        let strict = check(&ctx, ReportArgs { format: ReportFormat::Json, deny_drift: true }).unwrap();
        assert_eq!(strict, ExitCode::FAILURE);
    }

    #[test]
    fn sync_check_mode_fails_without_writing() {
        let dir = fixture();
        let nanorc = dir.path().join("extras/nano/conky.nanorc");
        let before = fs::read_to_string(&nanorc).unwrap();

        let flags = SyncFlags { check: true, ..SyncFlags::default() };
        let err = sync(&context(&dir), ReportArgs { format: ReportFormat::Text, deny_drift: false }, flags)
            .unwrap_err();
        assert!(err.message.contains("would be regenerated"));
        assert_eq!(fs::read_to_string(&nanorc).unwrap(), before);
    }

    #[test]
    fn sync_writes_then_check_passes() {
        let dir = fixture();
        let ctx = context(&dir);
        let args = ReportArgs { format: ReportFormat::Text, deny_drift: false };

        assert_eq!(sync(&ctx, args, SyncFlags::default()).unwrap(), ExitCode::SUCCESS);
        let flags = SyncFlags { check: true, ..SyncFlags::default() };
        // The vim fixture lacks its objects anchor, which is only a warning without --strict.
        assert_eq!(sync(&ctx, args, flags).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn strict_rejects_unmatched_anchor_without_writing() {
        let dir = fixture();
        let vim = dir.path().join("extras/vim/syntax/conkyrc.vim");
        let nanorc = dir.path().join("extras/nano/conky.nanorc");
        let before = (fs::read_to_string(&vim).unwrap(), fs::read_to_string(&nanorc).unwrap());

        let flags = SyncFlags { strict: true, ..SyncFlags::default() };
        let err = sync(&context(&dir), ReportArgs { format: ReportFormat::Text, deny_drift: false }, flags)
            .unwrap_err();
        assert!(err.message.contains("anchor \"syn keyword ConkyrcVarName"));
        assert!(err.message.contains("conkyrc.vim'"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        // Both targets are stale, yet neither is rewritten.
        assert_eq!((fs::read_to_string(&vim).unwrap(), fs::read_to_string(&nanorc).unwrap()), before);
    }

    #[test]
    fn missing_target_aborts_before_analysis() {
        let dir = fixture();
        fs::remove_file(dir.path().join("extras/nano/conky.nanorc")).unwrap();
        let err = sync(
            &context(&dir),
            ReportArgs { format: ReportFormat::Text, deny_drift: false },
            SyncFlags::default(),
        )
        .unwrap_err();
        assert!(err.message.contains("conky.nanorc' doesn't exist, or isn't a file"));
    }
}

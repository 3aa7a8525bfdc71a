//! Locked, atomic replacement of target files.
//!
//! docsync assumes a single writer per target. [`TargetLock`] makes that assumption explicit: an exclusive advisory
//! lock on `<target>.lock` is held for the read-transform-write cycle, and a second process trying to regenerate the
//! same file is rejected instead of racing. Content is written to a temporary file in the target's directory and
//! renamed over the target, so a failed run never leaves a truncated file behind.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::error::{SyncError, SyncResult};

/// Exclusive lock on a target file, released on drop.
#[derive(Debug)]
pub struct TargetLock {
    file: File,
    path: PathBuf,
}

impl TargetLock {
    /// Take the lock for `target` without waiting.
    ///
    /// ## Errors
    ///
    /// Returns [`SyncError::TargetLocked`] if another process holds it.
    pub fn acquire(target: &Path) -> SyncResult<Self> {
        let path = lock_path(target);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| SyncError::io(&path, e))?;

        if let Err(err) = file.try_lock_exclusive() {
            let contended = fs2::lock_contended_error();
            if err.kind() == contended.kind() || err.raw_os_error() == contended.raw_os_error() {
                return Err(SyncError::TargetLocked {
                    path: target.to_path_buf(),
                });
            }
            return Err(SyncError::io(&path, err));
        }

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TargetLock {
    // The lock file is never deleted: unlinking it would let a waiter lock the orphaned inode while a newcomer
    // creates and locks a fresh file.
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn lock_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

/// Replace `path` with `contents` through a temporary file and an atomic rename.
///
/// The original file's permissions are carried over to the replacement.
pub fn write_atomic(path: &Path, contents: &str) -> SyncResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SyncError::io(dir, e))?;
    tmp.write_all(contents.as_bytes()).map_err(|e| SyncError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| SyncError::io(tmp.path(), e))?;

    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| SyncError::io(tmp.path(), e))?;
    }

    tmp.persist(path).map_err(|e| SyncError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

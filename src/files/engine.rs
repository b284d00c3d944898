//! Orchestration of find + transfer into a single configured job.

use crate::files::error::Result;
use crate::files::finder::find_files;
use crate::files::transfer::{ConflictPolicy, TransferMode, transfer_files};
use std::path::PathBuf;

/// A configured find-and-transfer operation.
///
/// Bundles the discovery and transfer parameters so callers (the CLI, or
/// scheduled jobs) construct it once and run it.
///
/// # Examples
///
/// ```rust,no_run
/// use pomelo::files::FindMoveJob;
///
/// let mut job = FindMoveJob::new("/inbox", "/processed");
/// job.pattern = "*.pdf".to_string();
/// job.dry_run = true;
/// for (src, dst) in job.run()? {
///     println!("{} -> {}", src.display(), dst.display());
/// }
/// # Ok::<(), pomelo::files::FilesError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FindMoveJob {
    pub src_root: PathBuf,
    pub dest_root: PathBuf,
    pub pattern: String,
    pub recursive: bool,
    pub mode: TransferMode,
    pub on_conflict: ConflictPolicy,
    pub dry_run: bool,
}

impl FindMoveJob {
    /// A job with the default parameters: match everything, recurse, copy,
    /// skip conflicts, really do it.
    pub fn new(src_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            src_root: src_root.into(),
            dest_root: dest_root.into(),
            pattern: "*".to_string(),
            recursive: true,
            mode: TransferMode::Copy,
            on_conflict: ConflictPolicy::Skip,
            dry_run: false,
        }
    }

    /// Discover matching files and transfer them.
    pub fn run(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let files = find_files(&self.src_root, &self.pattern, self.recursive, None)?;
        transfer_files(
            &files,
            &self.dest_root,
            self.mode,
            self.on_conflict,
            self.dry_run,
        )
    }
}

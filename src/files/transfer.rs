//! Copy/move of discovered files into a destination directory.

use crate::files::error::{FilesError, Result};
use log::debug;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Operation performed on each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}

/// What to do when the destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Leave the existing file alone and omit the source from the result
    Skip,
    /// Replace the existing file
    Overwrite,
    /// Fail with [`FilesError::Conflict`]
    Error,
}

/// Copy or move `files` into `dest_root`.
///
/// The destination directory is created if missing, except under
/// `dry_run`, which performs no filesystem writes at all. A source file
/// that disappeared between discovery and transfer is skipped, not an
/// error. Returns the (source, destination) pairs actually (or, under
/// dry-run, hypothetically) acted on.
pub fn transfer_files<P: AsRef<Path>>(
    files: &[PathBuf],
    dest_root: P,
    mode: TransferMode,
    on_conflict: ConflictPolicy,
    dry_run: bool,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let dest_root = dest_root.as_ref();
    if !dry_run {
        fs::create_dir_all(dest_root)?;
    }

    let mut ops = Vec::new();
    for src in files {
        let Some(file_name) = src.file_name() else {
            continue;
        };
        let dest = dest_root.join(file_name);

        if dest.exists() {
            match on_conflict {
                ConflictPolicy::Skip => {
                    debug!("skipping existing destination: {}", dest.display());
                    continue;
                }
                ConflictPolicy::Error => {
                    return Err(FilesError::Conflict(dest.display().to_string()));
                }
                ConflictPolicy::Overwrite => {}
            }
        }

        if dry_run {
            ops.push((src.clone(), dest));
            continue;
        }

        match perform(src, &dest, mode) {
            Ok(()) => ops.push((src.clone(), dest)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                // Source vanished between discovery and transfer.
                debug!("skipping vanished source: {}", src.display());
            }
            Err(err) => return Err(FilesError::Io(err)),
        }
    }
    Ok(ops)
}

fn perform(src: &Path, dest: &Path, mode: TransferMode) -> io::Result<()> {
    match mode {
        TransferMode::Copy => fs::copy(src, dest).map(|_| ()),
        TransferMode::Move => match fs::rename(src, dest) {
            Ok(()) => Ok(()),
            // rename cannot cross filesystems; fall back to copy + remove
            Err(_) if src.exists() => {
                fs::copy(src, dest)?;
                fs::remove_file(src)
            }
            Err(err) => Err(err),
        },
    }
}

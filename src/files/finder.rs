//! File discovery under a directory tree.
//!
//! Glob-based matching over a walk of the tree, with an optional first-class
//! predicate for filters the pattern cannot express (size, mtime, content).

use crate::files::error::{FilesError, Result};
use glob::{MatchOptions, Pattern};
use log::debug;
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Per-file filter applied after the glob pattern matches.
pub type PathPredicate<'a> = &'a dyn Fn(&Path) -> bool;

/// Find files under `root` matching a glob `pattern`.
///
/// A pattern without a path separator matches the file name at any depth
/// (`"*.txt"` finds text files in every subdirectory); a pattern containing
/// `/` matches the root-relative path with literal separators required
/// (`"logs/*.log"`). With `recursive` off, only direct children of `root`
/// are considered. Files that vanish between being listed and being
/// examined are skipped, not raised.
///
/// # Examples
///
/// ```rust,no_run
/// let big = |path: &std::path::Path| {
///     std::fs::metadata(path).map(|m| m.len() > 1_000_000).unwrap_or(false)
/// };
/// let files = pomelo::files::find_files("/data", "*.csv", true, Some(&big))?;
/// # Ok::<(), pomelo::files::FilesError>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    recursive: bool,
    predicate: Option<PathPredicate<'_>>,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(FilesError::NotFound(root.display().to_string()));
    }

    let pattern = Pattern::new(pattern)?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let match_relative_path = pattern.as_str().contains('/');

    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut results = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Entries removed mid-walk by another process are skipped.
                if err
                    .io_error()
                    .is_some_and(|io| io.kind() == ErrorKind::NotFound)
                {
                    debug!("skipping vanished entry: {err}");
                    continue;
                }
                return Err(FilesError::Io(err.into()));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let candidate: Cow<'_, str> = if match_relative_path {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            relative.to_string_lossy()
        } else {
            entry.file_name().to_string_lossy()
        };
        if !pattern.matches_with(&candidate, options) {
            continue;
        }
        if let Some(predicate) = predicate
            && !predicate(entry.path())
        {
            continue;
        }
        results.push(entry.path().to_path_buf());
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_name_pattern_matches_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.txt"), "a");
        touch(&dir.path().join("b.log"), "b");
        touch(&dir.path().join("sub/c.txt"), "c");

        let found = find_files(dir.path(), "*.txt", true, None).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn test_non_recursive_only_direct_children() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.txt"), "a");
        touch(&dir.path().join("sub/c.txt"), "c");

        let found = find_files(dir.path(), "*.txt", false, None).unwrap();
        assert_eq!(found, vec![dir.path().join("a.txt")]);
    }

    #[test]
    fn test_path_pattern_matches_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("logs/app.log"), "x");
        touch(&dir.path().join("logs/deep/old.log"), "y");
        touch(&dir.path().join("other/app.log"), "z");

        let found = find_files(dir.path(), "logs/*.log", true, None).unwrap();
        assert_eq!(found, vec![dir.path().join("logs/app.log")]);
    }

    #[test]
    fn test_predicate_filter() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("small.txt"), "x");
        touch(&dir.path().join("large.txt"), "xxxxxxxxxx");

        let min_five = |path: &Path| fs::metadata(path).map(|m| m.len() >= 5).unwrap_or(false);
        let found = find_files(dir.path(), "*.txt", true, Some(&min_five)).unwrap();
        assert_eq!(found, vec![dir.path().join("large.txt")]);
    }

    #[test]
    fn test_missing_root() {
        let err = find_files("/no/such/root", "*", true, None).unwrap_err();
        assert!(matches!(err, FilesError::NotFound(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_files(dir.path(), "[", true, None).unwrap_err();
        assert!(matches!(err, FilesError::Pattern(_)));
    }
}

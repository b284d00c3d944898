//! Read-only access to ZIP-based container archives.
//!
//! OOXML packages (.docx, .pptx) are ordinary ZIP archives whose entries are
//! named with forward-slash separated paths (e.g. `word/document.xml`). The
//! functions here open a container, enumerate its entries, and return raw
//! entry bytes; nothing in this module ever writes.

use crate::archive::error::{ArchiveError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Open an archive for reading, checking that the path exists first.
pub(crate) fn open(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    if !path.exists() {
        return Err(ArchiveError::NotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// List all entry names inside the archive, in central directory order.
///
/// # Examples
///
/// ```rust,no_run
/// let names = pomelo::archive::list_entries("document.docx")?;
/// for name in names {
///     println!("{name}");
/// }
/// # Ok::<(), pomelo::archive::ArchiveError>(())
/// ```
pub fn list_entries<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let mut archive = open(path.as_ref())?;
    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        names.push(archive.by_index_raw(i)?.name().to_string());
    }
    Ok(names)
}

/// Read a single entry from the archive as raw bytes.
///
/// Returns [`ArchiveError::MissingEntry`] if `name` is not present.
pub fn read_entry<P: AsRef<Path>>(path: P, name: &str) -> Result<Vec<u8>> {
    let mut archive = open(path.as_ref())?;
    read_one(&mut archive, name)
}

/// Read multiple entries from the archive.
///
/// All-or-nothing: fails with [`ArchiveError::MissingEntry`] on the first
/// missing name, returning no partial result.
pub fn read_entries<P, I, S>(path: P, names: I) -> Result<HashMap<String, Vec<u8>>>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut archive = open(path.as_ref())?;
    let mut result = HashMap::new();
    for name in names {
        let name = name.as_ref();
        let data = read_one(&mut archive, name)?;
        result.insert(name.to_string(), data);
    }
    Ok(result)
}

/// Read every entry of the archive into memory.
pub fn read_all<P: AsRef<Path>>(path: P) -> Result<HashMap<String, Vec<u8>>> {
    let mut archive = open(path.as_ref())?;
    let mut result = HashMap::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        result.insert(entry.name().to_string(), data);
    }
    Ok(result)
}

fn read_one<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(ArchiveError::MissingEntry(name.to_string())),
        Err(err) => return Err(err.into()),
    };
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn create_archive(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join(name);
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default();
        for (entry_name, data) in entries {
            writer.start_file(*entry_name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_list_entries_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_archive(
            dir.path(),
            "sample.zip",
            &[("b.txt", b"B"), ("a.txt", b"A"), ("c/d.txt", b"D")],
        );

        // Names come back in the order they were written, not sorted.
        assert_eq!(list_entries(&path).unwrap(), vec!["b.txt", "a.txt", "c/d.txt"]);
    }

    #[test]
    fn test_read_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_archive(dir.path(), "sample.zip", &[("a.txt", b"A"), ("b.txt", b"B")]);

        assert_eq!(read_entry(&path, "a.txt").unwrap(), b"A");
        assert_eq!(read_entry(&path, "b.txt").unwrap(), b"B");
    }

    #[test]
    fn test_read_entry_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_archive(dir.path(), "sample.zip", &[("a.txt", b"A")]);

        let err = read_entry(&path, "nope.txt").unwrap_err();
        assert!(matches!(err, ArchiveError::MissingEntry(name) if name == "nope.txt"));
    }

    #[test]
    fn test_read_entries_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_archive(dir.path(), "sample.zip", &[("a.txt", b"A"), ("b.txt", b"B")]);

        let loaded = read_entries(&path, ["a.txt", "b.txt"]).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["a.txt"], b"A");

        let err = read_entries(&path, ["a.txt", "missing.txt"]).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingEntry(_)));
    }

    #[test]
    fn test_read_all() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_archive(
            dir.path(),
            "sample.zip",
            &[("a.txt", b"A"), ("b.txt", b"B"), ("sub/c.txt", b"C")],
        );

        let all = read_all(&path).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all["sub/c.txt"], b"C");
    }

    #[test]
    fn test_missing_archive() {
        let err = list_entries("/no/such/archive.zip").unwrap_err();
        assert!(matches!(err, ArchiveError::NotFound(_)));
    }

    #[test]
    fn test_invalid_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.zip");
        std::fs::write(&path, b"this is not a zip file").unwrap();

        let err = list_entries(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::Zip(_)));
    }
}

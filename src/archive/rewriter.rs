//! Rebuilding ZIP archives with entries replaced, added, or dropped.
//!
//! This is the core primitive behind the OOXML editors: read an existing
//! container, swap the bytes of selected entries, and write a new, valid
//! archive next to it. The source archive is never mutated.
//!
//! Untouched entries are transferred with [`ZipWriter::raw_copy_file`], so
//! their compressed bytes and metadata (modification time, compression
//! method, permission bits) round-trip verbatim. Replaced entries keep the
//! original entry metadata and only swap content. Replacement names absent
//! from the source are appended as new entries with default metadata, in the
//! order supplied.
//!
//! The rewrite is not atomic against partial writes: a caller that needs
//! atomicity writes to a temporary path and renames on success.

use crate::archive::error::{ArchiveError, Result};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Rebuild `source` into a new archive at `output`.
///
/// For each source entry, in original order: names in `drop` are omitted
/// entirely (drop is authoritative, even over a replacement for the same
/// name); names in `replacements` are written with the original entry
/// metadata and the new bytes; everything else is copied byte-for-byte.
/// Replacement names that did not exist in the source are appended
/// afterwards in supply order, unless they too are in `drop`. If a name
/// repeats in `replacements`, the last occurrence wins. No name appears
/// twice in the output.
///
/// # Examples
///
/// ```rust,no_run
/// use std::collections::HashSet;
///
/// let replacements = vec![("word/document.xml".to_string(), b"<xml/>".to_vec())];
/// pomelo::archive::rewrite("in.docx", "out.docx", &replacements, &HashSet::new())?;
/// # Ok::<(), pomelo::archive::ArchiveError>(())
/// ```
pub fn rewrite<P, Q>(
    source: P,
    output: Q,
    replacements: &[(String, Vec<u8>)],
    drop: &HashSet<String>,
) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref();
    let output = output.as_ref();
    if !source.exists() {
        return Err(ArchiveError::NotFound(source.display().to_string()));
    }
    debug!(
        "rewriting {} -> {} ({} replacement(s), {} drop(s))",
        source.display(),
        output.display(),
        replacements.len(),
        drop.len()
    );

    let mut zin = ZipArchive::new(BufReader::new(File::open(source)?))?;
    let mut zout = ZipWriter::new(BufWriter::new(File::create(output)?));

    // Last occurrence wins when a name repeats in `replacements`.
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(replacements.len());
    for (i, (name, _)) in replacements.iter().enumerate() {
        index.insert(name.as_str(), i);
    }

    let mut handled: HashSet<&str> = HashSet::new();
    for i in 0..zin.len() {
        let entry = zin.by_index_raw(i)?;
        let name = entry.name().to_string();

        if drop.contains(&name) {
            debug!("dropping entry {name}");
            continue;
        }

        if let Some(&idx) = index.get(name.as_str()) {
            // New content under the original entry metadata.
            let mut options =
                SimpleFileOptions::default().compression_method(entry.compression());
            if let Some(mtime) = entry.last_modified() {
                options = options.last_modified_time(mtime);
            }
            if let Some(mode) = entry.unix_mode() {
                options = options.unix_permissions(mode);
            }
            zout.start_file(name.as_str(), options)?;
            zout.write_all(&replacements[idx].1)?;
            handled.insert(replacements[idx].0.as_str());
        } else {
            zout.raw_copy_file(entry)?;
        }
    }

    // Append replacement entries that did not exist in the source.
    for (i, (name, data)) in replacements.iter().enumerate() {
        if index.get(name.as_str()) != Some(&i) {
            continue; // superseded duplicate
        }
        if handled.contains(name.as_str()) || drop.contains(name) {
            continue;
        }
        zout.start_file(name.as_str(), SimpleFileOptions::default())?;
        zout.write_all(data)?;
    }

    zout.finish()?;
    Ok(())
}

/// Verbatim copy of an archive; `rewrite` with empty replacement and drop
/// sets, minus the mapping overhead.
pub fn clone_archive<P, Q>(source: P, destination: Q) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref();
    if !source.exists() {
        return Err(ArchiveError::NotFound(source.display().to_string()));
    }

    let mut zin = ZipArchive::new(BufReader::new(File::open(source)?))?;
    let mut zout = ZipWriter::new(BufWriter::new(File::create(destination.as_ref())?));
    for i in 0..zin.len() {
        zout.raw_copy_file(zin.by_index_raw(i)?)?;
    }
    zout.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::reader::{list_entries, read_all, read_entry};
    use std::path::PathBuf;
    use zip::CompressionMethod;
    use zip::DateTime;

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

    fn owned(name: &str, data: &[u8]) -> (String, Vec<u8>) {
        (name.to_string(), data.to_vec())
    }

    #[test]
    fn test_rewrite_replace_add_drop() {
        let dir = tempfile::tempdir().unwrap();
        let src = create_archive(
            dir.path(),
            "src.zip",
            &[("a.txt", b"A"), ("b.txt", b"B"), ("c.txt", b"C")],
        );
        let out = dir.path().join("out.zip");

        let replacements = vec![owned("b.txt", b"B2"), owned("new.txt", b"NEW")];
        let drop: HashSet<String> = ["c.txt".to_string()].into();
        rewrite(&src, &out, &replacements, &drop).unwrap();

        assert_eq!(list_entries(&out).unwrap(), vec!["a.txt", "b.txt", "new.txt"]);
        let all = read_all(&out).unwrap();
        assert_eq!(all["a.txt"], b"A");
        assert_eq!(all["b.txt"], b"B2");
        assert_eq!(all["new.txt"], b"NEW");
    }

    #[test]
    fn test_rewrite_does_not_mutate_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = create_archive(dir.path(), "src.zip", &[("a.txt", b"A"), ("b.txt", b"B")]);
        let before = std::fs::read(&src).unwrap();

        let out = dir.path().join("out.zip");
        rewrite(&src, &out, &[owned("a.txt", b"A2")], &HashSet::new()).unwrap();

        assert_eq!(std::fs::read(&src).unwrap(), before);
        assert_eq!(read_entry(&src, "a.txt").unwrap(), b"A");
    }

    #[test]
    fn test_drop_beats_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let src = create_archive(dir.path(), "src.zip", &[("a.txt", b"A"), ("b.txt", b"B")]);
        let out = dir.path().join("out.zip");

        // A name in both sets is dropped; the replacement does not resurrect it.
        let drop: HashSet<String> = ["b.txt".to_string()].into();
        rewrite(&src, &out, &[owned("b.txt", b"B2")], &drop).unwrap();

        assert_eq!(list_entries(&out).unwrap(), vec!["a.txt"]);
    }

    #[test]
    fn test_additions_keep_supply_order() {
        let dir = tempfile::tempdir().unwrap();
        let src = create_archive(dir.path(), "src.zip", &[("a.txt", b"A")]);
        let out = dir.path().join("out.zip");

        let replacements = vec![
            owned("z.txt", b"Z"),
            owned("m.txt", b"M"),
            owned("b.txt", b"B"),
        ];
        rewrite(&src, &out, &replacements, &HashSet::new()).unwrap();

        assert_eq!(
            list_entries(&out).unwrap(),
            vec!["a.txt", "z.txt", "m.txt", "b.txt"]
        );
    }

    #[test]
    fn test_duplicate_replacement_last_wins() {
        let dir = tempfile::tempdir().unwrap();
        let src = create_archive(dir.path(), "src.zip", &[("a.txt", b"A")]);
        let out = dir.path().join("out.zip");

        let replacements = vec![owned("x.txt", b"first"), owned("x.txt", b"second")];
        rewrite(&src, &out, &replacements, &HashSet::new()).unwrap();

        assert_eq!(list_entries(&out).unwrap(), vec!["a.txt", "x.txt"]);
        assert_eq!(read_entry(&out, "x.txt").unwrap(), b"second");
    }

    #[test]
    fn test_replacement_preserves_entry_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.zip");
        let mtime = DateTime::from_date_and_time(2021, 6, 5, 4, 3, 2).unwrap();
        {
            let mut writer = ZipWriter::new(File::create(&src).unwrap());
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Stored)
                .last_modified_time(mtime)
                .unix_permissions(0o640);
            writer.start_file("keep.txt", options).unwrap();
            writer.write_all(b"payload").unwrap();
            writer.start_file("swap.txt", options).unwrap();
            writer.write_all(b"old").unwrap();
            writer.finish().unwrap();
        }

        let out = dir.path().join("out.zip");
        rewrite(&src, &out, &[owned("swap.txt", b"new bytes")], &HashSet::new()).unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        for name in ["keep.txt", "swap.txt"] {
            let entry = archive.by_name(name).unwrap();
            assert_eq!(entry.compression(), CompressionMethod::Stored, "{name}");
            assert_eq!(entry.last_modified(), Some(mtime), "{name}");
            assert_eq!(entry.unix_mode(), Some(0o100640), "{name}");
        }
        assert_eq!(read_entry(&out, "keep.txt").unwrap(), b"payload");
        assert_eq!(read_entry(&out, "swap.txt").unwrap(), b"new bytes");
    }

    #[test]
    fn test_clone_archive() {
        let dir = tempfile::tempdir().unwrap();
        let src = create_archive(
            dir.path(),
            "src.zip",
            &[("a.txt", b"A"), ("b.txt", b"B"), ("sub/c.txt", b"C")],
        );
        let dst = dir.path().join("dst.zip");

        clone_archive(&src, &dst).unwrap();

        assert_eq!(list_entries(&dst).unwrap(), list_entries(&src).unwrap());
        assert_eq!(read_all(&dst).unwrap(), read_all(&src).unwrap());
    }

    #[test]
    fn test_rewrite_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.zip");
        let err = rewrite("/no/such/src.zip", &out, &[], &HashSet::new()).unwrap_err();
        assert!(matches!(err, ArchiveError::NotFound(_)));
    }
}

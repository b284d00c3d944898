//! Directory listing with sizes, timestamps, and checksums.
//!
//! Produces one record per regular file directly under a target directory,
//! renders an aligned text table, and exports CSV with either a wall-clock
//! or epoch-stamped default filename.

use crate::files::error::{FilesError, Result};
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const COLUMNS: [&str; 6] = [
    "filename",
    "suffix",
    "size_bytes",
    "size_human",
    "modified",
    "sha256",
];

/// One file's listing record.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub filename: String,
    /// Extension including the leading dot, or empty
    pub suffix: String,
    pub size_bytes: u64,
    pub size_human: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub modified: String,
    pub sha256: String,
}

/// Scan the regular files directly under `target`, sorted by name.
pub fn scan_dir<P: AsRef<Path>>(target: P) -> Result<Vec<FileRecord>> {
    let target = target.as_ref();
    if !target.is_dir() {
        return Err(FilesError::NotFound(target.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(target)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut records = Vec::new();
    for path in paths {
        if !path.is_file() {
            continue;
        }
        let meta = fs::metadata(&path)?;
        let modified: DateTime<Local> = meta.modified()?.into();
        records.push(FileRecord {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            suffix: path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
            size_bytes: meta.len(),
            size_human: human_size(meta.len()),
            modified: modified.format("%Y-%m-%d %H:%M:%S").to_string(),
            sha256: sha256_of(&path)?,
        });
    }
    Ok(records)
}

/// `1536` -> `"1.5K"`, powers of 1024 up to exabytes.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "K", "M", "G", "T", "P"] {
        if value < 1024.0 {
            return format!("{value:.1}{unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1}E")
}

/// SHA-256 of a file's contents, lowercase hex, read in 8 KiB chunks.
pub fn sha256_of<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let mut hasher = Sha256::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
    }
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    Ok(hex)
}

/// Render records as an aligned text table with a header rule.
pub fn render_table(records: &[FileRecord]) -> String {
    let rows: Vec<[String; 6]> = records.iter().map(row).collect();
    let mut widths: [usize; 6] = COLUMNS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.len());
        }
    }

    let header = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{name:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");

    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');
    for cells in &rows {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Export records as CSV.
pub fn write_csv<P: AsRef<Path>>(records: &[FileRecord], output: P) -> Result<()> {
    let mut file = BufWriter::new(File::create(output.as_ref())?);
    writeln!(file, "{}", COLUMNS.join(","))?;
    for record in records {
        let cells = row(record);
        let line = cells
            .iter()
            .map(|cell| csv_field(cell))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(file, "{line}")?;
    }
    file.flush()?;
    Ok(())
}

/// `file_list_20260829_153000.csv`-style name from the current local time.
pub fn timestamped_filename(base: &str, ext: &str) -> String {
    format!("{base}_{}{ext}", Local::now().format("%Y%m%d_%H%M%S"))
}

/// `file_list_1788000000.csv`-style name from Unix epoch seconds.
pub fn epoch_filename(base: &str, ext: &str) -> String {
    format!("{base}_{}{ext}", Local::now().timestamp())
}

fn row(record: &FileRecord) -> [String; 6] {
    [
        record.filename.clone(),
        record.suffix.clone(),
        record.size_bytes.to_string(),
        record.size_human.clone(),
        record.modified.clone(),
        record.sha256.clone(),
    ]
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

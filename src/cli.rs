//! Command-line interface for the pomelo toolkit.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use regex::Regex;

use pomelo::files::{
    ConflictPolicy, FindMoveJob, TransferMode, epoch_filename, find_files, render_table, scan_dir,
    timestamped_filename, transfer_files, write_csv,
};

#[derive(Parser, Debug)]
#[command(name = "pomelo")]
#[command(about = "OOXML document editing and file transfer toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find files by glob pattern and copy or move them
    FindMove(FindMoveArgs),
    /// Copy files whose names match a regex, optionally filtered by mtime
    Copy(CopyArgs),
    /// List a directory with sizes and checksums, exporting a CSV
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct FindMoveArgs {
    /// Source directory to search
    src: PathBuf,

    /// Destination directory to copy/move files into
    dst: PathBuf,

    /// Glob pattern for matching files (example: '*.txt')
    #[arg(short, long, default_value = "*")]
    pattern: String,

    /// Operation mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::Copy)]
    mode: ModeArg,

    /// What to do when the destination file already exists
    #[arg(long, value_enum, default_value_t = ConflictArg::Skip)]
    on_conflict: ConflictArg,

    /// Show what would be done, without touching the filesystem
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Do NOT search directories recursively
    #[arg(short = 'R', long = "no-recursive")]
    no_recursive: bool,
}

#[derive(Parser, Debug)]
pub struct CopyArgs {
    /// Origin directory
    origin: PathBuf,

    /// Destination directory
    destination: PathBuf,

    /// Regex pattern for filenames
    pattern: String,

    /// Copy only files newer than this file's mtime or the given ISO date/datetime
    #[arg(long)]
    newermt: Option<String>,

    /// Show what files would be copied without actually copying them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Suppress output of successfully copied files (useful for cron jobs)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory to scan
    target: PathBuf,

    /// Output CSV filename
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use epoch time in the output filename
    #[arg(long)]
    epoch: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Copy,
    Move,
}

impl From<ModeArg> for TransferMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Copy => TransferMode::Copy,
            ModeArg::Move => TransferMode::Move,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConflictArg {
    Skip,
    Overwrite,
    Error,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(policy: ConflictArg) -> Self {
        match policy {
            ConflictArg::Skip => ConflictPolicy::Skip,
            ConflictArg::Overwrite => ConflictPolicy::Overwrite,
            ConflictArg::Error => ConflictPolicy::Error,
        }
    }
}

pub fn dispatch() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::FindMove(args) => cmd_find_move(args),
        Commands::Copy(args) => cmd_copy(args),
        Commands::List(args) => cmd_list(args),
    }
}

fn cmd_find_move(args: FindMoveArgs) -> Result<()> {
    let job = FindMoveJob {
        src_root: args.src,
        dest_root: args.dst,
        pattern: args.pattern,
        recursive: !args.no_recursive,
        mode: args.mode.into(),
        on_conflict: args.on_conflict.into(),
        dry_run: args.dry_run,
    };
    let ops = job.run()?;

    for (src, dst) in &ops {
        if args.dry_run {
            println!("[DRY-RUN] {} -> {}", src.display(), dst.display());
        } else {
            println!("{} -> {}", src.display(), dst.display());
        }
    }
    println!("{} file(s) processed.", ops.len());
    Ok(())
}

fn cmd_copy(args: CopyArgs) -> Result<()> {
    let threshold = match args.newermt.as_deref().map(mtime_threshold).transpose() {
        Ok(threshold) => threshold,
        Err(err) => {
            // Report and abort the command without a crash, as a cron-driven
            // caller expects.
            error!("{err}");
            return Ok(());
        }
    };
    let regex = Regex::new(&args.pattern)?;

    let matches = |path: &Path| {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return false;
        };
        if !regex.is_match(&name) {
            return false;
        }
        match threshold {
            Some(limit) => fs::metadata(path)
                .and_then(|meta| meta.modified())
                .map(|mtime| mtime > limit)
                .unwrap_or(false),
            None => true,
        }
    };

    let files = find_files(&args.origin, "*", true, Some(&matches))?;
    if files.is_empty() {
        return Ok(());
    }

    // Last writer wins on filename collisions, hence overwrite.
    let ops = transfer_files(
        &files,
        &args.destination,
        TransferMode::Copy,
        ConflictPolicy::Overwrite,
        args.dry_run,
    )?;

    if args.dry_run {
        // Dry-run always reports, even under --quiet.
        for (src, dst) in &ops {
            info!("(Dry Run) Would copy: {} to {}", src.display(), dst.display());
        }
    } else if !args.quiet {
        for (src, _dst) in &ops {
            info!("Copied: {}", src.display());
        }
    }
    Ok(())
}

fn cmd_list(args: ListArgs) -> Result<()> {
    let records = scan_dir(&args.target)?;
    if records.is_empty() {
        println!("No files found.");
        return Ok(());
    }

    print!("{}", render_table(&records));

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(if args.epoch {
            epoch_filename("file_list", ".csv")
        } else {
            timestamped_filename("file_list", ".csv")
        })
    });
    write_csv(&records, &output)?;
    println!("\nCSV saved to: {}", output.display());
    Ok(())
}

/// Resolve a `--newermt` value to a modification-time threshold: either the
/// mtime of an existing file, or an ISO-8601 date/datetime in local time.
fn mtime_threshold(value: &str) -> Result<SystemTime> {
    if let Ok(meta) = fs::metadata(value) {
        return Ok(meta.modified()?);
    }

    let parsed = value
        .parse::<NaiveDateTime>()
        .or_else(|_| value.parse::<NaiveDate>().map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| {
            anyhow!("--newermt value is not a valid file or ISO date/datetime: {value}")
        })?;
    let local = Local
        .from_local_datetime(&parsed)
        .earliest()
        .ok_or_else(|| anyhow!("--newermt value maps to a nonexistent local time: {value}"))?;
    Ok(local.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mtime_threshold_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.txt");
        fs::write(&path, "x").unwrap();

        let threshold = mtime_threshold(path.to_str().unwrap()).unwrap();
        assert_eq!(threshold, fs::metadata(&path).unwrap().modified().unwrap());
    }

    #[test]
    fn test_mtime_threshold_from_iso_strings() {
        assert!(mtime_threshold("2026-01-15").is_ok());
        assert!(mtime_threshold("2026-01-15T10:30:00").is_ok());
        assert!(mtime_threshold("not-a-date").is_err());
    }
}

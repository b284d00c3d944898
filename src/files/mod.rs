//! File discovery, transfer, and listing utilities.
//!
//! The peripheral half of the crate: glob-based discovery over a directory
//! tree ([`finder`]), copy/move with conflict policies and dry-run
//! ([`transfer`]), the two combined into a configured job ([`engine`]), and
//! a directory listing tool with checksums and CSV export ([`listing`]).
//!
//! Everything here is synchronous, single-threaded filesystem plumbing; the
//! only local recovery is skipping files that vanish mid-operation.

pub mod engine;
pub mod error;
pub mod finder;
pub mod listing;
pub mod transfer;

pub use engine::FindMoveJob;
pub use error::{FilesError, Result};
pub use finder::{PathPredicate, find_files};
pub use listing::{
    FileRecord, epoch_filename, human_size, render_table, scan_dir, sha256_of,
    timestamped_filename, write_csv,
};
pub use transfer::{ConflictPolicy, TransferMode, transfer_files};

//! ZIP container layer.
//!
//! OOXML packages are ZIP archives; this module provides the two primitives
//! the document editors are built on:
//!
//! 1. **Reader** ([`reader`]): enumerate entry names and load raw entry
//!    bytes from an existing container.
//! 2. **Rewriter** ([`rewriter`]): produce a new container from an existing
//!    one with selected entries replaced, added, or dropped, while every
//!    untouched entry round-trips byte-for-byte with its metadata.
//!
//! All operations are synchronous and path-based; a rewrite holds one read
//! handle on the source and one write handle on the destination, and never
//! mutates the source.

pub mod error;
pub mod reader;
pub mod rewriter;

pub use error::{ArchiveError, Result};
pub use reader::{list_entries, read_all, read_entries, read_entry};
pub use rewriter::{clone_archive, rewrite};

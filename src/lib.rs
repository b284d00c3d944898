//! Pomelo - lightweight text editing for OOXML documents and small file
//! transfer utilities
//!
//! The crate is built around one structurally interesting primitive: the
//! **archive rewrite** in [`archive`], which rebuilds a ZIP container with
//! selected entries replaced, added, or dropped while every untouched entry
//! round-trips byte-for-byte with its metadata. The Word and PowerPoint
//! editors in [`ooxml`] are thin consumers of that primitive; the [`files`]
//! module holds the peripheral discovery/transfer/listing plumbing.
//!
//! # Example - Editing a DOCX file
//!
//! ```no_run
//! use pomelo::ooxml::DocxEditor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = DocxEditor::open("document.docx")?;
//!
//! // Extract all text
//! println!("{}", editor.text(""));
//!
//! // Replace and save to a new package; the source is never mutated
//! let changed = editor.replace("old", "new");
//! println!("{changed} run(s) changed");
//! editor.save("document-edited.docx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Editing a PPTX file
//!
//! ```no_run
//! use pomelo::ooxml::PptxEditor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = PptxEditor::open("deck.pptx")?;
//! println!("{} slide(s): {}", editor.slide_count(), editor.text(" "));
//! editor.replace("2025", "2026");
//! editor.save("deck-updated.pptx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level archive rewrite
//!
//! ```no_run
//! use std::collections::HashSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let replacements = vec![("README.md".to_string(), b"rewritten".to_vec())];
//! let drop: HashSet<String> = ["obsolete.txt".to_string()].into();
//! pomelo::archive::rewrite("in.zip", "out.zip", &replacements, &drop)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Finding and moving files
//!
//! ```no_run
//! use pomelo::files::{FindMoveJob, TransferMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut job = FindMoveJob::new("/inbox", "/archive");
//! job.pattern = "*.pdf".to_string();
//! job.mode = TransferMode::Move;
//! for (src, dst) in job.run()? {
//!     println!("{} -> {}", src.display(), dst.display());
//! }
//! # Ok(())
//! # }
//! ```

/// ZIP container layer: read-only access and the rewrite primitive
pub mod archive;

/// File discovery, transfer, and listing utilities
pub mod files;

/// OOXML (.docx, .pptx) text editors built on the archive layer
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::{DocxEditor, PptxEditor};

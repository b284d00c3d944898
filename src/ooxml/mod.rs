//! Office Open XML (OOXML) document editors.
//!
//! Minimal, conservative text editing for Word (.docx) and PowerPoint
//! (.pptx) packages. Each editor loads specific XML parts from the ZIP
//! container, offers naive text extraction and literal search & replace over
//! text runs, and saves by rebuilding the container through
//! [`crate::archive::rewrite`] with those parts replaced. Everything else
//! in the package passes through untouched.
//!
//! # Example: rewriting text in a Word document
//!
//! ```rust,no_run
//! use pomelo::ooxml::DocxEditor;
//!
//! let mut editor = DocxEditor::open("contract.docx")?;
//! let changed = editor.replace("{{customer}}", "ACME Corp");
//! println!("{changed} run(s) updated");
//! editor.save("contract-filled.docx")?;
//! # Ok::<(), pomelo::ooxml::DocumentError>(())
//! ```

pub mod docx;
pub mod error;
pub mod pptx;
pub mod xml;

pub use docx::DocxEditor;
pub use error::{DocumentError, Result};
pub use pptx::PptxEditor;
pub use xml::TextDocument;

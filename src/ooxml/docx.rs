//! Minimal Word (.docx) text editor.
//!
//! Loads `word/document.xml` from the package, exposes naive text extraction
//! and literal search & replace over `w:t` runs, and saves by rebuilding the
//! ZIP container with only that one entry replaced. No styles, no images,
//! no headers/footers.

use crate::archive::{self, ArchiveError};
use crate::ooxml::error::{DocumentError, Result};
use crate::ooxml::xml::TextDocument;
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Package entry holding the main document part.
pub const DOCUMENT_XML: &str = "word/document.xml";

/// WordprocessingML main namespace; text runs are `w:t` elements bound to it.
pub const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A Word (.docx) text editor.
///
/// The editor owns the parsed main document part for its lifetime. `save`
/// never mutates the source package; it produces a new one.
///
/// # Examples
///
/// ```rust,no_run
/// use pomelo::ooxml::DocxEditor;
///
/// let mut editor = DocxEditor::open("report.docx")?;
/// println!("{}", editor.text(""));
/// editor.replace("DRAFT", "FINAL");
/// editor.save("report-final.docx")?;
/// # Ok::<(), pomelo::ooxml::DocumentError>(())
/// ```
#[derive(Debug)]
pub struct DocxEditor {
    /// Path of the source package
    path: PathBuf,
    /// Parsed main document part
    document: TextDocument,
}

impl DocxEditor {
    /// Open an existing .docx package.
    ///
    /// Fails with an archive `NotFound` error if the package file is absent,
    /// and with [`DocumentError::Format`] if `word/document.xml` is missing
    /// or does not parse as well-formed XML.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = archive::read_entry(&path, DOCUMENT_XML).map_err(|err| match err {
            ArchiveError::MissingEntry(_) => DocumentError::Format(format!(
                "'{DOCUMENT_XML}' not found in package: {}",
                path.display()
            )),
            other => DocumentError::Archive(other),
        })?;
        let document =
            TextDocument::parse(&bytes, WORDPROCESSINGML_NS).map_err(|err| match err {
                DocumentError::Xml(msg) => DocumentError::Format(format!(
                    "failed to parse '{DOCUMENT_XML}' in {}: {msg}",
                    path.display()
                )),
                other => other,
            })?;
        Ok(Self { path, document })
    }

    /// Concatenated text of every `w:t` run, joined by `separator`.
    ///
    /// The conventional separator for Word documents is `""`, since runs
    /// within a paragraph are fragments of continuous text. No layout
    /// awareness, no normalization.
    pub fn text(&self, separator: &str) -> String {
        self.document.extract_text(separator)
    }

    /// Literal substring replace in every `w:t` run.
    ///
    /// Returns the number of runs changed, not the number of occurrences
    /// replaced. Matches spanning two runs are never replaced; an empty
    /// `old` is a no-op returning 0.
    pub fn replace(&mut self, old: &str, new: &str) -> usize {
        self.document.replace(old, new)
    }

    /// Write the edited document to a new .docx package.
    ///
    /// Rebuilds the container replacing only `word/document.xml`; every
    /// other package entry passes through byte-for-byte.
    pub fn save<P: AsRef<Path>>(&self, output: P) -> Result<()> {
        debug!(
            "saving {} -> {}",
            self.path.display(),
            output.as_ref().display()
        );
        let replacements = vec![(DOCUMENT_XML.to_string(), self.document.to_bytes())];
        archive::rewrite(&self.path, output, &replacements, &HashSet::new())?;
        Ok(())
    }
}

//! Minimal PowerPoint (.pptx) text editor.
//!
//! Discovers and loads `ppt/slides/slide*.xml` from the package, exposes
//! text extraction and literal search & replace over `a:t` runs across all
//! slides, and saves by rebuilding the ZIP container with one replacement
//! per slide entry. Notes, masters, layouts, and media are not considered.

use crate::archive;
use crate::ooxml::error::{DocumentError, Result};
use crate::ooxml::xml::TextDocument;
use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Directory prefix under which slide parts live.
pub const SLIDES_PREFIX: &str = "ppt/slides/";

/// Basename shared by slide parts (`slide1.xml`, `slide2.xml`, ...).
pub const SLIDE_BASENAME: &str = "slide";

/// Extension of slide parts.
pub const SLIDE_EXT: &str = ".xml";

/// DrawingML main namespace; text runs are `a:t` elements bound to it.
pub const DRAWINGML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// A PowerPoint (.pptx) text editor.
///
/// The editor owns one parsed document per slide, keyed and ordered by the
/// slide entry name so iteration is deterministic. `save` never mutates the
/// source package.
///
/// # Examples
///
/// ```rust,no_run
/// use pomelo::ooxml::PptxEditor;
///
/// let mut editor = PptxEditor::open("deck.pptx")?;
/// println!("{} slide(s)", editor.slide_count());
/// editor.replace("2025", "2026");
/// editor.save("deck-updated.pptx")?;
/// # Ok::<(), pomelo::ooxml::DocumentError>(())
/// ```
#[derive(Debug)]
pub struct PptxEditor {
    /// Path of the source package
    path: PathBuf,
    /// Parsed slide parts, in slide-name sort order
    slides: BTreeMap<String, TextDocument>,
}

impl PptxEditor {
    /// Open an existing .pptx package.
    ///
    /// Fails with an archive `NotFound` error if the package file is absent,
    /// and with [`DocumentError::Format`] if no slide parts are found or any
    /// slide fails to parse.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let names = archive::list_entries(&path).map_err(DocumentError::Archive)?;

        let mut slides = BTreeMap::new();
        for name in names {
            if !is_slide_name(&name) {
                continue;
            }
            let bytes = archive::read_entry(&path, &name)?;
            let document = TextDocument::parse(&bytes, DRAWINGML_NS).map_err(|err| match err {
                DocumentError::Xml(msg) => DocumentError::Format(format!(
                    "failed to parse slide '{name}' in {}: {msg}",
                    path.display()
                )),
                other => other,
            })?;
            slides.insert(name, document);
        }

        if slides.is_empty() {
            return Err(DocumentError::Format(format!(
                "no slide XML parts found in package: {}",
                path.display()
            )));
        }
        debug!("loaded {} slide(s) from {}", slides.len(), path.display());
        Ok(Self { path, slides })
    }

    /// Number of slides loaded.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide entry names, in sort order.
    pub fn slide_names(&self) -> impl Iterator<Item = &str> {
        self.slides.keys().map(String::as_str)
    }

    /// Concatenated text of every `a:t` run across all slides, in
    /// slide-name sort order, joined by `separator`.
    ///
    /// The conventional separator for presentations is `" "`, since
    /// separate runs are typically visually distinct.
    pub fn text(&self, separator: &str) -> String {
        let parts: Vec<&str> = self
            .slides
            .values()
            .flat_map(|document| document.texts())
            .collect();
        parts.join(separator)
    }

    /// Literal substring replace in every `a:t` run across all slides.
    ///
    /// Same semantics as the Word editor, applied independently per slide;
    /// returns the aggregate count of runs changed.
    pub fn replace(&mut self, old: &str, new: &str) -> usize {
        self.slides
            .values_mut()
            .map(|document| document.replace(old, new))
            .sum()
    }

    /// Write the edited presentation to a new .pptx package.
    ///
    /// Rebuilds the container with one replacement per slide entry; every
    /// non-slide entry passes through byte-for-byte.
    pub fn save<P: AsRef<Path>>(&self, output: P) -> Result<()> {
        debug!(
            "saving {} -> {}",
            self.path.display(),
            output.as_ref().display()
        );
        let replacements: Vec<(String, Vec<u8>)> = self
            .slides
            .iter()
            .map(|(name, document)| (name.clone(), document.to_bytes()))
            .collect();
        archive::rewrite(&self.path, output, &replacements, &HashSet::new())?;
        Ok(())
    }
}

/// Entry names like `ppt/slides/slide1.xml`; rels and other neighbors under
/// the slides directory do not qualify.
fn is_slide_name(name: &str) -> bool {
    name.strip_prefix(SLIDES_PREFIX)
        .is_some_and(|rest| rest.starts_with(SLIDE_BASENAME) && rest.ends_with(SLIDE_EXT))
}

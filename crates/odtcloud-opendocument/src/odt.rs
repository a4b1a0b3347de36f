//! `OpenDocument` Text (ODT) paragraph extraction
//!
//! Parses .odt files (`OpenDocument` Text format used by `LibreOffice` Writer).
//!
//! ## Format Structure
//! ODT files are ZIP archives containing:
//! - `content.xml` - Main document content
//! - `styles.xml` - Document styles, including page header/footer paragraphs
//! - `meta.xml` - Document metadata
//! - `mimetype` - Media type of the package
//!
//! Every `text:p` element becomes one paragraph. Header and footer
//! paragraphs from `styles.xml` come before the body paragraphs of
//! `content.xml`, unless the reader is restricted to [`ParagraphScope::Body`].

use crate::error::{OdfError, Result};
use crate::xml::{extract_file_as_string, extract_optional_file_as_string, space_count};
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Media type written by ODF text producers into the `mimetype` entry
pub const ODT_MIMETYPE: &str = "application/vnd.oasis.opendocument.text";

/// Which parts of the package contribute paragraphs
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphScope {
    /// Page header/footer paragraphs (`styles.xml`) followed by the body
    #[default]
    All,
    /// Body paragraphs (`content.xml`) only
    Body,
}

/// Parsed ODT document
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct OdtDocument {
    paragraphs: Vec<String>,
    /// Document title (from metadata)
    pub title: Option<String>,
    /// Document author (from metadata)
    pub author: Option<String>,
}

impl OdtDocument {
    /// Create a new empty ODT document
    #[inline]
    #[must_use = "creates empty ODT document"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph texts in document order
    ///
    /// The iterator can be requested any number of times and always yields
    /// the same sequence.
    #[inline]
    pub fn paragraphs(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.paragraphs.iter().map(String::as_str)
    }

    /// Number of `text:p` elements encountered
    #[inline]
    #[must_use]
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// All paragraph texts joined with `\n`
    ///
    /// Paragraph values never contain `\n` themselves, so the result has
    /// exactly `paragraph_count() - 1` newlines (none for an empty document).
    #[must_use]
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

/// Configurable ODT parser
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OdtReader {
    scope: ParagraphScope,
}

impl OdtReader {
    /// Reader with the default [`ParagraphScope::All`]
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict or widen the parts that contribute paragraphs
    #[inline]
    #[must_use]
    pub const fn scope(mut self, scope: ParagraphScope) -> Self {
        self.scope = scope;
        self
    }

    /// Parse an ODT file from a path
    ///
    /// The file handle and archive are owned by this call and released on
    /// every return path.
    ///
    /// # Errors
    ///
    /// Returns [`OdfError::NotFound`] if the path does not name a readable
    /// file, and
    /// a format error if the content is not a valid ODF package (not a ZIP
    /// archive, missing `content.xml`, or malformed XML).
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<OdtDocument> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                OdfError::NotFound(path.to_path_buf())
            }
            _ => OdfError::Io(e),
        })?;
        if file.metadata()?.is_dir() {
            return Err(OdfError::NotFound(path.to_path_buf()));
        }

        debug!("Parsing ODT document {}", path.display());
        self.parse_reader(BufReader::new(file))
    }

    /// Parse an ODT document from a reader
    ///
    /// # Errors
    ///
    /// Returns an error if the reader content is not a valid ZIP archive, if
    /// `content.xml` is missing, or if any XML part is malformed.
    pub fn parse_reader<R: Read + Seek>(&self, reader: R) -> Result<OdtDocument> {
        let mut archive = ZipArchive::new(reader)?;
        let mut doc = OdtDocument::new();

        if let Some(mimetype) = extract_optional_file_as_string(&mut archive, "mimetype")? {
            if mimetype.trim() != ODT_MIMETYPE {
                warn!("Unexpected package mimetype '{}', reading paragraphs anyway", mimetype.trim());
            }
        }

        if let Some(meta_xml) = extract_optional_file_as_string(&mut archive, "meta.xml")? {
            parse_metadata(&meta_xml, &mut doc)?;
        }

        let content_xml = extract_file_as_string(&mut archive, "content.xml")?;

        if self.scope == ParagraphScope::All {
            if let Some(styles_xml) = extract_optional_file_as_string(&mut archive, "styles.xml")? {
                collect_paragraphs(&styles_xml, &mut doc.paragraphs)?;
                debug!("styles.xml contributed {} paragraphs", doc.paragraphs.len());
            }
        }
        collect_paragraphs(&content_xml, &mut doc.paragraphs)?;
        debug!("Extracted {} paragraphs", doc.paragraphs.len());

        Ok(doc)
    }
}

/// Parse ODT file from a path
///
/// # Errors
///
/// See [`OdtReader::parse_file`].
pub fn parse_odt_file<P: AsRef<Path>>(path: P) -> Result<OdtDocument> {
    OdtReader::new().parse_file(path)
}

/// Parse ODT from a reader
///
/// # Errors
///
/// See [`OdtReader::parse_reader`].
pub fn parse_odt_reader<R: Read + Seek>(reader: R) -> Result<OdtDocument> {
    OdtReader::new().parse_reader(reader)
}

/// Extract all paragraph text of an ODT file, joined with `\n`
///
/// # Errors
///
/// [`OdfError::NotFound`] for a missing file, a format error for anything
/// that is not a readable ODF package.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    parse_odt_file(path).map(|doc| doc.text())
}

/// Parse metadata from meta.xml
fn parse_metadata(xml_content: &str, doc: &mut OdtDocument) -> Result<()> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut in_title = false;
    let mut in_initial_creator = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().local_name().as_ref() {
                b"title" => in_title = true,
                b"initial-creator" => in_initial_creator = true,
                _ => {}
            },
            Ok(Event::Text(e)) if in_title || in_initial_creator => {
                let text = e.unescape()?;
                let slot = if in_title {
                    &mut doc.title
                } else {
                    &mut doc.author
                };
                slot.get_or_insert_with(String::new).push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().local_name().as_ref() {
                b"title" => in_title = false,
                b"initial-creator" => in_initial_creator = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Text an inline element stands for, if any
fn inline_text(element: &BytesStart<'_>) -> Result<Option<String>> {
    let text = match element.name().as_ref() {
        b"text:s" => Some(" ".repeat(space_count(element)?)),
        b"text:tab" => Some("\t".to_string()),
        // A line break stays inside its paragraph
        b"text:line-break" => Some(" ".to_string()),
        _ => None,
    };
    Ok(text)
}

/// Append `text` to every open paragraph
fn push_to_open(paragraphs: &mut [String], open: &[usize], text: &str) {
    for &idx in open {
        paragraphs[idx].push_str(text);
    }
}

/// Append every `text:p` of an XML part to `paragraphs`, in start-tag order
///
/// Text inside a nested paragraph also belongs to each enclosing one.
fn collect_paragraphs(xml_content: &str, paragraphs: &mut Vec<String>) -> Result<()> {
    let mut reader = Reader::from_str(xml_content);

    let mut buf = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"text:p" {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                } else if let Some(text) = inline_text(&e)? {
                    push_to_open(paragraphs, &open, &text);
                }
            }
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"text:p" {
                    paragraphs.push(String::new());
                } else if let Some(text) = inline_text(&e)? {
                    push_to_open(paragraphs, &open, &text);
                }
            }
            Ok(Event::Text(e)) if !open.is_empty() => {
                let text = e.unescape()?;
                push_to_open(paragraphs, &open, &text.replace(['\r', '\n'], " "));
            }
            Ok(Event::CData(e)) if !open.is_empty() => {
                let text = String::from_utf8(e.into_inner().into_owned())?;
                push_to_open(paragraphs, &open, &text.replace(['\r', '\n'], " "));
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"text:p" => {
                open.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

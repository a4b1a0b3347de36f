//! `OpenDocument` Text paragraph extraction for odtcloud
//!
//! This crate reads the paragraph text of `.odt` documents:
//! - every `text:p` element becomes one paragraph, in document order
//! - markup is stripped; `text:s` and `text:tab` become whitespace
//! - empty paragraphs are kept as empty strings
//!
//! ## Format Overview
//!
//! `OpenDocument` Format (ODF) is an open standard (ISO/IEC 26300) for office
//! documents. All ODF files are ZIP archives containing XML files for content,
//! styles, and metadata.
//!
//! ## Usage
//!
//! ```no_run
//! use odtcloud_opendocument::extract_text;
//!
//! let text = extract_text("document.odt")?;
//! println!("{text}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A missing file and a broken package are different errors:
//!
//! ```no_run
//! use odtcloud_opendocument::parse_odt_file;
//!
//! match parse_odt_file("document.odt") {
//!     Ok(doc) => println!("{} paragraphs", doc.paragraph_count()),
//!     Err(e) if e.is_not_found() => eprintln!("no such file"),
//!     Err(e) => eprintln!("not an ODT document: {e}"),
//! }
//! ```

pub mod error;
pub mod odt;
pub mod xml;

pub use error::{OdfError, Result};
pub use odt::{
    extract_text, parse_odt_file, parse_odt_reader, OdtDocument, OdtReader, ParagraphScope,
    ODT_MIMETYPE,
};

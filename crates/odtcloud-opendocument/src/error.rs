//! Error types for ODT extraction

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when extracting text from an ODT document
#[derive(Error, Debug)]
pub enum OdfError {
    /// The path does not resolve to an existing, readable file
    #[error("document not found or not readable: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error other than a missing file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error (not an ODF container, or a corrupt one)
    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required part in the archive
    #[error("Missing required file: {0}")]
    MissingFile(String),

    /// UTF-8 conversion error
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl OdfError {
    /// True when the document path did not resolve to a file
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True when the file exists but is not a parseable ODF container
    #[inline]
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Zip(_) | Self::Xml(_) | Self::MissingFile(_) | Self::Utf8(_)
        )
    }
}

impl From<quick_xml::events::attributes::AttrError> for OdfError {
    #[inline]
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.into())
    }
}

/// Result type for ODT operations
pub type Result<T> = std::result::Result<T, OdfError>;

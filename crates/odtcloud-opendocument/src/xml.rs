//! Archive and XML helpers shared by the ODT parser

use crate::error::{OdfError, Result};
use quick_xml::events::BytesStart;
use std::io::{Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Extract a file from the ZIP archive
///
/// # Errors
///
/// Returns an error if the file is not found in the archive (`MissingFile`)
/// or if reading the file content fails (I/O error).
pub fn extract_file<R: Read + Seek>(archive: &mut ZipArchive<R>, filename: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(filename).map_err(|e| match e {
        ZipError::FileNotFound => OdfError::MissingFile(filename.to_string()),
        other => OdfError::Zip(other),
    })?;

    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

/// Extract a file as a UTF-8 string
///
/// # Errors
///
/// Returns an error if the file is not found in the archive (`MissingFile`),
/// if reading the file content fails (I/O error), or if the content is not valid UTF-8.
pub fn extract_file_as_string<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    filename: &str,
) -> Result<String> {
    let bytes = extract_file(archive, filename)?;
    String::from_utf8(bytes).map_err(std::convert::Into::into)
}

/// Extract an optional part; a missing part is `Ok(None)`
///
/// # Errors
///
/// Same as [`extract_file_as_string`], except that `MissingFile` is not an error.
pub fn extract_optional_file_as_string<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    filename: &str,
) -> Result<Option<String>> {
    match extract_file_as_string(archive, filename) {
        Ok(content) => Ok(Some(content)),
        Err(OdfError::MissingFile(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Number of spaces a `text:s` element stands for (`text:c`, default 1)
///
/// # Errors
///
/// Returns an error if the attribute list is malformed.
pub fn space_count(element: &BytesStart<'_>) -> Result<usize> {
    let count: usize = element
        .try_get_attribute("text:c")?
        .and_then(|attr| std::str::from_utf8(&attr.value).ok()?.trim().parse().ok())
        .unwrap_or(1);
    Ok(count)
}

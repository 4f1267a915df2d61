//! Document inspection
//!
//! Reports what a front end shows before an operation runs: page count,
//! version, whether a password will be needed.

use crate::error::ToolboxError;
use crate::source::{is_protected, open, open_readable};
use lopdf::Document;
use serde::Serialize;

/// PDF file information
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct PdfInfo {
    /// Number of pages in the document (0 if it is encrypted and unreadable)
    pub page_count: u32,
    /// PDF version string (e.g., "1.7")
    pub version: String,
    /// Whether the document carries password protection, including files
    /// readable with the empty user password
    pub encrypted: bool,
    /// File size in bytes
    pub size_bytes: usize,
    /// Document title from metadata (if available)
    pub title: Option<String>,
    /// Document author from metadata (if available)
    pub author: Option<String>,
}

/// Inspect a PDF without modifying it
pub fn inspect(bytes: &[u8]) -> Result<PdfInfo, ToolboxError> {
    let document = open(bytes)?;
    let readable = !document.is_encrypted();

    let page_count = if readable {
        document.get_pages().len() as u32
    } else {
        0
    };

    let (title, author) = if readable {
        extract_metadata(&document)
    } else {
        (None, None)
    };

    Ok(PdfInfo {
        page_count,
        version: extract_version(bytes),
        encrypted: is_protected(&document),
        size_bytes: bytes.len(),
        title,
        author,
    })
}

/// Parse PDF bytes and return page count
pub fn page_count(bytes: &[u8]) -> Result<u32, ToolboxError> {
    let document = open_readable(bytes)?;
    Ok(document.get_pages().len() as u32)
}

/// Extract PDF version from header
fn extract_version(bytes: &[u8]) -> String {
    // Header format: %PDF-1.7
    if bytes.len() >= 8 && bytes.starts_with(b"%PDF-") {
        if let Ok(version) = std::str::from_utf8(&bytes[5..8]) {
            return version.trim().to_string();
        }
    }
    "1.4".to_string()
}

/// Extract title and author from the Info dictionary
fn extract_metadata(document: &Document) -> (Option<String>, Option<String>) {
    let info = document
        .trailer
        .get(b"Info")
        .and_then(|obj| match obj.as_reference() {
            Ok(id) => document.get_dictionary(id),
            Err(_) => obj.as_dict(),
        });

    let Ok(info) = info else {
        return (None, None);
    };

    let text_entry = |key: &[u8]| -> Option<String> {
        let bytes = info.get(key).and_then(|obj| obj.as_str()).ok()?;
        let decoded = decode_text_string(bytes);
        (!decoded.is_empty()).then_some(decoded)
    };

    (text_entry(b"Title"), text_entry(b"Author"))
}

/// Text strings are UTF-16BE when they start with a byte order mark
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

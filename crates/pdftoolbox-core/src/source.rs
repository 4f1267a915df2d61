//! Loading input buffers into lopdf documents

use crate::error::ToolboxError;
use lopdf::Document;

/// Reject buffers that cannot be a PDF before handing them to the parser
pub fn check_header(bytes: &[u8]) -> Result<(), ToolboxError> {
    if bytes.len() < 8 {
        return Err(ToolboxError::UnreadablePdf(
            "File too small to be a valid PDF".into(),
        ));
    }

    if !bytes.starts_with(b"%PDF-") {
        return Err(ToolboxError::UnreadablePdf(
            "Not a valid PDF file (missing %PDF- header)".into(),
        ));
    }

    Ok(())
}

/// Parse a buffer as-is.
///
/// Documents protected by an empty user password are decrypted by the parser
/// and come back with `is_encrypted() == false`; anything else still reports
/// itself encrypted.
pub fn open(bytes: &[u8]) -> Result<Document, ToolboxError> {
    check_header(bytes)?;
    Document::load_mem(bytes).map_err(|e| ToolboxError::UnreadablePdf(e.to_string()))
}

/// Parse a buffer, decrypting it with `password` if it is encrypted.
///
/// The password is ignored for unencrypted documents. A document the parser
/// could already open with the empty user password still has its credential
/// checked: `password` must be the user password (empty) or the owner password.
pub fn open_with_password(bytes: &[u8], password: &str) -> Result<Document, ToolboxError> {
    let doc = open(bytes)?;
    if !is_protected(&doc) {
        return Ok(doc);
    }

    let doc = Document::load_mem_with_password(bytes, password).map_err(|e| match e {
        lopdf::Error::InvalidPassword => ToolboxError::WrongPassword,
        other => ToolboxError::UnreadablePdf(other.to_string()),
    })?;

    // Some security handlers load without complaint yet leave the content
    // sealed; treat that the same as a rejected credential.
    if doc.is_encrypted() {
        return Err(ToolboxError::WrongPassword);
    }

    Ok(doc)
}

/// True for documents carrying a security handler, whether or not the parser
/// managed to decrypt them on load
pub fn is_protected(doc: &Document) -> bool {
    doc.is_encrypted() || doc.was_encrypted()
}

/// Parse a buffer whose pages must be readable without a credential.
pub fn open_readable(bytes: &[u8]) -> Result<Document, ToolboxError> {
    let doc = open(bytes)?;
    if doc.is_encrypted() {
        return Err(ToolboxError::UnreadablePdf(
            "document is encrypted; unlock it first".into(),
        ));
    }
    Ok(doc)
}

//! Password protection: removing it (unlock) and applying it (lock)
//!
//! Locking uses the standard security handler with a 128-bit RC4 key
//! (revision 3). The new password serves as both user and owner password
//! and every permission is granted, so the password only gates opening.

use crate::assemble::{save, PageAssembler};
use crate::error::ToolboxError;
use crate::source::{open, open_with_password};
use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, StringFormat};
use sha2::{Digest, Sha256};
use tracing::debug;

const KEY_LENGTH_BITS: usize = 128;

/// Remove password protection.
///
/// Encrypted input is decrypted with `password`; unencrypted input is
/// accepted and the password ignored. The output holds the same pages in the
/// same order with no encryption.
pub fn unlock(bytes: &[u8], password: &str) -> Result<Vec<u8>, ToolboxError> {
    save(unlock_document(bytes, password)?)
}

/// Apply password protection to an unencrypted document.
///
/// Fails with [`ToolboxError::PasswordMismatch`] before reading the input if
/// the two passwords differ. An already encrypted source is rejected; use
/// [`lock_with_current_password`] to re-lock it.
pub fn lock(bytes: &[u8], password: &str, confirm_password: &str) -> Result<Vec<u8>, ToolboxError> {
    lock_with_current_password(bytes, password, confirm_password, None)
}

/// [`lock`], additionally decrypting an encrypted source with
/// `current_password` before re-encrypting it with `password`.
pub fn lock_with_current_password(
    bytes: &[u8],
    password: &str,
    confirm_password: &str,
    current_password: Option<&str>,
) -> Result<Vec<u8>, ToolboxError> {
    save(lock_document(
        bytes,
        password,
        confirm_password,
        current_password,
    )?)
}

/// Validate a new password and its confirmation without touching any input.
///
/// Callers that still have to decode their upload run this first, so a
/// mismatch or an empty password is reported whatever the payload holds.
pub fn check_new_password(password: &str, confirm_password: &str) -> Result<(), ToolboxError> {
    if password != confirm_password {
        return Err(ToolboxError::PasswordMismatch);
    }
    if password.is_empty() {
        return Err(ToolboxError::EmptyPassword);
    }
    Ok(())
}

pub(crate) fn unlock_document(bytes: &[u8], password: &str) -> Result<Document, ToolboxError> {
    let source = open_with_password(bytes, password)?;

    let mut assembler = PageAssembler::new();
    let pages = assembler.import(source)?;
    assembler.push_all(&pages)?;

    debug!(pages = pages.len(), input_bytes = bytes.len(), "unlocked document");
    Ok(assembler.finish())
}

pub(crate) fn lock_document(
    bytes: &[u8],
    password: &str,
    confirm_password: &str,
    current_password: Option<&str>,
) -> Result<Document, ToolboxError> {
    check_new_password(password, confirm_password)?;

    let source = match current_password {
        Some(current) => open_with_password(bytes, current)?,
        None => {
            let doc = open(bytes)?;
            if doc.is_encrypted() {
                return Err(ToolboxError::UnreadablePdf(
                    "document is encrypted; supply its current password".into(),
                ));
            }
            doc
        }
    };

    let mut assembler = PageAssembler::new();
    let pages = assembler.import(source)?;
    assembler.push_all(&pages)?;
    let mut doc = assembler.finish();

    // The file identifier feeds the RC4 key derivation and must exist first.
    let file_id = document_id(bytes);
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(file_id.clone(), StringFormat::Hexadecimal),
            Object::String(file_id, StringFormat::Hexadecimal),
        ]),
    );

    let version = EncryptionVersion::V2 {
        document: &doc,
        owner_password: password,
        user_password: password,
        key_length: KEY_LENGTH_BITS,
        permissions: Permissions::all(),
    };
    let state = EncryptionState::try_from(version)
        .map_err(|e| ToolboxError::OperationError(format!("Encryption setup failed: {}", e)))?;
    doc.encrypt(&state)
        .map_err(|e| ToolboxError::OperationError(format!("Encryption failed: {}", e)))?;

    debug!(pages = pages.len(), input_bytes = bytes.len(), "locked document");
    Ok(doc)
}

/// First 16 bytes of the SHA-256 of the source file
fn document_id(bytes: &[u8]) -> Vec<u8> {
    Sha256::digest(bytes)[..16].to_vec()
}

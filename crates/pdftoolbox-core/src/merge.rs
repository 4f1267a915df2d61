//! PDF Merge algorithm
//!
//! Combines multiple PDFs into a single document.

use crate::assemble::{save, PageAssembler};
use crate::error::ToolboxError;
use crate::source::open_readable;
use lopdf::Document;
use tracing::debug;

/// Merge multiple PDFs into one
///
/// Pages appear in input order, and within each input in their original
/// order. Every input is parsed before anything is assembled, so a bad file
/// anywhere in the list aborts the whole merge.
pub fn merge_documents(documents: &[Vec<u8>]) -> Result<Vec<u8>, ToolboxError> {
    save(merge_to_document(documents)?)
}

pub(crate) fn merge_to_document(documents: &[Vec<u8>]) -> Result<Document, ToolboxError> {
    if documents.is_empty() {
        return Err(ToolboxError::NothingToMerge);
    }

    let mut loaded_docs = Vec::with_capacity(documents.len());
    for (i, doc_bytes) in documents.iter().enumerate() {
        let doc = open_readable(doc_bytes).map_err(|e| match e {
            ToolboxError::UnreadablePdf(msg) => {
                ToolboxError::UnreadablePdf(format!("document {}: {}", i + 1, msg))
            }
            other => other,
        })?;
        loaded_docs.push(doc);
    }

    let mut assembler = PageAssembler::new();
    for source in loaded_docs {
        let pages = assembler.import(source)?;
        assembler.push_all(&pages)?;
    }

    debug!(
        inputs = documents.len(),
        pages = assembler.page_count(),
        "merged documents"
    );
    Ok(assembler.finish())
}

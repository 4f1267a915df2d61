//! Page extraction and reordering
//!
//! Builds a new document from a range spec such as `"3,1,2"` or `"2-4,1"`.
//! Unlike a plain split, the selection keeps the order it was written in and
//! may name a page more than once.

use crate::assemble::{save, PageAssembler};
use crate::error::ToolboxError;
use crate::range::PageRangeSpec;
use crate::source::open_readable;
use lopdf::Document;
use tracing::debug;

/// Extract and reorder pages according to `range_spec`.
///
/// Page numbers outside the document are dropped; if nothing is left the
/// call fails with [`ToolboxError::EmptySelection`].
pub fn extract_reorder(bytes: &[u8], range_spec: &str) -> Result<Vec<u8>, ToolboxError> {
    save(extract_to_document(bytes, range_spec)?)
}

/// Extract the given 1-based pages, in the given order.
///
/// Out-of-range entries are dropped exactly as with a parsed range spec.
pub fn extract_pages(bytes: &[u8], pages: &[u32]) -> Result<Vec<u8>, ToolboxError> {
    let source = open_readable(bytes)?;
    save(assemble_selection(source, pages)?)
}

pub(crate) fn extract_to_document(bytes: &[u8], range_spec: &str) -> Result<Document, ToolboxError> {
    let source = open_readable(bytes)?;
    let total_pages = source.get_pages().len() as u32;

    let spec = PageRangeSpec::parse(range_spec)?;
    let selection = spec.resolve(total_pages);

    debug!(
        total_pages,
        selected = selection.len(),
        "resolved page selection"
    );
    assemble_selection(source, &selection)
}

fn assemble_selection(source: Document, pages: &[u32]) -> Result<Document, ToolboxError> {
    let mut assembler = PageAssembler::new();
    let imported = assembler.import(source)?;

    for &page in pages {
        // Pages that do not exist are skipped, not reported
        if let Some(page_id) = imported.get(page) {
            assembler.push_page(page_id)?;
        }
    }

    if assembler.page_count() == 0 {
        return Err(ToolboxError::EmptySelection);
    }

    Ok(assembler.finish())
}

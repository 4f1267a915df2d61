//! Whole-document PDF transformations
//!
//! This crate provides the four toolbox operations on in-memory PDFs using
//! lopdf:
//! - [`unlock`]: remove password protection
//! - [`lock`]: add password protection
//! - [`merge_documents`]: concatenate files in upload order
//! - [`extract_reorder`]: select, reorder and duplicate pages from a range
//!   spec such as `"2-4,1"`
//!
//! Every operation is stateless: bytes in, bytes out. Each call parses its
//! own documents and drops them before returning. The output is always a
//! freshly assembled document whose pages are taken unchanged from the
//! inputs.

pub mod assemble;
pub mod command;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod merge;
pub mod range;
pub mod security;
pub mod source;

#[cfg(test)]
mod test_support;

pub use command::{execute, Operation, PdfCommand, ProcessMetrics, ProcessResult, PDF_MIME_TYPE};
pub use error::ToolboxError;
pub use extract::{extract_pages, extract_reorder};
pub use inspect::{inspect, page_count, PdfInfo};
pub use merge::merge_documents;
pub use range::PageRangeSpec;
pub use security::{check_new_password, lock, lock_with_current_password, unlock};

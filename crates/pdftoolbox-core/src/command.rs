//! JSON command envelope
//!
//! Lets a front end drive every operation through one serde-tagged message
//! and get back a uniform result, with PDFs carried as base64.

use crate::assemble::save;
use crate::error::ToolboxError;
use crate::{extract, merge, security};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// MIME type of every produced file
pub const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Unlock,
    Lock,
    Merge,
    ExtractReorder,
}

impl Operation {
    /// File name offered for the produced PDF
    pub fn download_name(self) -> &'static str {
        match self {
            Operation::Unlock => "unlocked.pdf",
            Operation::Lock => "locked.pdf",
            Operation::Merge => "merged.pdf",
            Operation::ExtractReorder => "processed.pdf",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum PdfCommand {
    Unlock {
        file: String,
        password: String,
    },
    Lock {
        file: String,
        password: String,
        confirm_password: String,
        #[serde(default)]
        current_password: Option<String>,
    },
    Merge {
        files: Vec<String>,
    },
    ExtractReorder {
        file: String,
        range: String,
    },
}

impl PdfCommand {
    pub fn operation(&self) -> Operation {
        match self {
            PdfCommand::Unlock { .. } => Operation::Unlock,
            PdfCommand::Lock { .. } => Operation::Lock,
            PdfCommand::Merge { .. } => Operation::Merge,
            PdfCommand::ExtractReorder { .. } => Operation::ExtractReorder,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub success: bool,
    pub operation: Operation,
    /// Suggested download name, set on success
    pub file_name: Option<String>,
    /// Base64-encoded PDF data
    pub data: Option<String>,
    pub error: Option<String>,
    /// Stable error name, see [`ToolboxError::kind`]
    pub error_kind: Option<String>,
    pub metrics: Option<ProcessMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessMetrics {
    pub input_size_bytes: usize,
    pub output_size_bytes: usize,
    pub page_count: u32,
    pub processing_time_ms: u64,
}

/// Run a command. Failures are reported in the result, never returned.
pub fn execute(command: PdfCommand) -> ProcessResult {
    let operation = command.operation();
    let started = Instant::now();

    match run(command) {
        Ok(output) => ProcessResult {
            success: true,
            operation,
            file_name: Some(operation.download_name().to_string()),
            metrics: Some(ProcessMetrics {
                input_size_bytes: output.input_size_bytes,
                output_size_bytes: output.bytes.len(),
                page_count: output.page_count,
                processing_time_ms: started.elapsed().as_millis() as u64,
            }),
            data: Some(BASE64.encode(&output.bytes)),
            error: None,
            error_kind: None,
        },
        Err(e) => {
            tracing::warn!(?operation, kind = e.kind(), "command failed: {}", e);
            ProcessResult {
                success: false,
                operation,
                file_name: None,
                data: None,
                error: Some(e.to_string()),
                error_kind: Some(e.kind().to_string()),
                metrics: None,
            }
        }
    }
}

struct CommandOutput {
    bytes: Vec<u8>,
    input_size_bytes: usize,
    page_count: u32,
}

fn run(command: PdfCommand) -> Result<CommandOutput, ToolboxError> {
    let (doc, input_size_bytes) = match command {
        PdfCommand::Unlock { file, password } => {
            let input = decode_pdf(&file)?;
            (security::unlock_document(&input, &password)?, input.len())
        }
        PdfCommand::Lock {
            file,
            password,
            confirm_password,
            current_password,
        } => {
            security::check_new_password(&password, &confirm_password)?;
            let input = decode_pdf(&file)?;
            let doc = security::lock_document(
                &input,
                &password,
                &confirm_password,
                current_password.as_deref(),
            )?;
            (doc, input.len())
        }
        PdfCommand::Merge { files } => {
            let inputs = files
                .iter()
                .map(|f| decode_pdf(f))
                .collect::<Result<Vec<_>, _>>()?;
            let size = inputs.iter().map(Vec::len).sum();
            (merge::merge_to_document(&inputs)?, size)
        }
        PdfCommand::ExtractReorder { file, range } => {
            let input = decode_pdf(&file)?;
            (extract::extract_to_document(&input, &range)?, input.len())
        }
    };

    let page_count = count_pages(&doc);
    Ok(CommandOutput {
        bytes: save(doc)?,
        input_size_bytes,
        page_count,
    })
}

fn count_pages(doc: &Document) -> u32 {
    doc.get_pages().len() as u32
}

/// Decode a base64 payload
pub fn decode_pdf(data: &str) -> Result<Vec<u8>, ToolboxError> {
    BASE64
        .decode(data.trim())
        .map_err(|e| ToolboxError::InvalidEncoding(format!("Invalid PDF base64: {}", e)))
}

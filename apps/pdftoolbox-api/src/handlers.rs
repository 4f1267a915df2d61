//! HTTP handlers for the PDF toolbox API
//!
//! Every transformation runs on the blocking pool; request buffers are moved
//! into the task and dropped once the response body has been built.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use pdftoolbox_core::command::decode_pdf;
use pdftoolbox_core::{Operation, PdfCommand, PdfInfo, ProcessResult, ToolboxError, PDF_MIME_TYPE};

use crate::error::ApiError;
use crate::models::*;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Report page count, version and encryption of an upload
pub async fn info(Json(req): Json<InfoRequest>) -> Result<Json<PdfInfo>, ApiError> {
    let pdf = decode_pdf(&req.pdf_base64)?;
    let info = run_blocking(move || pdftoolbox_core::inspect(&pdf)).await?;
    Ok(Json(info))
}

pub async fn unlock(Json(req): Json<UnlockRequest>) -> Result<Response, ApiError> {
    let pdf = decode_pdf(&req.pdf_base64)?;
    let output = run_blocking(move || pdftoolbox_core::unlock(&pdf, &req.password)).await?;
    Ok(pdf_download(Operation::Unlock, output))
}

pub async fn lock(Json(req): Json<LockRequest>) -> Result<Response, ApiError> {
    // Reported before the upload is even decoded
    pdftoolbox_core::check_new_password(&req.password, &req.confirm_password)?;

    let pdf = decode_pdf(&req.pdf_base64)?;
    let output = run_blocking(move || {
        pdftoolbox_core::lock_with_current_password(
            &pdf,
            &req.password,
            &req.confirm_password,
            req.current_password.as_deref(),
        )
    })
    .await?;
    Ok(pdf_download(Operation::Lock, output))
}

pub async fn merge(Json(req): Json<MergeRequest>) -> Result<Response, ApiError> {
    let files = req
        .files_base64
        .iter()
        .map(|f| decode_pdf(f))
        .collect::<Result<Vec<_>, _>>()?;
    let output = run_blocking(move || pdftoolbox_core::merge_documents(&files)).await?;
    Ok(pdf_download(Operation::Merge, output))
}

pub async fn extract(Json(req): Json<ExtractRequest>) -> Result<Response, ApiError> {
    let pdf = decode_pdf(&req.pdf_base64)?;
    let output =
        run_blocking(move || pdftoolbox_core::extract_reorder(&pdf, &req.range)).await?;
    Ok(pdf_download(Operation::ExtractReorder, output))
}

/// Run a [`PdfCommand`] and return the result envelope as JSON
pub async fn process(Json(command): Json<PdfCommand>) -> Result<Json<ProcessResult>, ApiError> {
    let result = tokio::task::spawn_blocking(move || pdftoolbox_core::execute(command))
        .await
        .map_err(|e| anyhow::anyhow!("worker task failed: {}", e))?;
    Ok(Json(result))
}

async fn run_blocking<T, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ToolboxError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| anyhow::anyhow!("worker task failed: {}", e))?;
    Ok(result?)
}

fn pdf_download(operation: Operation, bytes: Vec<u8>) -> Response {
    tracing::info!(
        operation = operation.download_name(),
        bytes = bytes.len(),
        "Serving PDF"
    );
    (
        [
            (header::CONTENT_TYPE, PDF_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", operation.download_name()),
            ),
        ],
        bytes,
    )
        .into_response()
}

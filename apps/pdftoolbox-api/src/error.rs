//! Error types for the PDF toolbox API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pdftoolbox_core::ToolboxError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Toolbox(#[from] ToolboxError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Toolbox(e) => match e {
                ToolboxError::WrongPassword => StatusCode::UNAUTHORIZED,
                ToolboxError::UnreadablePdf(_) | ToolboxError::EmptySelection => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ToolboxError::PasswordMismatch
                | ToolboxError::EmptyPassword
                | ToolboxError::InvalidRangeSyntax(_)
                | ToolboxError::NothingToMerge
                | ToolboxError::InvalidEncoding(_) => StatusCode::BAD_REQUEST,
                ToolboxError::OperationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Toolbox(e) => e.kind(),
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                "Internal error".to_string()
            }
            ApiError::Toolbox(e) if status.is_server_error() => {
                tracing::error!("Operation failed: {}", e);
                e.to_string()
            }
            ApiError::Toolbox(e) => {
                tracing::info!(kind = e.kind(), "Request rejected: {}", e);
                e.to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "kind": self.kind(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

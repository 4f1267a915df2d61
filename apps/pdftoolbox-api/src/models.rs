//! Request bodies for the PDF toolbox API

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct InfoRequest {
    pub pdf_base64: String,
}

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub pdf_base64: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LockRequest {
    pub pdf_base64: String,
    pub password: String,
    pub confirm_password: String,
    /// Needed only when the uploaded file is already encrypted
    #[serde(default)]
    pub current_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    /// Files in the order they should appear in the output
    pub files_base64: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub pdf_base64: String,
    pub range: String,
}

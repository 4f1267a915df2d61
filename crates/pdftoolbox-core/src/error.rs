use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolboxError {
    #[error("Failed to parse PDF: {0}")]
    UnreadablePdf(String),

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Invalid page range: {0}")]
    InvalidRangeSyntax(String),

    #[error("Page range does not select any page of the document")]
    EmptySelection,

    #[error("No documents to merge")]
    NothingToMerge,

    #[error("Invalid input encoding: {0}")]
    InvalidEncoding(String),

    #[error("PDF operation failed: {0}")]
    OperationError(String),
}

impl ToolboxError {
    /// Stable machine-readable name of the failure, used by callers that
    /// need to branch on the error without matching on the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolboxError::UnreadablePdf(_) => "unreadable_pdf",
            ToolboxError::WrongPassword => "wrong_password",
            ToolboxError::PasswordMismatch => "password_mismatch",
            ToolboxError::EmptyPassword => "empty_password",
            ToolboxError::InvalidRangeSyntax(_) => "invalid_range_syntax",
            ToolboxError::EmptySelection => "empty_selection",
            ToolboxError::NothingToMerge => "nothing_to_merge",
            ToolboxError::InvalidEncoding(_) => "invalid_encoding",
            ToolboxError::OperationError(_) => "operation_error",
        }
    }
}

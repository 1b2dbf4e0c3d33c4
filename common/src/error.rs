//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Variable store error type
#[derive(Debug, Error)]
pub enum HubError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Project not found
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Variable not found
    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Returns a safe error message for external clients.
    ///
    /// This method returns a generic error message that does not expose
    /// internal implementation details such as file paths or SQL text.
    /// Use this for HTTP responses to external clients.
    ///
    /// For debugging purposes, use the `Display` implementation
    /// (`to_string()`) which includes full error details - but only in
    /// server logs.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(_) => "Invalid request",
            Self::ProjectNotFound(_) => "Project not found",
            Self::VariableNotFound(_) => "Variable not found",
            Self::Authentication(_) => "Unauthorized",
            Self::Database(_) => "Database error",
            Self::Internal(_) => "Internal server error",
        }
    }
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (variable store)
pub type HubResult<T> = Result<T, HubError>;

//! Cloud provider error types

use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource already exists: {0}")]
    ResourceAlreadyExists(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Transient provider failure: {0}")]
    Transient(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used by callers that only care how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resource is already there; usually safe to continue
    DuplicateResource,
    /// The resource does not exist
    NotFound,
    /// Throttling, timeouts and dispatch failures
    Transient,
    /// Everything else
    Fatal,
}

impl CloudError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CloudError::ResourceAlreadyExists(_) => ErrorKind::DuplicateResource,
            CloudError::ResourceNotFound(_) => ErrorKind::NotFound,
            CloudError::Transient(_) => ErrorKind::Transient,
            _ => ErrorKind::Fatal,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind() == ErrorKind::DuplicateResource
    }

    /// Classify a provider error code (e.g. `EntityAlreadyExists`)
    ///
    /// Shared by every SDK adapter so that the taxonomy does not depend on
    /// which service produced the error.
    pub fn from_code(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        let detail = match code {
            Some(code) => format!("{code}: {message}"),
            None => message,
        };

        match code.unwrap_or_default() {
            "EntityAlreadyExists" | "ClusterAlreadyExists" | "InvalidPermission.Duplicate" => {
                CloudError::ResourceAlreadyExists(detail)
            }
            "NoSuchEntity" | "ClusterNotFound" | "InvalidGroup.NotFound"
            | "InvalidVpcID.NotFound" => CloudError::ResourceNotFound(detail),
            "Throttling" | "ThrottlingException" | "RequestLimitExceeded"
            | "ServiceUnavailable" => CloudError::Transient(detail),
            "InvalidClientTokenId" | "SignatureDoesNotMatch" | "AuthFailure"
            | "UnrecognizedClientException" => CloudError::AuthenticationFailed(detail),
            _ => CloudError::ApiError(detail),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;

//! Base trait for the assistant service

use async_trait::async_trait;
use mortgage_chat_core::protocol::{ApprovalRequest, ChatResponse, MessageRequest};
use thiserror::Error;

/// Error type for service operations
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Whether the failure happened before a response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ServiceError::HttpError(_))
    }

    /// Whether a response arrived but did not have the declared shape
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ServiceError::JsonError(_) | ServiceError::InvalidResponse(_)
        )
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Trait for the remote assistant service
///
/// Implementations perform exactly one exchange per call: no retries and
/// no client-side timeout.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Send a message turn
    async fn send_message(&self, request: MessageRequest) -> ServiceResult<ChatResponse>;

    /// Send an approval decision for the pending calculation
    async fn send_approval(&self, request: ApprovalRequest) -> ServiceResult<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let status = ServiceError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(!status.is_transport());
        assert!(!status.is_malformed());
        assert_eq!(status.to_string(), "Service returned HTTP 500: boom");

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(ServiceError::from(json).is_malformed());
        assert!(ServiceError::InvalidResponse("x".into()).is_malformed());
    }
}

//! HTTP client for the assistant service

use async_trait::async_trait;
use mortgage_chat_core::config::ServiceConfig;
use mortgage_chat_core::protocol::{ApprovalRequest, ChatResponse, MessageRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::base::{AssistantService, ServiceError, ServiceResult};

/// Response header that older service builds use to carry the session id
pub const SESSION_HEADER: &str = "x-session-id";

/// Longest slice of an error body kept in [`ServiceError::Status`]
const MAX_ERROR_BODY: usize = 200;

/// Assistant service client speaking JSON over a single POST endpoint
pub struct HttpAssistantClient {
    client: Client,
    endpoint: String,
}

impl HttpAssistantClient {
    /// Create a client for the full chat endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client from the service section of the configuration
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<B: Serialize + Sync>(&self, body: &B) -> ServiceResult<ChatResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = text.chars().take(MAX_ERROR_BODY).collect::<String>();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let header_session = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(ToString::to_string);

        let text = response.text().await?;
        let mut parsed: ChatResponse = serde_json::from_str(&text)?;

        if parsed.session().is_none() {
            if let Some(id) = header_session {
                debug!("Using session id from {} header", SESSION_HEADER);
                parsed.session_id = Some(id);
            }
        }
        if parsed.session().is_none() {
            warn!("Assistant response carried no session id");
        }

        Ok(parsed)
    }
}

#[async_trait]
impl AssistantService for HttpAssistantClient {
    async fn send_message(&self, request: MessageRequest) -> ServiceResult<ChatResponse> {
        debug!(
            endpoint = %self.endpoint,
            has_session = request.session_id.is_some(),
            "Sending message turn"
        );
        self.post(&request).await
    }

    async fn send_approval(&self, request: ApprovalRequest) -> ServiceResult<ChatResponse> {
        debug!(
            endpoint = %self.endpoint,
            approved = request.approval.approved,
            "Sending approval turn"
        );
        self.post(&request).await
    }
}

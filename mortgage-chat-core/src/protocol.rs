//! Wire types for the assistant service
//!
//! Both turn types are POSTed as JSON to the same endpoint. Field names
//! are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Parameters of a mortgage simulation the assistant wants to run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCalculation {
    /// Annual interest rate in percent
    pub interest_rate: f64,
    pub down_payment: f64,
    pub zip_code: String,
    pub home_price: f64,
    /// Loan term in years
    pub loan_term: u32,
}

/// Request body for a message turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    pub message: String,
    /// Absent until the service has issued a session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl MessageRequest {
    pub fn new(message: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            session_id,
        }
    }
}

/// The user's decision on a pending calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub approved: bool,
}

/// Request body for an approval turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub session_id: String,
    pub approval: ApprovalDecision,
}

impl ApprovalRequest {
    pub fn new(session_id: impl Into<String>, approved: bool) -> Self {
        Self {
            session_id: session_id.into(),
            approval: ApprovalDecision { approved },
        }
    }
}

/// Response body shared by both turn types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Assistant reply text
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub requires_approval: bool,
    /// Only meaningful when `requires_approval` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_calculation: Option<PendingCalculation>,
}

impl ChatResponse {
    /// A plain reply with no approval request
    pub fn reply(response: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            session_id: Some(session_id.into()),
            requires_approval: false,
            pending_calculation: None,
        }
    }

    /// A reply asking the user to approve `calculation`
    pub fn approval_required(
        session_id: impl Into<String>,
        calculation: PendingCalculation,
    ) -> Self {
        Self {
            response: String::new(),
            session_id: Some(session_id.into()),
            requires_approval: true,
            pending_calculation: Some(calculation),
        }
    }

    /// The echoed session id, ignoring empty values
    pub fn session(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }
}

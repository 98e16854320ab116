//! Conversation states and turn outcomes

use mortgage_chat_client::ServiceError;
use mortgage_chat_core::protocol::PendingCalculation;

/// Where the conversation currently stands
///
/// The pending calculation lives inside the approval states, so it cannot
/// outlive the gate that surfaced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConversationState {
    /// Ready for the next user message
    #[default]
    Idle,
    /// A message turn is in flight
    AwaitingAssistant,
    /// The assistant asked to run a calculation; waiting for the user
    AwaitingApprovalDecision(PendingCalculation),
    /// The user's decision is in flight
    SubmittingApproval(PendingCalculation),
}

impl ConversationState {
    /// The calculation awaiting (or undergoing) a decision, if any
    pub fn pending_action(&self) -> Option<&PendingCalculation> {
        match self {
            ConversationState::AwaitingApprovalDecision(calc)
            | ConversationState::SubmittingApproval(calc) => Some(calc),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }

    /// Whether a network exchange is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            ConversationState::AwaitingAssistant | ConversationState::SubmittingApproval(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::AwaitingAssistant => "awaiting_assistant",
            ConversationState::AwaitingApprovalDecision(_) => "awaiting_approval_decision",
            ConversationState::SubmittingApproval(_) => "submitting_approval",
        }
    }
}

/// Why a turn failed
///
/// Every kind renders the same fallback message; the distinction is kept
/// for logging and for callers that want it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response was received (connect, DNS, I/O, abandoned turn)
    Transport,
    /// The service answered with a non-success status
    Server,
    /// The response did not have the declared shape
    Malformed,
    /// An approval was attempted before any session id was known
    NoSession,
}

impl FailureKind {
    pub fn from_error(error: &ServiceError) -> Self {
        if error.is_transport() {
            FailureKind::Transport
        } else if error.is_malformed() {
            FailureKind::Malformed
        } else {
            FailureKind::Server
        }
    }
}

/// Result of a `send_message` or `decide` call
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The call was not allowed in the current state, or the input was blank
    Ignored,
    /// An assistant reply was appended to the transcript
    Replied,
    /// The assistant wants approval before running this calculation
    ApprovalRequired(PendingCalculation),
    /// The turn failed and the fallback message was appended
    Failed(FailureKind),
}

//! Conversation controller: the request/response cycle and approval gate

use mortgage_chat_client::{AssistantService, ServiceError};
use mortgage_chat_core::config::DEFAULT_FALLBACK_MESSAGE;
use mortgage_chat_core::protocol::{
    ApprovalRequest, ChatResponse, MessageRequest, PendingCalculation,
};
use mortgage_chat_core::session::{ChatMessage, SessionStore, Transcript};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::state::{ConversationState, FailureKind, TurnOutcome};

struct Inner {
    state: ConversationState,
    transcript: Transcript,
}

/// Drives one conversation with the assistant service.
///
/// Only one exchange is outstanding at a time: both operations check the
/// state under a short lock that is never held across the network call,
/// so a call made while a turn is in flight is ignored.
pub struct ConversationController {
    service: Arc<dyn AssistantService>,
    session: SessionStore,
    fallback_message: String,
    inner: Mutex<Inner>,
}

impl ConversationController {
    /// Create a controller for `service` that tracks its session in `session`
    pub fn new(service: Arc<dyn AssistantService>, session: SessionStore) -> Self {
        Self {
            service,
            session,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            inner: Mutex::new(Inner {
                state: ConversationState::Idle,
                transcript: Transcript::new(),
            }),
        }
    }

    /// Replace the text appended when a turn fails
    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    /// Seed the transcript with an opening assistant line
    pub fn with_greeting(self, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        if !greeting.trim().is_empty() {
            self.inner
                .lock()
                .transcript
                .push(ChatMessage::assistant(greeting));
        }
        self
    }

    pub fn state(&self) -> ConversationState {
        self.inner.lock().state.clone()
    }

    /// The calculation waiting for a decision, if any
    pub fn pending_action(&self) -> Option<PendingCalculation> {
        self.inner.lock().state.pending_action().cloned()
    }

    /// Whether the user may submit a new message
    pub fn is_input_enabled(&self) -> bool {
        self.inner.lock().state.is_idle()
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.inner.lock().transcript.messages().to_vec()
    }

    pub fn transcript_len(&self) -> usize {
        self.inner.lock().transcript.len()
    }

    /// Transcript entries after the first `offset`
    pub fn messages_since(&self, offset: usize) -> Vec<ChatMessage> {
        self.inner.lock().transcript.since(offset).to_vec()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send a user message.
    ///
    /// Blank text, or any state other than idle, makes this a no-op. Service
    /// failures never escape: the fallback message is appended instead.
    pub async fn send_message(&self, text: &str) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::Ignored;
        }

        let session_id = {
            let mut inner = self.inner.lock();
            if !inner.state.is_idle() {
                debug!(
                    state = inner.state.name(),
                    in_flight = inner.state.is_busy(),
                    "Ignoring message outside idle state"
                );
                return TurnOutcome::Ignored;
            }
            inner.transcript.push(ChatMessage::user(text));
            inner.state = ConversationState::AwaitingAssistant;
            self.session.get()
        };

        info!(has_session = session_id.is_some(), "Message turn started");
        let mut turn = TurnGuard::new(self);
        let result = self
            .service
            .send_message(MessageRequest::new(text, session_id))
            .await;

        let outcome = match result {
            Ok(response) => self.finish_message_turn(response),
            Err(e) => self.fail_turn(FailureKind::from_error(&e), Some(&e)),
        };
        turn.settle();
        outcome
    }

    /// Submit the user's decision on the pending calculation.
    ///
    /// A no-op unless a decision is awaited. However the turn ends, the
    /// pending calculation is cleared and the controller returns to idle.
    pub async fn decide(&self, approved: bool) -> TurnOutcome {
        let session_id = {
            let mut inner = self.inner.lock();
            let pending = match &inner.state {
                ConversationState::AwaitingApprovalDecision(calc) => calc.clone(),
                other => {
                    debug!(
                        state = other.name(),
                        in_flight = other.is_busy(),
                        "Ignoring decision with nothing pending"
                    );
                    return TurnOutcome::Ignored;
                }
            };
            match self.session.get() {
                Some(id) => {
                    inner.state = ConversationState::SubmittingApproval(pending);
                    id
                }
                None => {
                    drop(inner);
                    return self.fail_turn(FailureKind::NoSession, None);
                }
            }
        };

        info!(approved, "Approval turn started");
        let mut turn = TurnGuard::new(self);
        let result = self
            .service
            .send_approval(ApprovalRequest::new(session_id, approved))
            .await;

        let outcome = match result {
            Ok(response) => self.finish_approval_turn(response),
            Err(e) => self.fail_turn(FailureKind::from_error(&e), Some(&e)),
        };
        turn.settle();
        outcome
    }

    fn finish_message_turn(&self, response: ChatResponse) -> TurnOutcome {
        if response.requires_approval {
            let Some(calculation) = response.pending_calculation else {
                let err = ServiceError::InvalidResponse(
                    "requiresApproval set without pendingCalculation".to_string(),
                );
                return self.fail_turn(FailureKind::Malformed, Some(&err));
            };
            self.update_session(response.session_id.as_deref());
            // The pending action is surfaced out-of-band, not as a transcript entry.
            self.inner.lock().state =
                ConversationState::AwaitingApprovalDecision(calculation.clone());
            info!(
                home_price = calculation.home_price,
                loan_term = calculation.loan_term,
                "Assistant requested approval"
            );
            return TurnOutcome::ApprovalRequired(calculation);
        }

        self.update_session(response.session_id.as_deref());
        let mut inner = self.inner.lock();
        inner.transcript.push(ChatMessage::assistant(response.response));
        inner.state = ConversationState::Idle;
        TurnOutcome::Replied
    }

    fn finish_approval_turn(&self, response: ChatResponse) -> TurnOutcome {
        if response.requires_approval {
            // Only one calculation may be pending; a chained request is not queued.
            warn!("Ignoring approval request returned from an approval turn");
        }
        self.update_session(response.session_id.as_deref());
        let mut inner = self.inner.lock();
        inner.transcript.push(ChatMessage::assistant(response.response));
        inner.state = ConversationState::Idle;
        info!("Approval turn completed");
        TurnOutcome::Replied
    }

    fn fail_turn(&self, kind: FailureKind, error: Option<&ServiceError>) -> TurnOutcome {
        match error {
            Some(e) => warn!(kind = ?kind, error = %e, "Turn failed"),
            None => warn!(kind = ?kind, "Turn failed"),
        }
        let mut inner = self.inner.lock();
        inner
            .transcript
            .push(ChatMessage::assistant(self.fallback_message.clone()));
        inner.state = ConversationState::Idle;
        TurnOutcome::Failed(kind)
    }

    fn update_session(&self, session_id: Option<&str>) {
        if let Some(id) = session_id.filter(|id| !id.is_empty()) {
            if self.session.get().as_deref() != Some(id) {
                debug!("Session id updated");
            }
            self.session.set(id);
        }
    }
}

/// Settles a turn as failed if its future is dropped before the response
/// arrives, so the controller never stays in a transient state.
struct TurnGuard<'a> {
    controller: &'a ConversationController,
    settled: bool,
}

impl<'a> TurnGuard<'a> {
    fn new(controller: &'a ConversationController) -> Self {
        Self {
            controller,
            settled: false,
        }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Turn abandoned before the response arrived");
            self.controller.fail_turn(FailureKind::Transport, None);
        }
    }
}

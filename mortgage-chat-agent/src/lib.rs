//! Conversation logic for mortgage-chat
//!
//! This crate provides the conversation controller, which owns the
//! transcript and the approval state machine for a single session.

pub mod controller;
pub mod state;

pub use controller::ConversationController;
pub use state::{ConversationState, FailureKind, TurnOutcome};

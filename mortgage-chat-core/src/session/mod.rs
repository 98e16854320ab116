//! Session state for the active conversation
//!
//! The store keeps the server-issued session identifier; the transcript
//! keeps the visible, append-only message log. Both live in memory only.

pub mod store;
pub mod transcript;

pub use store::SessionStore;
pub use transcript::{ChatMessage, Role, Transcript};

//! Assistant service client for mortgage-chat
//!
//! This crate provides the service abstraction used by the conversation
//! controller and its HTTP implementation.

pub mod base;
pub mod http;

pub use base::{AssistantService, ServiceError, ServiceResult};
pub use http::HttpAssistantClient;

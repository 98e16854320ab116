//! Core types and state for mortgage-chat
//!
//! This crate provides the configuration, logging, session store,
//! transcript and wire protocol types shared by the other mortgage-chat
//! components.

pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod session;

pub use error::{Error, Result};

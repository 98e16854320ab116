//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration for mortgage-chat
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Assistant service endpoint
    #[serde(default)]
    pub service: ServiceConfig,
    /// Chat presentation
    #[serde(default)]
    pub chat: ChatConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Assistant service endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the assistant service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the chat endpoint, appended to `base_url`
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_chat_path() -> String {
    "/chat".to_string()
}

impl ServiceConfig {
    /// Full URL of the chat endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.chat_path)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_path: default_chat_path(),
        }
    }
}

/// Chat presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Title shown in the chat header
    #[serde(default = "default_title")]
    pub title: String,
    /// First assistant line shown when a chat starts (empty to disable)
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Message shown in place of a reply when a turn fails
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

fn default_title() -> String {
    "Mortgage Assistant".to_string()
}

fn default_greeting() -> String {
    "Hi! How can I assist you today?".to_string()
}

/// Text appended to the transcript when a turn fails
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "Sorry, we have faced an unexpected error, try again later.";

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            greeting: default_greeting(),
            fallback_message: default_fallback_message(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Also write logs to stderr
    #[serde(default)]
    pub stderr: bool,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            stderr: false,
            overrides: HashMap::new(),
        }
    }
}

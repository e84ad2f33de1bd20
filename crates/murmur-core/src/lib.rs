//! Core layer for Murmur — shared types, configuration, and utilities.
//!
//! # Architecture
//!
//! - [`types`] — typed chat messages and completion request/response DTOs
//! - [`config`] — typed config schema + loader with env var overrides
//! - [`utils`] — path resolution and string helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use config::{load_config, save_config, Config};
pub use types::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ContentPart, Message,
    MessageContent, UsageInfo,
};

//! OpenAI connector for Murmur — a typed facade over the OpenAI HTTP API.
//!
//! Every method is a direct pass-through: build a typed request from
//! arguments, perform the HTTP call, return (a field of) the provider's
//! response unmodified. No retry, no caching, no local state; assistants,
//! threads, and runs live entirely on the remote side and are referenced
//! by the opaque id strings the provider mints.
//!
//! # Architecture
//!
//! - [`client::OpenAiConnector`] — the single credential-scoped handle
//! - [`chat`] — one-shot chat completion over a caller-accumulated history
//! - [`audio`] — text-to-speech, transcription, translation
//! - [`moderation`] — content-policy classification
//! - [`assistants`] — the beta assistants / threads / runs surface
//! - [`observer`] — injectable per-call latency hook
//!
//! # Example
//!
//! ```no_run
//! use murmur_core::types::Message;
//! use murmur_openai::OpenAiConnector;
//!
//! # async fn demo() -> murmur_openai::Result<()> {
//! let connector = OpenAiConnector::from_env();
//! let choice = connector
//!     .completion(&[Message::user("Why are roses red?")], None, None)
//!     .await?;
//! println!("{}", choice.message.content.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod assistants;
pub mod audio;
pub mod chat;
pub mod client;
pub mod error;
pub mod moderation;
pub mod observer;

// Re-export main types for convenience
pub use assistants::{
    Assistant, AssistantTool, AssistantUpdate, ListObject, MessageBlock, Run, RunStatus, RunStep,
    StepDetails, Thread, ThreadMessage,
};
pub use chat::DEFAULT_SYSTEM_PROMPT;
pub use client::OpenAiConnector;
pub use error::{Error, Result};
pub use moderation::ModerationResult;
pub use observer::{CallObserver, TracingObserver};

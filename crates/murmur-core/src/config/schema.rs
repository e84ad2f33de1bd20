//! Configuration schema — typed settings for the OpenAI connector.
//!
//! Hierarchy: `Config` → `OpenAiConfig`, `ModelsConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.murmur/config.json` + env vars.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub models: ModelsConfig,
    /// When set, a latency observer is installed that logs wall-clock time
    /// per remote call. Request semantics are unchanged.
    pub timing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig::default(),
            models: ModelsConfig::default(),
            timing: false,
        }
    }
}

// ─────────────────────────────────────────────
// Provider credentials
// ─────────────────────────────────────────────

/// Connection settings for the OpenAI API (key, base URL, headers).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenAiConfig {
    /// API key for Bearer authentication. Usually from `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Custom API base URL (overrides `https://api.openai.com/v1`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Extra HTTP headers to send with each request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_headers: Option<HashMap<String, String>>,
}

impl OpenAiConfig {
    /// Whether an API key has been configured.
    ///
    /// An unconfigured handle still constructs; its first remote call
    /// fails with the provider's 401.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Model defaults
// ─────────────────────────────────────────────

/// Default model per capability. Any method that takes a model name can
/// still override these per call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelsConfig {
    /// Chat completions and assistants.
    pub chat: String,
    /// Text-to-speech synthesis.
    pub speech: String,
    /// Transcription and translation.
    pub transcription: String,
    /// Default synthesis voice. Passed through verbatim; the provider owns
    /// the set of valid names (onyx, alloy, echo, fable, nova, shimmer at
    /// the time of writing).
    pub voice: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chat: "gpt-4-1106-preview".to_string(),
            speech: "tts-1".to_string(),
            transcription: "whisper-1".to_string(),
            voice: "onyx".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

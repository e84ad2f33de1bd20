//! Content moderation — policy classification of a text string.
//!
//! The connector returns the first (only) result record uninterpreted;
//! deciding what to do about a flagged category is the caller's business.
//! Categories are kept as name→value maps because the provider renames
//! and extends them without notice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::OpenAiConnector;
use crate::error::{Error, Result};

/// Request body for the `/moderations` endpoint.
#[derive(Debug, Serialize)]
struct ModerationRequest<'a> {
    input: &'a str,
}

/// Response envelope from `/moderations`.
#[derive(Debug, Clone, Deserialize)]
struct ModerationResponse {
    #[allow(dead_code)]
    id: Option<String>,
    #[allow(dead_code)]
    model: Option<String>,
    results: Vec<ModerationResult>,
}

/// Policy classification of one input.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModerationResult {
    /// Whether any category flagged the input.
    pub flagged: bool,
    /// Per-category boolean flags (e.g. `"hate"`, `"self-harm/intent"`).
    #[serde(default)]
    pub categories: BTreeMap<String, bool>,
    /// Per-category confidence scores.
    #[serde(default)]
    pub category_scores: BTreeMap<String, f64>,
}

impl OpenAiConnector {
    /// Classify `text` against the provider's content policy and return
    /// the first result record.
    pub async fn text_moderation(&self, text: &str) -> Result<ModerationResult> {
        let request = ModerationRequest { input: text };
        let response: ModerationResponse = self
            .post_json("moderation", "/moderations", &request, false)
            .await?;

        response
            .results
            .into_iter()
            .next()
            .ok_or(Error::MalformedResponse("empty moderation results"))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

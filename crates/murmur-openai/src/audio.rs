//! Audio endpoints — speech synthesis, transcription, and translation.
//!
//! Synthesis writes the returned bytes to a caller-given path (resolved
//! against the CWD, overwriting any existing file) and also returns the
//! buffer. Transcription and translation read the file fully into memory
//! and upload it as a named multipart attachment; a missing file fails
//! with an IO error before any request goes out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use murmur_core::utils::{file_name_of, resolve_path};

use crate::client::OpenAiConnector;
use crate::error::Result;

/// Request body for the `/audio/speech` endpoint.
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

/// Response shape shared by transcriptions and translations.
#[derive(Debug, Deserialize)]
struct TranscriptionText {
    text: String,
}

impl OpenAiConnector {
    /// Synthesize `text` to audio, write the bytes to `path`, and return
    /// the buffer.
    ///
    /// `voice` is forwarded verbatim; the provider owns the set of valid
    /// names (onyx, alloy, echo, fable, nova, shimmer at the time of
    /// writing) and its rejection is the only failure signal for an
    /// unknown one.
    pub async fn text_to_speech(
        &self,
        text: &str,
        path: &str,
        model: Option<&str>,
        voice: Option<&str>,
    ) -> Result<Vec<u8>> {
        let target = resolve_path(path);
        let request = SpeechRequest {
            model: model.unwrap_or(&self.models.speech),
            voice: voice.unwrap_or(&self.models.voice),
            input: text,
        };

        let buffer = self
            .post_binary("audio.speech", "/audio/speech", &request)
            .await?;

        tokio::fs::write(&target, &buffer).await?;
        debug!(
            path = %target.display(),
            bytes = buffer.len(),
            "synthesized speech written"
        );
        Ok(buffer)
    }

    /// Transcribe the audio file at `path` in its own language.
    pub async fn speech_to_text(&self, path: &str) -> Result<String> {
        self.upload_audio("audio.transcription", "/audio/transcriptions", path)
            .await
    }

    /// Translate the audio file at `path` into English (the endpoint's
    /// fixed target language).
    pub async fn speech_translation(&self, path: &str) -> Result<String> {
        self.upload_audio("audio.translation", "/audio/translations", path)
            .await
    }

    async fn upload_audio(
        &self,
        operation: &'static str,
        endpoint: &str,
        path: &str,
    ) -> Result<String> {
        let source = resolve_path(path);
        let buffer = tokio::fs::read(&source).await?;

        debug!(
            path = %source.display(),
            model = %self.models.transcription,
            bytes = buffer.len(),
            "uploading audio"
        );

        let file_part = reqwest::multipart::Part::bytes(buffer)
            .file_name(file_name_of(&source))
            .mime_str("application/octet-stream")?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.models.transcription.clone());

        let response: TranscriptionText = self.post_multipart(operation, endpoint, form).await?;
        Ok(response.text)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

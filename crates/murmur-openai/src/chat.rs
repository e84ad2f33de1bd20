//! One-shot chat completion over a caller-accumulated message list.
//!
//! The connector keeps no history: callers accumulate the conversation
//! themselves and send the whole sequence each call. The system prompt is
//! prepended here, so the outbound message list is always
//! `[system] ++ messages` in that order.

use tracing::debug;

use murmur_core::types::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, Message};

use crate::client::OpenAiConnector;
use crate::error::{Error, Result};

/// System prompt used when the caller doesn't supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a useful assistant. You can answer questions, provide information, and help with tasks.";

impl OpenAiConnector {
    /// Submit a conversation for completion and return the first choice,
    /// unmodified.
    ///
    /// * `messages` — ordered user/assistant turns, accumulated by the caller.
    /// * `system` — system prompt; defaults to a generic assistant persona.
    /// * `model` — defaults to the configured chat model.
    pub async fn completion(
        &self,
        messages: &[Message],
        system: Option<&str>,
        model: Option<&str>,
    ) -> Result<ChatChoice> {
        let system = system.unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let model = model.unwrap_or(&self.models.chat);

        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(Message::system(system));
        all.extend_from_slice(messages);

        debug!(model, messages = all.len(), "requesting chat completion");

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: all,
        };

        let response: ChatCompletionResponse = self
            .post_json("chat.completion", "/chat/completions", &request, false)
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .ok_or(Error::MalformedResponse("empty choices array"))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::make_connector;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        })
    }

    #[tokio::test]
    async fn test_completion_returns_first_choice() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Roses are red because...")))
            .mount(&mock_server)
            .await;

        let connector = make_connector(&mock_server.uri());
        let choice = connector
            .completion(&[Message::user("Why are roses red?")], None, None)
            .await
            .unwrap();

        assert_eq!(choice.message.role, "assistant");
        assert_eq!(choice.message.content.as_deref(), Some("Roses are red because..."));
        assert_eq!(choice.finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn test_completion_prepends_system_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .mount(&mock_server)
            .await;

        let connector = make_connector(&mock_server.uri());
        let history = vec![
            Message::user("Hello, I'm a user."),
            Message::assistant("Hello, how can I help you?"),
            Message::user("Why are roses red?"),
        ];
        connector
            .completion(&history, Some("You are a botanist."), Some("gpt-3.5-turbo"))
            .await
            .unwrap();

        // Exactly one outbound request, message list == [system] ++ history
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "You are a botanist.");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "Hello, I'm a user.");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["content"], "Why are roses red?");
    }

    #[tokio::test]
    async fn test_completion_uses_defaults() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .mount(&mock_server)
            .await;

        let connector = make_connector(&mock_server.uri());
        connector
            .completion(&[Message::user("Hi")], None, None)
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "gpt-4-1106-preview");
        assert_eq!(body["messages"][0]["content"], DEFAULT_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn test_completion_api_error_propagates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "message": "Rate limit exceeded", "type": "rate_limit_error" }
            })))
            .mount(&mock_server)
            .await;

        let connector = make_connector(&mock_server.uri());
        let err = connector
            .completion(&[Message::user("Hello")], None, None)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::TOO_MANY_REQUESTS));
    }

    #[tokio::test]
    async fn test_completion_empty_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-empty", "choices": [], "usage": null
            })))
            .mount(&mock_server)
            .await;

        let connector = make_connector(&mock_server.uri());
        let err = connector
            .completion(&[Message::user("Hello")], None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}

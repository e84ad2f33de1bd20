//! Chat types for Murmur — the OpenAI chat completions wire format, typed.
//!
//! Callers accumulate [`Message`] values themselves (the connector keeps no
//! history between calls) and hand the whole sequence to
//! `completion`. Each role maps to one enum variant so a malformed
//! message is a compile error, not a 400 from the provider.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Messages (chat completions format)
// ─────────────────────────────────────────────

/// One turn in a conversation, in the OpenAI message format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "system")]
    System { content: String },

    #[serde(rename = "user")]
    User { content: MessageContent },

    #[serde(rename = "assistant")]
    Assistant { content: String },
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// Create a user message with text content.
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a user message with multipart content (text + images).
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Message::User {
            content: MessageContent::Parts(parts),
        }
    }

    /// Create an assistant message (a prior model reply fed back as context).
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Message Content (text or multipart/vision)
// ─────────────────────────────────────────────

/// User message content — either plain text or multipart (for vision/images).
///
/// When serialized: text becomes a plain string, parts become an array of objects.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content (most common case).
    Text(String),
    /// Multipart content with text and/or images (for vision models).
    Parts(Vec<ContentPart>),
}

/// A single part of a multipart message.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentPart {
    /// Text part.
    #[serde(rename = "text")]
    Text { text: String },
    /// Image URL part (can be a URL or base64 data URI).
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

/// Image URL payload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

// ─────────────────────────────────────────────
// Chat completion request
// ─────────────────────────────────────────────

/// Request body for the `/chat/completions` endpoint.
///
/// The connector prepends the system message before building this, so
/// `messages[0]` is always the system prompt.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

// ─────────────────────────────────────────────
// Chat completion response
// ─────────────────────────────────────────────

/// Raw chat completion response from the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<UsageInfo>,
}

/// A single choice in a chat completion response.
///
/// This is what `completion` hands back to the caller, unmodified.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

/// The model's reply within a chat completion choice.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    pub role: String,
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Message serialization ──

    #[test]
    fn test_system_message_serialization() {
        let msg = Message::system("You are a useful assistant.");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "You are a useful assistant.");
    }

    #[test]
    fn test_user_text_message_serialization() {
        let msg = Message::user("Why are roses red?");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "Why are roses red?");
    }

    #[test]
    fn test_user_multipart_message_serialization() {
        let msg = Message::user_parts(vec![
            ContentPart::Text {
                text: "What's in this image?".to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/png;base64,abc123".to_string(),
                    detail: Some("high".to_string()),
                },
            },
        ]);
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "user");
        let content = json["content"].as_array().unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], "What's in this image?");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "data:image/png;base64,abc123");
        assert_eq!(content[1]["image_url"]["detail"], "high");
    }

    #[test]
    fn test_assistant_message_serialization() {
        let msg = Message::assistant("Hello, how can I help you?");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "Hello, how can I help you?");
    }

    // ── Message deserialization ──

    #[test]
    fn test_user_text_deserialization() {
        let json = json!({"role": "user", "content": "Hello, I'm a user."});
        let msg: Message = serde_json::from_value(json).unwrap();

        match msg {
            Message::User {
                content: MessageContent::Text(text),
            } => assert_eq!(text, "Hello, I'm a user."),
            _ => panic!("Expected User text message"),
        }
    }

    #[test]
    fn test_message_round_trip() {
        let messages = vec![
            Message::user("Hello, I'm a user."),
            Message::assistant("Hello, how can I help you?"),
            Message::user("Why are roses red?"),
        ];

        let json_str = serde_json::to_string(&messages).unwrap();
        let deserialized: Vec<Message> = serde_json::from_str(&json_str).unwrap();

        assert_eq!(messages, deserialized);
    }

    // ── ChatCompletionRequest serialization ──

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4-1106-preview".to_string(),
            messages: vec![
                Message::system("You are a useful assistant."),
                Message::user("Hello"),
            ],
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4-1106-preview");
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
    }

    // ── ChatCompletionResponse parsing ──

    #[test]
    fn test_chat_completion_response_parsing() {
        let api_json = json!({
            "id": "chatcmpl-abc123",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Hello! How can I help?"
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 8,
                "total_tokens": 18
            }
        });

        let resp: ChatCompletionResponse = serde_json::from_value(api_json).unwrap();

        assert_eq!(resp.id.as_deref(), Some("chatcmpl-abc123"));
        assert_eq!(resp.choices.len(), 1);
        let choice = &resp.choices[0];
        assert_eq!(choice.message.role, "assistant");
        assert_eq!(choice.message.content.as_deref(), Some("Hello! How can I help?"));
        assert_eq!(choice.finish_reason.as_deref(), Some("stop"));
        assert_eq!(resp.usage.as_ref().unwrap().total_tokens, 18);
    }

    #[test]
    fn test_chat_completion_response_missing_index() {
        // Some gateways drop the index field; it defaults to 0.
        let api_json = json!({
            "id": null,
            "choices": [{
                "message": { "role": "assistant", "content": "ok" },
                "finish_reason": "stop"
            }],
            "usage": null
        });

        let resp: ChatCompletionResponse = serde_json::from_value(api_json).unwrap();
        assert_eq!(resp.choices[0].index, 0);
    }
}

//! Assistants, threads, and runs — the beta stateful conversation model.
//!
//! Unlike `/chat/completions`, the provider keeps the conversation
//! context: the caller appends single messages to a remote thread and
//! starts runs of an assistant against it. Every entity here is owned by
//! the remote side and referenced by an opaque id string; this module
//! only threads those ids through. Run state transitions (queued →
//! in_progress → terminal) are observed via snapshot reads, never driven
//! locally.
//!
//! All endpoints in this module carry the `OpenAI-Beta: assistants=v1`
//! header.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::OpenAiConnector;
use crate::error::{Error, Result};

// ─────────────────────────────────────────────
// Entities (remote-owned, locally typed)
// ─────────────────────────────────────────────

/// A configured assistant persona.
#[derive(Debug, Clone, Deserialize)]
pub struct Assistant {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

/// A capability descriptor attached to an assistant. Enumerated, not
/// validated locally — unknown combinations are the provider's problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum AssistantTool {
    #[serde(rename = "code_interpreter")]
    CodeInterpreter,
    #[serde(rename = "retrieval")]
    Retrieval,
    #[serde(rename = "function")]
    Function { function: serde_json::Value },
}

/// A remote conversation context.
#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// One message stored in a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub thread_id: String,
    pub role: String,
    pub content: Vec<MessageBlock>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

/// A content block within a thread message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MessageBlock {
    #[serde(rename = "text")]
    Text { text: TextBlock },
    #[serde(rename = "image_file")]
    ImageFile { image_file: ImageFileBlock },
}

/// Text payload of a content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextBlock {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

/// Image-file payload of a content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFileBlock {
    pub file_id: String,
}

/// One execution of an assistant against a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub thread_id: String,
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub started_at: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

/// Provider-reported failure detail on a run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Lifecycle states of a run, as reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Expired,
}

impl RunStatus {
    /// Whether polling can stop: the run finished, or is waiting on the
    /// caller (`requires_action`).
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Completed
                | RunStatus::Failed
                | RunStatus::RequiresAction
                | RunStatus::Cancelled
                | RunStatus::Expired
        )
    }
}

/// One step in a run's execution log.
#[derive(Debug, Clone, Deserialize)]
pub struct RunStep {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub run_id: String,
    pub thread_id: String,
    #[serde(rename = "type")]
    pub step_type: String,
    pub status: String,
    pub step_details: StepDetails,
}

/// The detail payload of a run step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StepDetails {
    #[serde(rename = "message_creation")]
    MessageCreation { message_creation: MessageCreation },
    #[serde(rename = "tool_calls")]
    ToolCalls { tool_calls: Vec<serde_json::Value> },
}

/// Payload of a `message_creation` step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageCreation {
    pub message_id: String,
}

/// The provider's list envelope (`{"object": "list", "data": [...]}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ListObject<T> {
    pub object: String,
    pub data: Vec<T>,
    #[serde(default)]
    pub first_id: Option<String>,
    #[serde(default)]
    pub last_id: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

// ─────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CreateAssistantRequest<'a> {
    name: &'a str,
    instructions: &'a str,
    tools: &'a [AssistantTool],
    model: &'a str,
}

/// Full replacement configuration for an assistant, including attached
/// file references.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantUpdate {
    pub name: String,
    pub instructions: String,
    pub tools: Vec<AssistantTool>,
    pub model: String,
    pub file_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

// ─────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────

impl OpenAiConnector {
    /// Create an assistant persona.
    pub async fn create_assistant(
        &self,
        name: &str,
        instructions: &str,
        tools: &[AssistantTool],
        model: Option<&str>,
    ) -> Result<Assistant> {
        let request = CreateAssistantRequest {
            name,
            instructions,
            tools,
            model: model.unwrap_or(&self.models.chat),
        };
        self.post_json("assistants.create", "/assistants", &request, true)
            .await
    }

    /// Fetch the current state of an assistant.
    pub async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.get_json(
            "assistants.retrieve",
            &format!("/assistants/{assistant_id}"),
            true,
        )
        .await
    }

    /// Replace an assistant's full configuration.
    pub async fn update_assistant(
        &self,
        assistant_id: &str,
        update: &AssistantUpdate,
    ) -> Result<Assistant> {
        self.post_json(
            "assistants.update",
            &format!("/assistants/{assistant_id}"),
            update,
            true,
        )
        .await
    }

    /// Create a fresh, empty thread.
    pub async fn create_thread(&self) -> Result<Thread> {
        self.post_json("threads.create", "/threads", &serde_json::json!({}), true)
            .await
    }

    /// Fetch the current state of a thread.
    pub async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread> {
        self.get_json("threads.retrieve", &format!("/threads/{thread_id}"), true)
            .await
    }

    /// Append one message to a thread. Ordering beyond call order is the
    /// remote service's business.
    pub async fn add_message_to_thread(
        &self,
        thread_id: &str,
        role: &str,
        content: &str,
    ) -> Result<ThreadMessage> {
        let request = CreateMessageRequest { role, content };
        self.post_json(
            "threads.messages.create",
            &format!("/threads/{thread_id}/messages"),
            &request,
            true,
        )
        .await
    }

    /// Start a run of an assistant against a thread. `instructions`
    /// override the assistant's standing instructions for this run only.
    pub async fn run_thread(
        &self,
        thread_id: &str,
        assistant_id: &str,
        instructions: Option<&str>,
    ) -> Result<Run> {
        let request = CreateRunRequest {
            assistant_id,
            instructions,
        };
        self.post_json(
            "threads.runs.create",
            &format!("/threads/{thread_id}/runs"),
            &request,
            true,
        )
        .await
    }

    /// Snapshot-read a run's current status. The remote service owns all
    /// transitions; callers poll this (or use [`Self::wait_for_run`]).
    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get_json(
            "threads.runs.retrieve",
            &format!("/threads/{thread_id}/runs/{run_id}"),
            true,
        )
        .await
    }

    /// Fetch the full message history of a thread, provider-native shape.
    pub async fn retrieve_thread_messages(
        &self,
        thread_id: &str,
    ) -> Result<ListObject<ThreadMessage>> {
        self.get_json(
            "threads.messages.list",
            &format!("/threads/{thread_id}/messages"),
            true,
        )
        .await
    }

    /// Pure local transform: content blocks of each message, in the order
    /// the provider returned them. Roles, ids, and timestamps are
    /// discarded. No network call.
    pub fn clean_thread_messages(messages: &ListObject<ThreadMessage>) -> Vec<Vec<MessageBlock>> {
        messages
            .data
            .iter()
            .map(|message| message.content.clone())
            .collect()
    }

    /// Flatten a run's execution steps into their detail payloads, one per
    /// step, in the order the provider returned them.
    pub async fn get_run_logs(&self, thread_id: &str, run_id: &str) -> Result<Vec<StepDetails>> {
        let steps: ListObject<RunStep> = self
            .get_json(
                "threads.runs.steps.list",
                &format!("/threads/{thread_id}/runs/{run_id}/steps"),
                true,
            )
            .await?;

        Ok(steps.data.into_iter().map(|step| step.step_details).collect())
    }

    /// Poll [`Self::retrieve_run`] at a fixed `interval` until the run
    /// reports a terminal status, up to `timeout` total.
    ///
    /// This is an opt-in convenience; callers wanting their own backoff or
    /// cancellation policy should poll `retrieve_run` directly.
    pub async fn wait_for_run(
        &self,
        thread_id: &str,
        run_id: &str,
        interval: Duration,
        timeout: Duration,
    ) -> Result<Run> {
        let started = Instant::now();
        loop {
            let run = self.retrieve_run(thread_id, run_id).await?;
            if run.status.is_terminal() {
                debug!(run_id, status = ?run.status, "run reached terminal status");
                return Ok(run);
            }
            if started.elapsed() + interval > timeout {
                return Err(Error::RunTimeout {
                    run_id: run_id.to_string(),
                    waited: started.elapsed(),
                });
            }
            tokio::time::sleep(interval).await;
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

//! The run operation: one hosted chat-completion round trip per request, with
//! stored history and memories folded into the prompt. The call's return shape
//! is not stable across streaming and non-streaming modes, so results are
//! modeled as a small tagged union and reduced with an ordered fallback.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AgentConfig;

const MEMORY_RECALL_LIMIT: i64 = 10;

/// One record in an agent call result. `content` wins over `text` when both
/// are set.
#[derive(Debug, Clone, Default)]
pub struct RunRecord {
    pub content: Option<String>,
    pub text: Option<String>,
    pub raw: Value,
}

#[derive(Debug, Clone)]
pub enum RunOutput {
    Record(RunRecord),
    Plain(String),
    Messages(Vec<RunRecord>),
    Other(Value),
}

/// Reduce a run result to its text, first match wins: content field, text
/// field, plain string, last entry of a non-empty messages sequence (same
/// rule applied to it), otherwise stringify the whole value.
pub fn normalize(output: &RunOutput) -> String {
    match output {
        RunOutput::Record(record) => normalize_record(record),
        RunOutput::Plain(text) => text.clone(),
        RunOutput::Messages(messages) => match messages.last() {
            Some(last) => normalize_record(last),
            None => stringify(&Value::Array(Vec::new())),
        },
        RunOutput::Other(value) => stringify(value),
    }
}

fn normalize_record(record: &RunRecord) -> String {
    if let Some(content) = &record.content {
        content.clone()
    } else if let Some(text) = &record.text {
        text.clone()
    } else {
        stringify(&record.raw)
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Seam between the HTTP service and the hosted agent call. The production
/// implementation talks to OpenRouter; tests substitute fakes.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn run(&self, agent: &AgentConfig, message: &str, stream: bool) -> Result<RunOutput>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

pub struct HostedRuntime {
    client: Client,
}

impl HostedRuntime {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HostedRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentRuntime for HostedRuntime {
    // The stream flag is accepted but the upstream call is always made
    // non-streaming; no incremental delivery exists in this service.
    async fn run(&self, agent: &AgentConfig, message: &str, _stream: bool) -> Result<RunOutput> {
        let api_key = agent
            .model
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("OPENROUTER_API_KEY is not configured"))?;

        if agent.debug_mode {
            tracing::debug!(
                "run: agent={} model={} markdown={}",
                agent.agent_id,
                agent.model.id,
                agent.markdown
            );
        }

        // The agent description leads the system message, same as the
        // instructions it introduces.
        let mut system = format!("{}\n\n{}", agent.description, agent.instructions);
        if agent.enable_agentic_memory
            && let Some(user_id) = &agent.user_id
        {
            let memories = agent
                .memory
                .recent_memories(user_id, MEMORY_RECALL_LIMIT)
                .await?;
            if !memories.is_empty() {
                system.push_str("\n\nMemories about this user:\n");
                for memory in &memories {
                    system.push_str(&format!("- {}\n", memory));
                }
            }
        }

        let mut history: Vec<(String, String)> = Vec::new();
        if let Some(session_id) = &agent.session_id {
            // One user row and one assistant row per prior exchange.
            history = agent
                .storage
                .recent_messages(session_id, agent.num_history_responses as i64 * 2)
                .await?;
        }

        let mut messages = vec![ChatMessage {
            role: "system",
            content: &system,
        }];
        for (role, content) in &history {
            messages.push(ChatMessage {
                role: role.as_str(),
                content: content.as_str(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: message,
        });

        let request = ChatRequest {
            model: &agent.model.id,
            messages,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", agent.model.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "OpenRouter API Error: {}",
                response.text().await.unwrap_or_default()
            ));
        }

        let parsed: ChatResponse = response.json().await?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if let Some(session_id) = &agent.session_id {
            agent.storage.append(session_id, "user", message).await?;
            agent.storage.append(session_id, "assistant", &reply).await?;
        }

        Ok(RunOutput::Record(RunRecord {
            content: Some(reply),
            text: None,
            raw: Value::Null,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_field_is_used_when_present() {
        let output = RunOutput::Record(RunRecord {
            content: Some("from content".to_string()),
            text: None,
            raw: Value::Null,
        });
        assert_eq!(normalize(&output), "from content");
    }

    #[test]
    fn text_field_is_used_when_content_is_absent() {
        let output = RunOutput::Record(RunRecord {
            content: None,
            text: Some("from text".to_string()),
            raw: Value::Null,
        });
        assert_eq!(normalize(&output), "from text");
    }

    #[test]
    fn content_wins_over_text() {
        let output = RunOutput::Record(RunRecord {
            content: Some("winner".to_string()),
            text: Some("loser".to_string()),
            raw: Value::Null,
        });
        assert_eq!(normalize(&output), "winner");
    }

    #[test]
    fn plain_strings_pass_through() {
        let output = RunOutput::Plain("already text".to_string());
        assert_eq!(normalize(&output), "already text");
    }

    #[test]
    fn last_message_content_is_surfaced() {
        let output = RunOutput::Messages(vec![
            RunRecord {
                content: Some("first".to_string()),
                text: None,
                raw: Value::Null,
            },
            RunRecord {
                content: Some("last".to_string()),
                text: None,
                raw: Value::Null,
            },
        ]);
        assert_eq!(normalize(&output), "last");
    }

    #[test]
    fn last_message_falls_back_to_text_then_stringify() {
        let output = RunOutput::Messages(vec![RunRecord {
            content: None,
            text: Some("tail text".to_string()),
            raw: Value::Null,
        }]);
        assert_eq!(normalize(&output), "tail text");

        let output = RunOutput::Messages(vec![RunRecord {
            content: None,
            text: None,
            raw: json!({"role": "assistant"}),
        }]);
        assert_eq!(normalize(&output), json!({"role": "assistant"}).to_string());
    }

    #[test]
    fn unknown_shapes_are_stringified() {
        let output = RunOutput::Other(json!({"odd": true}));
        assert_eq!(normalize(&output), "{\"odd\":true}");

        let output = RunOutput::Other(Value::String("bare".to_string()));
        assert_eq!(normalize(&output), "bare");
    }

    #[test]
    fn empty_messages_stringify_the_whole_result() {
        let output = RunOutput::Messages(Vec::new());
        assert_eq!(normalize(&output), "[]");
    }
}

//! Construction of the one configured agent: model reference, rendered system
//! instructions, persistence handles, and fixed behavior flags. Every call
//! builds a fresh [`AgentConfig`]; nothing here is cached or mutated.

pub mod actions;
pub mod runtime;

use anyhow::{Result, anyhow};
use chrono::Utc;

use crate::db::{self, MemoryStore, SessionStore};
use crate::settings::Settings;

pub const AGENT_NAME: &str = "Superwizard DOM Agent";
pub const AGENT_ID: &str = "superwizard_dom_agent";

const AGENT_DESCRIPTION: &str = "AI-powered browser automation agent that converts natural language to DOM actions. \
I help users automate web interactions through intelligent analysis of page content and user intentions.";

pub const MODEL_ID: &str = "google/gemini-2.0-flash-001";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

const NUM_HISTORY_RESPONSES: usize = 3;
const ENABLE_AGENTIC_MEMORY: bool = true;
const MARKDOWN: bool = true;
const ADD_DATETIME_TO_INSTRUCTIONS: bool = true;

const INSTRUCTIONS_TEMPLATE: &str = include_str!("instructions.md");
const ACTIONS_PLACEHOLDER: &str = "${formattedActions}";

/// Reference to the hosted chat model. Only one provider path exists.
#[derive(Debug, Clone)]
pub struct ModelRef {
    pub id: String,
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct AgentParams {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub debug_mode: bool,
}

/// A fully assembled agent descriptor, built per request and discarded when
/// the request completes. Conversation state outlives it in the external
/// store, keyed by session id.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub name: &'static str,
    pub agent_id: &'static str,
    pub description: &'static str,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub model: ModelRef,
    pub instructions: String,
    pub storage: SessionStore,
    pub memory: MemoryStore,
    pub num_history_responses: usize,
    pub enable_agentic_memory: bool,
    pub markdown: bool,
    pub debug_mode: bool,
}

pub fn superwizard_agent(settings: &Settings, params: AgentParams) -> Result<AgentConfig> {
    let db_url = db::build_db_url(settings);
    let storage = SessionStore::new(&db_url)?;
    let memory = MemoryStore::new(&db_url)?;

    let mut instructions =
        INSTRUCTIONS_TEMPLATE.replace(ACTIONS_PLACEHOLDER, &actions::render_actions());
    if MARKDOWN {
        instructions.push_str("\n\nUse markdown to format your answers.");
    }
    if ADD_DATETIME_TO_INSTRUCTIONS {
        instructions.push_str(&format!(
            "\n\nThe current datetime is {}.",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    Ok(AgentConfig {
        name: AGENT_NAME,
        agent_id: AGENT_ID,
        description: AGENT_DESCRIPTION,
        user_id: params.user_id,
        session_id: params.session_id,
        model: ModelRef {
            id: MODEL_ID.to_string(),
            api_key: settings.openrouter_api_key.clone(),
            base_url: OPENROUTER_BASE_URL.to_string(),
        },
        instructions,
        storage,
        memory,
        num_history_responses: NUM_HISTORY_RESPONSES,
        enable_agentic_memory: ENABLE_AGENTIC_MEMORY,
        markdown: MARKDOWN,
        debug_mode: params.debug_mode,
    })
}

/// Map an agent-type key to its factory. "superwizard" is the only recognized
/// key; anything else is an error naming the offending type.
pub fn select_agent(
    agent_type: &str,
    settings: &Settings,
    params: AgentParams,
) -> Result<AgentConfig> {
    match agent_type {
        "superwizard" => superwizard_agent(settings, params),
        other => Err(anyhow!("Unknown agent type: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn factory_renders_actions_into_instructions() {
        let agent = superwizard_agent(&test_settings(), AgentParams::default()).unwrap();
        assert!(!agent.instructions.contains(ACTIONS_PLACEHOLDER));
        assert!(agent.instructions.contains("click(elementId: number)"));
        assert!(agent.instructions.contains("The current datetime is"));
        assert!(agent.instructions.contains("Use markdown"));
    }

    #[test]
    fn factory_fixes_identity_and_behavior_flags() {
        let agent = superwizard_agent(&test_settings(), AgentParams::default()).unwrap();
        assert_eq!(agent.name, "Superwizard DOM Agent");
        assert_eq!(agent.agent_id, "superwizard_dom_agent");
        assert_eq!(agent.model.id, "google/gemini-2.0-flash-001");
        assert_eq!(agent.model.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(agent.num_history_responses, 3);
        assert!(agent.enable_agentic_memory);
        assert!(agent.markdown);
        assert_eq!(agent.storage.table(), "superwizard_sessions");
        assert_eq!(agent.memory.table(), "superwizard_memories");
    }

    #[test]
    fn factory_forwards_user_and_session_ids() {
        let agent = superwizard_agent(
            &test_settings(),
            AgentParams {
                user_id: Some("alice".to_string()),
                session_id: Some("session_alice_superwizard_dom_agent".to_string()),
                debug_mode: true,
            },
        )
        .unwrap();
        assert_eq!(agent.user_id.as_deref(), Some("alice"));
        assert_eq!(
            agent.session_id.as_deref(),
            Some("session_alice_superwizard_dom_agent")
        );
        assert!(agent.debug_mode);
    }

    #[test]
    fn selector_recognizes_only_superwizard() {
        assert!(select_agent("superwizard", &test_settings(), AgentParams::default()).is_ok());

        let err = select_agent("mystery_agent", &test_settings(), AgentParams::default())
            .unwrap_err();
        assert!(err.to_string().contains("Unknown agent type"));
        assert!(err.to_string().contains("mystery_agent"));
    }
}

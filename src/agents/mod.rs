//! Port to the external structured-completion capability.
//!
//! Callers must treat an empty result as "no information gained", never as a
//! hard failure: every stage with a deterministic fallback degrades to it,
//! and the rest proceed with empty artifacts.

pub mod mock;
pub mod openai;

pub use mock::MockPort;
pub use openai::OpenAiPort;

use crate::config::Settings;
use crate::prompts;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One structured-completion call.
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_content: String,
    pub temperature: f32,
}

pub trait CompletionPort {
    /// Returns the parsed structured result, or `None` when the provider
    /// failed or produced nothing usable.
    fn complete(&self, request: &CompletionRequest) -> Option<Value>;
}

/// Picks the port implied by the settings: canned fixtures in mock mode,
/// the live provider otherwise.
pub fn port_from_settings(settings: &Settings) -> Box<dyn CompletionPort> {
    if settings.mock_mode {
        Box::new(MockPort)
    } else {
        Box::new(OpenAiPort::new(&settings.api_key, &settings.model))
    }
}

/// First-turn intent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Move,
    MovePlan,
    Other,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Move => "move",
            Intent::MovePlan => "move_plan",
            Intent::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriageResult {
    pub intent: Intent,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub notes: String,
}

/// Classifies the first message of a session. A failed or empty completion
/// degrades to `other`, which the orchestrator turns into a redirect.
pub fn run_triage(port: &dyn CompletionPort, user_message: &str) -> TriageResult {
    let request = CompletionRequest {
        system_prompt: prompts::TRIAGE_PROMPT,
        user_content: user_message.to_string(),
        temperature: 0.1,
    };
    port.complete(&request)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(TriageResult {
            intent: Intent::Other,
            confidence: 0.0,
            sensitive: false,
            notes: "분류 실패".to_string(),
        })
}

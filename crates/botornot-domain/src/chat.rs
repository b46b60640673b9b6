//! Chat exchange with the remote reasoning agent

use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking
    User,
    /// The agent answering
    Assistant,
}

/// One message of the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: Role,

    /// Message body
    pub content: String,
}

impl ChatMessage {
    /// A message from the user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A message from the agent
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The agent's reply: the two raw strings the extraction core consumes, plus
/// an optional link to the hosted trace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentReply {
    /// Free-text answer
    #[serde(default)]
    pub answer: String,

    /// Link to the full interactive trace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_url: Option<String>,

    /// Newline-delimited execution log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_text: Option<String>,
}

impl AgentReply {
    /// Trace text, empty when the agent sent none
    pub fn trace(&self) -> &str {
        self.trace_text.as_deref().unwrap_or("")
    }
}

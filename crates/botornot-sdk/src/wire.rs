//! Request and response bodies of the agent's `/chat` endpoint.

use crate::error::SdkError;
use botornot_domain::{AgentReply, ChatMessage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Answer substituted when the agent returns none
pub const EMPTY_ANSWER: &str = "The agent did not provide a final answer. Check the trace.";

/// Chat request body
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// The new question
    pub message: &'a str,
    /// Prior turns, oldest first
    pub history: &'a [ChatMessage],
}

/// Chat response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Final answer text
    #[serde(default)]
    pub answer: Option<String>,
    /// Link to the hosted trace, or a bracketed placeholder
    #[serde(default)]
    pub trace_url: Option<String>,
    /// Plain-text execution trace
    #[serde(default)]
    pub trace_text: Option<String>,
}

impl ChatResponse {
    /// Normalize into an [`AgentReply`]
    ///
    /// A missing or blank answer becomes [`EMPTY_ANSWER`]. A `trace_url` that
    /// is not an http(s) URL (the backend sends `[... not available ...]`
    /// placeholders) is dropped, as is a blank `trace_text`.
    pub fn into_reply(self) -> AgentReply {
        let answer = self
            .answer
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| EMPTY_ANSWER.to_string());

        let trace_url = self
            .trace_url
            .map(|u| u.trim().to_string())
            .filter(|u| u.starts_with("http://") || u.starts_with("https://"));

        let trace_text = self.trace_text.filter(|t| !t.trim().is_empty());

        AgentReply {
            answer,
            trace_url,
            trace_text,
        }
    }
}

/// POST a chat request to `{base_url}/chat`
pub async fn post_chat(
    http_client: &reqwest::Client,
    base_url: &str,
    request: &ChatRequest<'_>,
) -> Result<AgentReply, SdkError> {
    let url = format!("{}/chat", base_url);
    debug!("POST {} ({} history messages)", url, request.history.len());

    let response = http_client.post(&url).json(request).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!("Chat request failed with HTTP {}", status.as_u16());
        return Err(SdkError::Backend(format!("Backend error HTTP {}", status.as_u16())));
    }

    let body = response.text().await?;
    let chat_response: ChatResponse = serde_json::from_str(&body)?;

    Ok(chat_response.into_reply())
}

//! BotOrNot client implementation.

use crate::error::SdkError;
use crate::wire::{post_chat, ChatRequest};
use botornot_domain::traits::AgentBackend;
use botornot_domain::{AgentReply, ChatMessage, ExpertRecord};
use botornot_extractor::{parse_experts_payload, ExpertPromptBuilder, ExpertQuery, ExtractorError};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// BotOrNot SDK client
#[derive(Debug, Clone)]
pub struct BotOrNotClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl BotOrNotClient {
    /// Default request timeout; agent runs with tool use are slow
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create a client for the agent backend at `base_url`
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SdkError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SdkError::Config(format!(
                "Backend URL must start with http:// or https://: {}",
                base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.to_string(),
            http_client,
        })
    }

    /// Backend base URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the agent a question
    pub async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<AgentReply, SdkError> {
        let request = ChatRequest { message, history };
        let reply = post_chat(&self.http_client, &self.base_url, &request).await?;
        info!(
            "Agent answered ({} chars, trace {})",
            reply.answer.len(),
            if reply.trace_text.is_some() { "present" } else { "absent" }
        );
        Ok(reply)
    }

    /// Ask the agent for experts matching `query`
    ///
    /// An answer that holds no parsable expert list yields an empty list. An
    /// `{"error": ...}` payload becomes [`SdkError::Backend`].
    pub async fn find_experts(&self, query: &ExpertQuery) -> Result<Vec<ExpertRecord>, SdkError> {
        query.validate().map_err(SdkError::InvalidRequest)?;

        let prompt = ExpertPromptBuilder::new(query).build();
        let reply = self.chat(&prompt, &[]).await?;

        match parse_experts_payload(&reply.answer) {
            Ok(experts) => {
                info!("Matched {} experts", experts.len());
                Ok(experts)
            }
            Err(ExtractorError::Upstream(message)) => Err(SdkError::Backend(message)),
            Err(e) => {
                warn!("Could not parse expert list from answer: {}", e);
                Ok(Vec::new())
            }
        }
    }
}

impl AgentBackend for BotOrNotClient {
    type Error = SdkError;

    fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> impl Future<Output = Result<AgentReply, SdkError>> + Send {
        BotOrNotClient::chat(self, message, history)
    }
}

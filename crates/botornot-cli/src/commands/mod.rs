//! Command implementations.

pub mod analyze;
pub mod ask;
pub mod experts;
pub mod profile;

pub use self::analyze::execute_analyze;
pub use self::ask::execute_ask;
pub use self::experts::execute_experts;
pub use self::profile::execute_profile;

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::{source_legend, Formatter};
use crate::view_state::ViewState;
use botornot_domain::AgentReply;
use botornot_extractor::{AnswerAnalysis, Extractor};
use botornot_sdk::BotOrNotClient;
use std::time::Duration;
use tracing::debug;

/// Build a client for the active profile; `backend` overrides its URL.
pub fn build_client(config: &Config, backend: Option<&str>) -> Result<BotOrNotClient> {
    let profile = config.get_active_profile()?;
    let url = backend.unwrap_or(&profile.backend_url);
    debug!("Using agent backend {}", url);
    Ok(BotOrNotClient::with_timeout(
        url,
        Duration::from_secs(profile.timeout_secs),
    )?)
}

/// Render an answer with its attribution and, unless quiet, the audit panel.
///
/// `highlight` is the 1-based position of a source in the answer's legend.
pub fn render_reply(
    reply: &AgentReply,
    analysis: &AnswerAnalysis,
    extractor: &Extractor,
    highlight: Option<usize>,
    formatter: &Formatter,
) -> Result<String> {
    let legend = source_legend(analysis);
    let mut view = ViewState::new();
    if let Some(n) = highlight {
        view.highlight_nth(&legend, n)?;
    }
    let audit = extractor.audit(reply.trace(), view.highlight());

    match formatter.format() {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "answer": reply.answer,
            "trace_url": reply.trace_url,
            "highlight": view.highlight(),
            "analysis": analysis,
            "audit": audit,
        }))?),
        OutputFormat::Quiet => formatter.format_answer(analysis, &legend, view.highlight()),
        OutputFormat::Table => {
            let answer = formatter.format_answer(analysis, &legend, view.highlight())?;
            let audit = formatter.format_audit(&audit, reply.trace_url.as_deref())?;
            Ok(format!("{}\n\n{}", answer, audit))
        }
    }
}

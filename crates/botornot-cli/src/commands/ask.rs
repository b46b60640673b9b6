//! Ask command implementation.

use super::render_reply;
use crate::cli::AskArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use botornot_extractor::Extractor;
use botornot_sdk::BotOrNotClient;
use tracing::info;

/// Execute the ask command.
pub async fn execute_ask(
    args: AskArgs,
    client: &BotOrNotClient,
    extractor: &Extractor,
    formatter: &Formatter,
) -> Result<()> {
    let question = args.question_text();
    let question = question.trim();
    if question.is_empty() {
        return Err(CliError::InvalidInput("Question is empty".to_string()));
    }

    info!("Asking {}", client.base_url());
    let reply = client.chat(question, &[]).await?;
    let analysis = extractor.analyze(&reply.answer, reply.trace());

    println!(
        "{}",
        render_reply(&reply, &analysis, extractor, args.highlight, formatter)?
    );
    Ok(())
}

//! Experts command implementation.

use crate::cli::ExpertsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::view_state::ViewState;
use botornot_domain::{ExpertRecord, Source};
use botornot_extractor::{ExpertQuery, Extractor};
use botornot_sdk::BotOrNotClient;

/// Execute the experts command.
pub async fn execute_experts(
    args: ExpertsArgs,
    client: &BotOrNotClient,
    extractor: &Extractor,
    formatter: &Formatter,
) -> Result<()> {
    let detail = args.detail;
    let query = query_from_args(args)?;

    let experts = client.find_experts(&query).await?;
    println!("{}", render_experts(&experts, detail, extractor, formatter)?);
    Ok(())
}

/// Build and validate the query described by `args`.
pub fn query_from_args(args: ExpertsArgs) -> Result<ExpertQuery> {
    let query = ExpertQuery {
        category: args.category,
        location: args.location,
        keywords: args.keywords,
        count: args.count,
    };
    query.validate().map_err(CliError::InvalidInput)?;
    Ok(query)
}

/// Render the expert panel, followed by the detail view of the `detail`-th
/// expert when one is requested.
pub fn render_experts(
    experts: &[ExpertRecord],
    detail: Option<usize>,
    extractor: &Extractor,
    formatter: &Formatter,
) -> Result<String> {
    let mut out = formatter.format_experts(experts)?;

    if let Some(n) = detail {
        let mut view = ViewState::new();
        view.toggle_expert(n, experts.len())?;
        if let Some(expert) = view.open_expert().and_then(|i| experts.get(i)) {
            // Fall back to the affiliation's site before a name search
            let link = match (&expert.website, &expert.affiliation) {
                (None, Some(affiliation)) => extractor
                    .website_for(affiliation)
                    .map(Source::new)
                    .unwrap_or_else(|| extractor.expert_link(expert)),
                _ => extractor.expert_link(expert),
            };
            out.push_str("\n\n");
            out.push_str(&formatter.format_expert_detail(expert, &link)?);
        }
    }

    Ok(out)
}

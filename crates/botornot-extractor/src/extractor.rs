//! Core Extractor implementation

use crate::attribution::{expert_link, SegmentAttributor};
use crate::audit::AuditRenderer;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::experts::{website_for, ExpertExtractor};
use crate::prompt::ExpertPromptBuilder;
use crate::sources::SourceExtractor;
use crate::types::{AnswerAnalysis, AuditView, ExpertQuery};
use botornot_domain::{AttributedSegment, ExpertRecord, Source};
use tracing::{debug, info};

/// The Extractor turns an agent answer and its trace into sources, experts
/// and attributed segments
///
/// Every method is a pure function of its arguments and the configuration.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor with a validated configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        debug!(
            "Extractor configured: {} known tools, {:?} segmentation",
            config.known_tools.len(),
            config.segment_policy
        );
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Evidence sources named in a trace; never empty
    pub fn extract_sources(&self, trace: &str) -> Vec<Source> {
        SourceExtractor::new(&self.config).extract(trace)
    }

    /// Experts listed in an answer
    pub fn extract_experts(&self, answer: &str) -> Vec<ExpertRecord> {
        ExpertExtractor::new(&self.config).extract(answer)
    }

    /// Segment an answer and assign every segment one source
    pub fn attribute(
        &self,
        answer: &str,
        sources: &[Source],
        experts: &[ExpertRecord],
    ) -> Vec<AttributedSegment> {
        SegmentAttributor::new(&self.config).attribute(answer, sources, experts)
    }

    /// Trace lines for the audit panel, marked against `highlight`
    pub fn audit(&self, trace: &str, highlight: Option<&Source>) -> AuditView {
        AuditRenderer::new(&self.config).render(trace, highlight)
    }

    /// Run the whole pipeline over one answer
    pub fn analyze(&self, answer: &str, trace: &str) -> AnswerAnalysis {
        self.analyze_with(answer, trace, None)
    }

    /// Run the pipeline, using `experts` instead of re-deriving them when a
    /// structured list is already available
    pub fn analyze_with(
        &self,
        answer: &str,
        trace: &str,
        experts: Option<Vec<ExpertRecord>>,
    ) -> AnswerAnalysis {
        let sources = self.extract_sources(trace);
        let experts = experts.unwrap_or_else(|| self.extract_experts(answer));
        let segments = self.attribute(answer, &sources, &experts);

        info!(
            "Analyzed answer: {} sources, {} experts, {} segments",
            sources.len(),
            experts.len(),
            segments.len()
        );

        AnswerAnalysis {
            sources,
            experts,
            segments,
        }
    }

    /// Expert-matching prompt for a validated query
    pub fn expert_prompt(&self, query: &ExpertQuery) -> Result<String, ExtractorError> {
        query.validate().map_err(ExtractorError::InvalidFormat)?;
        Ok(ExpertPromptBuilder::new(query).build())
    }

    /// Website for an affiliation, from the institution table or a search link
    pub fn website_for(&self, affiliation: &str) -> Option<String> {
        website_for(&self.config, affiliation)
    }

    /// Link used when a segment is attributed to `expert`
    pub fn expert_link(&self, expert: &ExpertRecord) -> Source {
        expert_link(&self.config, expert)
    }
}

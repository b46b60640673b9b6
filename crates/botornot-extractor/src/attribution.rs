//! Segment-to-source attribution
//!
//! Every segment is assigned exactly one source by the first rule in
//! [`RULES`] that produces one:
//!
//! 1. [`AttributionRule::ExpertMention`]: the segment names an expert
//! 2. [`AttributionRule::SourceRotation`]: `sources[index % sources.len()]`
//! 3. [`AttributionRule::ExpertRotation`]: `experts[index % experts.len()]`
//! 4. [`AttributionRule::StaticFallback`]: the audit-log label
//!
//! The last rule always matches, so the assignment is total. Assignments
//! depend only on the segment and the two lists.

use crate::config::ExtractorConfig;
use crate::grammar::search_terms;
use crate::segmentation::TextSegmenter;
use botornot_domain::{AttributedSegment, AttributionBasis, ExpertRecord, Segment, Source};
use tracing::debug;

/// A single attribution rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributionRule {
    /// Segment text contains an expert's name
    ExpertMention,
    /// Round robin over sources by segment index
    SourceRotation,
    /// Round robin over experts by segment index
    ExpertRotation,
    /// Fixed `Transparency Audit Log` label
    StaticFallback,
}

/// Rules in precedence order
pub const RULES: [AttributionRule; 4] = [
    AttributionRule::ExpertMention,
    AttributionRule::SourceRotation,
    AttributionRule::ExpertRotation,
    AttributionRule::StaticFallback,
];

impl AttributionRule {
    /// Basis recorded on segments this rule assigns
    pub fn basis(self) -> AttributionBasis {
        match self {
            AttributionRule::ExpertMention => AttributionBasis::ExpertMention,
            AttributionRule::SourceRotation => AttributionBasis::SourceRotation,
            AttributionRule::ExpertRotation => AttributionBasis::ExpertRotation,
            AttributionRule::StaticFallback => AttributionBasis::StaticFallback,
        }
    }

    /// Source this rule assigns to `segment`, if it applies
    pub fn apply(
        self,
        config: &ExtractorConfig,
        segment: &Segment,
        sources: &[Source],
        experts: &[ExpertRecord],
    ) -> Option<Source> {
        match self {
            AttributionRule::ExpertMention => experts
                .iter()
                .find(|e| !e.name.is_empty() && segment.text.contains(e.name.as_str()))
                .map(|e| expert_link(config, e)),
            AttributionRule::SourceRotation => {
                if sources.is_empty() {
                    None
                } else {
                    Some(sources[segment.index % sources.len()].clone())
                }
            }
            AttributionRule::ExpertRotation => {
                if experts.is_empty() {
                    None
                } else {
                    Some(expert_link(config, &experts[segment.index % experts.len()]))
                }
            }
            AttributionRule::StaticFallback => Some(Source::audit_log()),
        }
    }
}

/// The expert's website, or a profile search link built from the name
pub fn expert_link(config: &ExtractorConfig, expert: &ExpertRecord) -> Source {
    if let Some(website) = expert.website.as_deref().filter(|w| !w.trim().is_empty()) {
        return Source::new(website);
    }

    let terms = search_terms(&expert.name)
        .unwrap_or_else(|| expert.name.split_whitespace().collect::<Vec<_>>().join("+"));
    Source::new(format!("{}{}", config.search_url, terms))
}

/// Splits an answer and attributes each segment
pub struct SegmentAttributor<'a> {
    config: &'a ExtractorConfig,
    segmenter: TextSegmenter,
}

impl<'a> SegmentAttributor<'a> {
    /// Create an attributor using the configured segmentation policy
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self {
            config,
            segmenter: TextSegmenter::new(config.segment_policy),
        }
    }

    /// Segment `answer` and attribute every segment
    pub fn attribute(
        &self,
        answer: &str,
        sources: &[Source],
        experts: &[ExpertRecord],
    ) -> Vec<AttributedSegment> {
        let segments = self.segmenter.segment(answer);
        let attributed: Vec<AttributedSegment> = segments
            .iter()
            .map(|segment| self.assign(segment, sources, experts))
            .collect();

        debug!(
            "Attributed {} segments against {} sources and {} experts",
            attributed.len(),
            sources.len(),
            experts.len()
        );
        attributed
    }

    /// Attribute one already-split segment
    pub fn assign(
        &self,
        segment: &Segment,
        sources: &[Source],
        experts: &[ExpertRecord],
    ) -> AttributedSegment {
        let (source, basis) = RULES
            .iter()
            .find_map(|rule| {
                rule.apply(self.config, segment, sources, experts)
                    .map(|source| (source, rule.basis()))
            })
            .unwrap_or_else(|| (Source::audit_log(), AttributionBasis::StaticFallback));

        AttributedSegment {
            index: segment.index,
            text: segment.text.clone(),
            source,
            basis,
        }
    }
}

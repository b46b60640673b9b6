//! BotOrNot Extractor
//!
//! Turns the free text returned by a reasoning agent into structured data.
//!
//! # Overview
//!
//! The agent replies with two strings: an `answer` meant for the reader and a
//! `trace_text` describing the tools it used. The Extractor recovers:
//!
//! - **Sources**: URLs and research-tool names from the trace, never empty
//! - **Experts**: people listed as numbered items in the answer
//! - **Attributed segments**: every answer line (or sentence) paired with
//!   exactly one source
//! - **Audit view**: trace lines with boilerplate removed, marked against the
//!   source the reader is inspecting
//!
//! # Architecture
//!
//! ```text
//! trace  → SourceExtractor ─┐
//!                           ├→ SegmentAttributor → attributed segments
//! answer → ExpertExtractor ─┘
//! trace + highlight → AuditRenderer → audit view
//! ```
//!
//! All of it is synchronous and total: any input string, including the
//! empty one, produces a result.
//!
//! # Example Usage
//!
//! ```
//! use botornot_extractor::Extractor;
//!
//! let extractor = Extractor::default();
//! let answer = "1. Dr. Jane Smith\n- Professor at MIT\n- Works on battery chemistry";
//! let trace = "Fetched https://example.org/paper";
//!
//! let analysis = extractor.analyze(answer, trace);
//! assert_eq!(analysis.sources[0].as_str(), "https://example.org/paper");
//! assert_eq!(analysis.experts[0].website.as_deref(), Some("https://www.mit.edu"));
//! assert_eq!(analysis.segments.len(), 3);
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod grammar;
mod sources;
mod experts;
mod segmentation;
mod attribution;
mod audit;
mod prompt;
mod parser;
mod extractor;


pub use error::ExtractorError;
pub use config::{ExtractorConfig, InstitutionSite, SegmentPolicy};
pub use types::{AnswerAnalysis, AuditView, ExpertQuery, TraceLine, TraceSummary};
pub use sources::SourceExtractor;
pub use experts::{website_for, ExpertExtractor};
pub use segmentation::TextSegmenter;
pub use attribution::{expert_link, AttributionRule, SegmentAttributor, RULES};
pub use audit::AuditRenderer;
pub use prompt::ExpertPromptBuilder;
pub use parser::parse_experts_payload;
pub use extractor::Extractor;

use botornot_domain::{AttributedSegment, ExpertRecord, Source};

/// Sources named in `trace` under the default configuration
pub fn extract_sources(trace: &str) -> Vec<Source> {
    SourceExtractor::new(&ExtractorConfig::default()).extract(trace)
}

/// Experts listed in `answer` under the default configuration
pub fn extract_experts(answer: &str) -> Vec<ExpertRecord> {
    ExpertExtractor::new(&ExtractorConfig::default()).extract(answer)
}

/// Line-segment `answer` and attribute each segment
pub fn attribute(answer: &str, sources: &[Source], experts: &[ExpertRecord]) -> Vec<AttributedSegment> {
    SegmentAttributor::new(&ExtractorConfig::default()).attribute(answer, sources, experts)
}

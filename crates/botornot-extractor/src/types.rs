//! Request and result types for extraction

use botornot_domain::{AttributedSegment, ExpertRecord, Source};
use serde::{Deserialize, Serialize};

/// Filters for an expert-matching request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertQuery {
    /// Broad field, e.g. "Energy"
    pub category: String,

    /// Region filter; "Any" means unrestricted
    pub location: String,

    /// Free-text keywords describing the needed expertise
    pub keywords: String,

    /// Number of experts wanted
    pub count: u32,
}

impl ExpertQuery {
    /// Largest `count` accepted
    pub const MAX_COUNT: u32 = 20;

    /// Create a query with the given keywords and default filters
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..Self::default()
        }
    }

    /// Validate that the query can be sent
    pub fn validate(&self) -> Result<(), String> {
        if self.keywords.trim().is_empty() {
            return Err("keywords must not be empty".to_string());
        }
        if self.count == 0 || self.count > Self::MAX_COUNT {
            return Err(format!(
                "count must be between 1 and {}, got {}",
                Self::MAX_COUNT,
                self.count
            ));
        }
        Ok(())
    }
}

impl Default for ExpertQuery {
    fn default() -> Self {
        Self {
            category: "Energy".to_string(),
            location: "Any".to_string(),
            keywords: "battery cell technology".to_string(),
            count: 5,
        }
    }
}

/// One retained line of the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceLine {
    /// Trimmed line text
    pub text: String,

    /// Whether the line relates to the highlighted source
    pub relevant: bool,
}

/// Structured header recovered from a markup-annotated trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    /// Text of the first heading line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Value of the `Action:` field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Value of the `Tools:` field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,

    /// Value of the `Observation:` field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

impl TraceSummary {
    /// True when no field was recovered
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.action.is_none()
            && self.tools.is_none()
            && self.observation.is_none()
    }
}

/// Trace prepared for display against a highlight
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditView {
    /// Structured header, when the trace carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TraceSummary>,

    /// Lines surviving the boilerplate filter, in trace order
    pub lines: Vec<TraceLine>,
}

impl AuditView {
    /// Lines marked relevant to the highlight
    pub fn relevant_lines(&self) -> impl Iterator<Item = &TraceLine> {
        self.lines.iter().filter(|l| l.relevant)
    }
}

/// Everything derived from one agent answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerAnalysis {
    /// Evidence sources from the trace, never empty
    pub sources: Vec<Source>,

    /// Experts recovered from the answer
    pub experts: Vec<ExpertRecord>,

    /// Answer segments with their assigned source
    pub segments: Vec<AttributedSegment>,
}

impl AnswerAnalysis {
    /// Position of `source` in the source list
    pub fn source_index(&self, source: &Source) -> Option<usize> {
        self.sources.iter().position(|s| s == source)
    }

    /// Segments attributed to `source`
    pub fn segments_for<'a>(&'a self, source: &'a Source) -> impl Iterator<Item = &'a AttributedSegment> {
        self.segments.iter().filter(move |s| &s.source == source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_is_valid() {
        let query = ExpertQuery::default();
        assert!(query.validate().is_ok());
        assert_eq!(query.count, 5);
        assert_eq!(query.location, "Any");
    }

    #[test]
    fn test_query_count_bounds() {
        let mut query = ExpertQuery::new("solid-state electrolytes");
        query.count = 0;
        assert!(query.validate().is_err());
        query.count = 21;
        assert!(query.validate().is_err());
        query.count = 20;
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_query_blank_keywords() {
        let query = ExpertQuery::new("   ");
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_summary_is_empty() {
        let mut summary = TraceSummary::default();
        assert!(summary.is_empty());
        summary.tools = Some("Wikipedia".to_string());
        assert!(!summary.is_empty());
    }
}

//! Answer segments and their provenance attribution

use crate::Source;
use serde::{Deserialize, Serialize};

/// One displayed unit of answer text (a line or a sentence)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Position among the answer's segments, starting at 0
    pub index: usize,

    /// Trimmed segment text
    pub text: String,
}

impl Segment {
    /// Create a segment
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Which attribution rule assigned a segment its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionBasis {
    /// The segment names an expert
    ExpertMention,
    /// Positional round robin over the extracted sources
    SourceRotation,
    /// Positional round robin over the experts
    ExpertRotation,
    /// Nothing to attribute to; static audit-log label
    StaticFallback,
}

/// A segment paired with exactly one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedSegment {
    /// Position among the answer's segments
    pub index: usize,

    /// Segment text
    pub text: String,

    /// Assigned provenance
    pub source: Source,

    /// Rule that produced the assignment
    pub basis: AttributionBasis,
}

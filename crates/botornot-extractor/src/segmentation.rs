//! Answer segmentation policies

use crate::config::SegmentPolicy;
use crate::grammar::split_sentences;
use botornot_domain::Segment;

/// Splits answer text into display segments according to a policy
pub struct TextSegmenter {
    policy: SegmentPolicy,
}

impl TextSegmenter {
    /// Create a new text segmenter
    pub fn new(policy: SegmentPolicy) -> Self {
        Self { policy }
    }

    /// Segment the given text; indices are dense and start at 0
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let pieces = match self.policy {
            SegmentPolicy::Lines => self.segment_by_line(text),
            SegmentPolicy::Sentences => split_sentences(text),
        };

        pieces
            .into_iter()
            .enumerate()
            .map(|(index, piece)| Segment::new(index, piece))
            .collect()
    }

    /// Non-blank lines, trimmed
    fn segment_by_line<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

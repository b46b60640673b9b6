//! Trace lines prepared for the transparency audit panel

use crate::config::ExtractorConfig;
use crate::grammar::matches_gapped_phrase;
use crate::types::{AuditView, TraceLine, TraceSummary};
use botornot_domain::Source;

const ACTION_LABEL: &str = "Action";
const TOOLS_LABEL: &str = "Tools";
const OBSERVATION_LABEL: &str = "Observation";

/// Filters trace boilerplate and marks lines relevant to a highlight
pub struct AuditRenderer<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> AuditRenderer<'a> {
    /// Create a renderer over the given configuration
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Build the audit view of `trace` for the current highlight
    pub fn render(&self, trace: &str, highlight: Option<&Source>) -> AuditView {
        let lines = self
            .retained_lines(trace)
            .into_iter()
            .map(|line| TraceLine {
                text: line.to_string(),
                relevant: self.is_relevant(line, highlight),
            })
            .collect();

        AuditView {
            summary: self.summarize(trace),
            lines,
        }
    }

    /// Trimmed non-empty lines that are not boilerplate
    pub fn retained_lines<'t>(&self, trace: &'t str) -> Vec<&'t str> {
        trace
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| {
                !self
                    .config
                    .audit_denylist
                    .iter()
                    .any(|pattern| matches_gapped_phrase(line, pattern))
            })
            .collect()
    }

    /// Whether `line` relates to the highlighted source
    pub fn is_relevant(&self, line: &str, highlight: Option<&Source>) -> bool {
        let Some(highlight) = highlight else {
            return false;
        };

        let needle = highlight.as_str().to_lowercase();
        if !needle.is_empty() && line.to_lowercase().contains(&needle) {
            return true;
        }
        if highlight.is_url() && line.contains("URL") {
            return true;
        }
        if self
            .config
            .known_tools
            .iter()
            .any(|tool| highlight.as_str().contains(tool.as_str()) && line.contains(tool.as_str()))
        {
            return true;
        }
        self.config
            .structural_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }

    /// Heading and labeled fields; `None` when the trace has none of them
    pub fn summarize(&self, trace: &str) -> Option<TraceSummary> {
        let mut summary = TraceSummary::default();

        for line in trace.lines().map(str::trim) {
            if summary.title.is_none() && line.starts_with('#') {
                let title = line.trim_start_matches('#').trim();
                if !title.is_empty() {
                    summary.title = Some(title.to_string());
                }
                continue;
            }

            let line = line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
                .unwrap_or(line);
            if summary.action.is_none() {
                summary.action = field_value(line, ACTION_LABEL);
            }
            if summary.tools.is_none() {
                summary.tools = field_value(line, TOOLS_LABEL);
            }
            if summary.observation.is_none() {
                summary.observation = field_value(line, OBSERVATION_LABEL);
            }
        }

        if summary.is_empty() {
            None
        } else {
            Some(summary)
        }
    }
}

/// Value of `**Label:**`, `**Label**:` or `Label:` at the start of a line
fn field_value(line: &str, label: &str) -> Option<String> {
    let forms = [
        format!("**{}:**", label),
        format!("**{}**:", label),
        format!("{}:", label),
    ];

    forms
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix.as_str()))
        .map(|value| value.replace("**", "").trim().to_string())
        .filter(|value| !value.is_empty())
}

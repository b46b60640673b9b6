//! Evidence sources named in an agent trace

use crate::config::ExtractorConfig;
use crate::grammar::scan_urls;
use botornot_domain::Source;
use tracing::debug;

/// Scans trace text for URLs and known research-tool names
pub struct SourceExtractor<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> SourceExtractor<'a> {
    /// Create an extractor over the given configuration
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Ordered, de-duplicated sources; never empty
    ///
    /// URLs come first in the order they appear, then one `Source: <Tool>`
    /// entry per known tool the trace mentions. With neither, the result is
    /// the single internal-knowledge fallback.
    pub fn extract(&self, trace: &str) -> Vec<Source> {
        let mut sources: Vec<Source> = Vec::new();

        for url in scan_urls(trace) {
            let source = Source::new(url);
            if !sources.contains(&source) {
                sources.push(source);
            }
        }

        for tool in &self.config.known_tools {
            let source = Source::tool(tool);
            if trace.contains(tool.as_str()) && !sources.contains(&source) {
                sources.push(source);
            }
        }

        if sources.is_empty() {
            debug!("No URL or known tool in trace, using fallback source");
            sources.push(Source::new(self.config.fallback_source.clone()));
        } else {
            debug!("Extracted {} sources from trace", sources.len());
        }

        sources
    }
}

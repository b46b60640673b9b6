//! Provenance sources attributable to displayed text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of a synthetic named-tool source (`"Source: Wikipedia"`)
pub const TOOL_SOURCE_PREFIX: &str = "Source: ";

/// Label used when a trace names no URL and no known tool
pub const INTERNAL_KNOWLEDGE: &str = "Internal knowledge (no external source)";

/// Label assigned to a segment when neither sources nor experts exist
pub const AUDIT_LOG: &str = "Transparency Audit Log";

/// A provenance reference: a URL, a named-tool label, or one of the fallback
/// labels.
///
/// Consumers treat sources as opaque strings. The helpers below only classify
/// them for rendering and relevance marking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(String);

/// Broad classification of a [`Source`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `http://` or `https://` reference
    Url,
    /// `"Source: <Tool>"` label
    Tool,
    /// The internal-knowledge fallback
    InternalKnowledge,
    /// The static audit-log fallback
    AuditLog,
    /// Anything else (e.g. a custom fallback label)
    Other,
}

impl Source {
    /// Wrap an arbitrary provenance string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Synthetic source for a named research tool
    ///
    /// # Examples
    ///
    /// ```
    /// use botornot_domain::Source;
    ///
    /// let source = Source::tool("Wikipedia");
    /// assert_eq!(source.as_str(), "Source: Wikipedia");
    /// assert_eq!(source.tool_name(), Some("Wikipedia"));
    /// ```
    pub fn tool(name: &str) -> Self {
        Self(format!("{TOOL_SOURCE_PREFIX}{name}"))
    }

    /// The "no external source" fallback
    pub fn internal_knowledge() -> Self {
        Self(INTERNAL_KNOWLEDGE.to_string())
    }

    /// The static "Transparency Audit Log" fallback
    pub fn audit_log() -> Self {
        Self(AUDIT_LOG.to_string())
    }

    /// Borrow the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether this source is a web URL
    pub fn is_url(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// Tool name of a `"Source: <Tool>"` entry
    pub fn tool_name(&self) -> Option<&str> {
        self.0
            .strip_prefix(TOOL_SOURCE_PREFIX)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Classify this source
    pub fn kind(&self) -> SourceKind {
        if self.is_url() {
            SourceKind::Url
        } else if self.tool_name().is_some() {
            SourceKind::Tool
        } else if self.0 == INTERNAL_KNOWLEDGE {
            SourceKind::InternalKnowledge
        } else if self.0 == AUDIT_LOG {
            SourceKind::AuditLog
        } else {
            SourceKind::Other
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Source {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kinds() {
        assert_eq!(Source::new("https://example.org/paper").kind(), SourceKind::Url);
        assert_eq!(Source::new("http://example.org").kind(), SourceKind::Url);
        assert_eq!(Source::tool("arXiv").kind(), SourceKind::Tool);
        assert_eq!(Source::internal_knowledge().kind(), SourceKind::InternalKnowledge);
        assert_eq!(Source::audit_log().kind(), SourceKind::AuditLog);
        assert_eq!(Source::new("ftp://example.org").kind(), SourceKind::Other);
    }

    #[test]
    fn test_tool_name_requires_label() {
        assert_eq!(Source::new("Source: ").tool_name(), None);
        assert_eq!(Source::new("Source: PubMed").tool_name(), Some("PubMed"));
        assert_eq!(Source::new("PubMed").tool_name(), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Source::tool("Wikipedia")).unwrap();
        assert_eq!(json, "\"Source: Wikipedia\"");

        let back: Source = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Source::tool("Wikipedia"));
    }
}

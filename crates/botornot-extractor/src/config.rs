//! Configuration for the Extractor

use crate::error::ExtractorError;
use botornot_domain::source::INTERNAL_KNOWLEDGE;
use serde::{Deserialize, Serialize};

/// How an answer is split into display segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentPolicy {
    /// One segment per non-blank line (bullet-heavy answers)
    #[default]
    Lines,
    /// One segment per sentence (prose answers)
    Sentences,
}

/// A known institution: a name fragment and its canonical website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionSite {
    /// Whole-word fragment matched case-insensitively against an affiliation
    pub fragment: String,

    /// Canonical URL
    pub url: String,
}

impl InstitutionSite {
    fn new(fragment: &str, url: &str) -> Self {
        Self {
            fragment: fragment.to_string(),
            url: url.to_string(),
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Research tools whose names in a trace become `"Source: <Tool>"`
    pub known_tools: Vec<String>,

    /// Source emitted when a trace names no URL and no known tool
    pub fallback_source: String,

    /// Non-blank lines scanned after a numbered expert item
    pub expert_lookahead_lines: usize,

    /// Words marking a bullet line as the expert's role
    pub role_keywords: Vec<String>,

    /// Words marking a bullet line as the expert's institution
    pub institution_keywords: Vec<String>,

    /// Base of synthesized search links; query terms are appended
    pub search_url: String,

    /// Answer segmentation policy
    pub segment_policy: SegmentPolicy,

    /// Boilerplate trace lines hidden from the audit view; `...` matches any gap
    pub audit_denylist: Vec<String>,

    /// Markers that make a trace line relevant to every highlight
    pub structural_markers: Vec<String>,

    /// Institution fragment → website table, checked in order
    pub institution_sites: Vec<InstitutionSite>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.expert_lookahead_lines == 0 {
            return Err("expert_lookahead_lines must be greater than 0".to_string());
        }
        if self.fallback_source.trim().is_empty() {
            return Err("fallback_source must not be empty".to_string());
        }
        if !self.search_url.starts_with("http://") && !self.search_url.starts_with("https://") {
            return Err(format!("search_url must be an http(s) URL: {}", self.search_url));
        }
        if self.known_tools.iter().any(|t| t.trim().is_empty()) {
            return Err("known_tools must not contain empty names".to_string());
        }
        if self.role_keywords.iter().any(|k| k.trim().is_empty())
            || self.institution_keywords.iter().any(|k| k.trim().is_empty())
        {
            return Err("keyword lists must not contain empty entries".to_string());
        }
        if self
            .audit_denylist
            .iter()
            .any(|p| p.split("...").all(|part| part.trim().is_empty()))
        {
            return Err("audit_denylist entries must contain text".to_string());
        }
        for site in &self.institution_sites {
            if site.fragment.trim().is_empty() {
                return Err("institution_sites fragment must not be empty".to_string());
            }
            if !site.url.starts_with("http://") && !site.url.starts_with("https://") {
                return Err(format!("institution_sites url must be http(s): {}", site.url));
            }
        }
        Ok(())
    }

    /// Prose preset: sentence segmentation, everything else default
    pub fn sentences() -> Self {
        Self {
            segment_policy: SegmentPolicy::Sentences,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate().map_err(ExtractorError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            known_tools: strings(&["Valyu Search", "Wikipedia", "arXiv", "PubMed"]),
            fallback_source: INTERNAL_KNOWLEDGE.to_string(),
            expert_lookahead_lines: 4,
            role_keywords: strings(&[
                "professor",
                "director",
                "founder",
                "co-founder",
                "cofounder",
                "inventor",
            ]),
            institution_keywords: strings(&[
                "university",
                "institute",
                "lab",
                "laboratory",
                "company",
            ]),
            search_url: "https://www.google.com/search?q=".to_string(),
            segment_policy: SegmentPolicy::Lines,
            audit_denylist: strings(&[
                "no external tools required",
                "internal knowledge base",
                "simple ... audit",
            ]),
            structural_markers: strings(&["Action", "Tools", "Observation"]),
            institution_sites: vec![
                InstitutionSite::new("massachusetts institute of technology", "https://www.mit.edu"),
                InstitutionSite::new("mit", "https://www.mit.edu"),
                InstitutionSite::new("stanford", "https://www.stanford.edu"),
                InstitutionSite::new("harvard", "https://www.harvard.edu"),
                InstitutionSite::new("caltech", "https://www.caltech.edu"),
                InstitutionSite::new("berkeley", "https://www.berkeley.edu"),
                InstitutionSite::new("oxford", "https://www.ox.ac.uk"),
                InstitutionSite::new("cambridge", "https://www.cam.ac.uk"),
                InstitutionSite::new("imperial college", "https://www.imperial.ac.uk"),
                InstitutionSite::new("university college london", "https://www.ucl.ac.uk"),
                InstitutionSite::new("ucl", "https://www.ucl.ac.uk"),
                InstitutionSite::new("eth zurich", "https://ethz.ch"),
            ],
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.known_tools.len(), 4);
        assert_eq!(config.segment_policy, SegmentPolicy::Lines);
    }

    #[test]
    fn test_sentences_preset_is_valid() {
        let config = ExtractorConfig::sentences();
        assert!(config.validate().is_ok());
        assert_eq!(config.segment_policy, SegmentPolicy::Sentences);
    }

    #[test]
    fn test_invalid_lookahead() {
        let mut config = ExtractorConfig::default();
        config.expert_lookahead_lines = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_search_url() {
        let mut config = ExtractorConfig::default();
        config.search_url = "www.example.com/?q=".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gap_only_denylist_entry_rejected() {
        let mut config = ExtractorConfig::default();
        config.audit_denylist.push(" ... ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExtractorConfig::from_toml(
            r#"
            known_tools = ["Semantic Scholar"]
            segment_policy = "sentences"
            "#,
        )
        .unwrap();

        assert_eq!(config.known_tools, vec!["Semantic Scholar".to_string()]);
        assert_eq!(config.segment_policy, SegmentPolicy::Sentences);
        assert_eq!(config.expert_lookahead_lines, 4);
        assert!(!config.institution_sites.is_empty());
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let result = ExtractorConfig::from_toml("expert_lookahead_lines = 0");
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}

//! Expert records recovered from numbered lists in an answer
//!
//! An expert listing looks like:
//!
//! ```text
//! 1. Dr. Jane Smith
//!    - Professor at MIT
//!    - Works on battery chemistry
//! 2. **Prof. Ravi Patel** - Director, Energy Storage Lab
//! ```
//!
//! Each numbered item whose head is a plausible personal name starts a
//! record. The bullet lines that follow fill in title, affiliation and
//! summary until the lookahead window runs out or the next numbered item
//! begins.

use crate::config::ExtractorConfig;
use crate::grammar::{
    at_clause, bullet_content, contains_keyword, contains_phrase, parse_numbered_item,
    search_terms, strip_bold, strip_list_marker,
};
use botornot_domain::ExpertRecord;
use tracing::debug;

/// Words that show a numbered heading is a topic, not a person
const GENERIC_WORDS: &[&str] = &[
    "the", "and", "of", "for", "key", "top", "research", "summary", "overview",
    "conclusion", "introduction", "step", "steps", "university", "institute",
    "laboratory", "lab", "company", "center", "centre", "department", "school",
    "college", "technology", "technologies", "energy", "battery", "batteries",
    "science", "sciences", "engineering", "systems", "solutions", "inc", "corp",
    "ltd", "group", "national", "international", "global",
];

const MAX_NAME_TOKENS: usize = 4;
const MAX_TOKEN_CHARS: usize = 24;

/// Recovers expert records from free-form answer text
pub struct ExpertExtractor<'a> {
    config: &'a ExtractorConfig,
    role_keywords: Vec<String>,
    institution_keywords: Vec<String>,
}

impl<'a> ExpertExtractor<'a> {
    /// Create an extractor over the given configuration
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self {
            config,
            role_keywords: lowercase(&config.role_keywords),
            institution_keywords: lowercase(&config.institution_keywords),
        }
    }

    /// One record per accepted numbered item, in answer order
    ///
    /// Items whose head fails the name check are skipped. A name listed
    /// twice yields one record built from its first listing.
    pub fn extract(&self, answer: &str) -> Vec<ExpertRecord> {
        let lines: Vec<&str> = answer.lines().collect();
        let mut experts: Vec<ExpertRecord> = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let Some(head) = parse_numbered_item(line, &self.role_keywords) else {
                continue;
            };

            let name = head.name();
            if let Err(reason) = self.check_name(&head.tokens) {
                debug!("Skipping numbered item '{}': {}", name, reason);
                continue;
            }
            if experts.iter().any(|e| e.name == name) {
                debug!("Skipping repeated expert '{}'", name);
                continue;
            }

            let mut draft = Draft::new(name);
            if head.tail.chars().any(char::is_alphabetic) {
                self.absorb_bullet(&mut draft, &strip_bold(head.tail));
            }
            self.scan_details(&mut draft, &lines[idx + 1..]);

            experts.push(draft.finish(self.config));
        }

        debug!("Extracted {} experts from answer", experts.len());
        experts
    }

    /// Stricter name-shape check applied after the item grammar matched
    fn check_name(&self, tokens: &[&str]) -> Result<(), String> {
        if tokens.len() > MAX_NAME_TOKENS {
            return Err(format!("{} name tokens", tokens.len()));
        }

        for token in tokens {
            if token.chars().count() > MAX_TOKEN_CHARS {
                return Err(format!("token '{}' too long", token));
            }
            let lower = token.to_lowercase();
            if GENERIC_WORDS.contains(&lower.as_str()) {
                return Err(format!("generic word '{}'", token));
            }
            if contains_keyword(token, &self.institution_keywords) {
                return Err(format!("institution word '{}'", token));
            }
        }
        Ok(())
    }

    fn scan_details(&self, draft: &mut Draft, following: &[&str]) {
        let mut scanned = 0;

        for line in following {
            if line.trim().is_empty() {
                continue;
            }
            if strip_list_marker(line).is_some() || scanned == self.config.expert_lookahead_lines {
                break;
            }
            scanned += 1;

            match bullet_content(line) {
                Some(content) => self.absorb_bullet(draft, &content),
                None => draft.push_summary(&strip_bold(line)),
            }
        }
    }

    /// Classify one bullet: explicit label, then role, then institution,
    /// otherwise summary text.
    fn absorb_bullet(&self, draft: &mut Draft, content: &str) {
        if content.is_empty() || draft.absorb_labeled(content) {
            return;
        }

        if contains_keyword(content, &self.role_keywords) {
            draft.title.get_or_insert_with(|| content.to_string());
            if let Some(place) = at_clause(content) {
                draft.affiliation.get_or_insert_with(|| place.to_string());
            }
        } else if contains_keyword(content, &self.institution_keywords) {
            draft.affiliation.get_or_insert_with(|| content.to_string());
        } else {
            draft.push_summary(content);
        }
    }
}

/// Website for an affiliation: the institution table first, else a search
/// link built from the affiliation's letters.
pub fn website_for(config: &ExtractorConfig, affiliation: &str) -> Option<String> {
    config
        .institution_sites
        .iter()
        .find(|site| contains_phrase(affiliation, &site.fragment))
        .map(|site| site.url.clone())
        .or_else(|| search_terms(affiliation).map(|terms| format!("{}{}", config.search_url, terms)))
}

fn lowercase(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.trim().to_lowercase()).collect()
}

/// Record under construction
struct Draft {
    name: String,
    title: Option<String>,
    affiliation: Option<String>,
    location: Option<String>,
    summary: Vec<String>,
    areas: Vec<String>,
    website: Option<String>,
    email: Option<String>,
}

impl Draft {
    fn new(name: String) -> Self {
        Self {
            name,
            title: None,
            affiliation: None,
            location: None,
            summary: Vec::new(),
            areas: Vec::new(),
            website: None,
            email: None,
        }
    }

    fn push_summary(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.summary.push(text.to_string());
        }
    }

    /// `Label: value` bullets with a recognised label
    fn absorb_labeled(&mut self, content: &str) -> bool {
        let Some((label, value)) = content.split_once(':') else {
            return false;
        };
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        match label.trim().to_lowercase().as_str() {
            "title" | "role" | "position" => {
                self.title.get_or_insert_with(|| value.to_string());
            }
            "affiliation" | "institution" | "organization" | "organisation" => {
                self.affiliation.get_or_insert_with(|| value.to_string());
            }
            "location" => {
                self.location.get_or_insert_with(|| value.to_string());
            }
            "areas" | "expertise" => {
                self.areas.extend(
                    value
                        .split(|c: char| c == ',' || c == ';')
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(str::to_string),
                );
            }
            "email" if value.contains('@') => {
                self.email.get_or_insert_with(|| value.to_string());
            }
            "website" | "url" if value.starts_with("http") => {
                self.website.get_or_insert_with(|| value.to_string());
            }
            "summary" | "bio" => self.push_summary(value),
            _ => return false,
        }
        true
    }

    fn finish(self, config: &ExtractorConfig) -> ExpertRecord {
        let website = self.website.or_else(|| {
            self.affiliation
                .as_deref()
                .and_then(|affiliation| website_for(config, affiliation))
        });

        ExpertRecord {
            name: self.name,
            title: self.title,
            affiliation: self.affiliation,
            location: self.location,
            summary: Some(self.summary.join(" ")),
            areas: Some(self.areas),
            website,
            email: self.email,
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(answer: &str) -> Vec<ExpertRecord> {
        let config = ExtractorConfig::default();
        ExpertExtractor::new(&config).extract(answer)
    }

    #[test]
    fn test_role_bullet_sets_title_and_affiliation() {
        let experts = extract("1. Dr. Jane Smith\n- Professor at MIT\n- Works on battery chemistry");
        assert_eq!(experts.len(), 1);

        let jane = &experts[0];
        assert_eq!(jane.name, "Jane Smith");
        assert_eq!(jane.title.as_deref(), Some("Professor at MIT"));
        assert_eq!(jane.affiliation.as_deref(), Some("MIT"));
        assert_eq!(jane.website.as_deref(), Some("https://www.mit.edu"));
        assert_eq!(jane.summary.as_deref(), Some("Works on battery chemistry"));
        assert!(jane.location.is_none());
        assert!(jane.areas.is_none());
    }

    #[test]
    fn test_institution_bullet_sets_affiliation() {
        let experts = extract("1. Alan Turing\n   * Fellow, Acme Research Institute\n");
        assert_eq!(experts[0].affiliation.as_deref(), Some("Fellow, Acme Research Institute"));
        assert_eq!(
            experts[0].website.as_deref(),
            Some("https://www.google.com/search?q=Fellow+Acme+Research+Institute")
        );
        assert!(experts[0].title.is_none());
    }

    #[test]
    fn test_plural_institution_bullet_sets_affiliation() {
        let experts = extract("1. Jane Smith\n- Staff scientist, Sandia National Laboratories");
        assert_eq!(
            experts[0].affiliation.as_deref(),
            Some("Staff scientist, Sandia National Laboratories")
        );
        assert_eq!(
            experts[0].website.as_deref(),
            Some("https://www.google.com/search?q=Staff+scientist+Sandia+National+Laboratories")
        );
        assert!(experts[0].summary.is_none());

        let experts = extract("1. Jane Smith\n- Engineer, Acme Companies");
        assert_eq!(experts[0].affiliation.as_deref(), Some("Engineer, Acme Companies"));
    }

    #[test]
    fn test_first_role_wins() {
        let answer = "1. Grace Hopper\n- Director at Navy Lab\n- Founder of COBOL group at Remington";
        let experts = extract(answer);
        assert_eq!(experts[0].title.as_deref(), Some("Director at Navy Lab"));
        assert_eq!(experts[0].affiliation.as_deref(), Some("Navy Lab"));
        assert!(experts[0].summary.is_none());
    }

    #[test]
    fn test_inline_tail_is_parsed() {
        let experts = extract("2. **Prof. Ravi Patel** - Director, Stanford Energy Lab");
        assert_eq!(experts[0].name, "Ravi Patel");
        assert_eq!(experts[0].title.as_deref(), Some("Director, Stanford Energy Lab"));
        assert!(experts[0].affiliation.is_none());
        assert!(experts[0].website.is_none());
    }

    #[test]
    fn test_labeled_bullets() {
        let answer = "1. Maria Garcia\n\
                      - **Location:** Madrid, Spain\n\
                      - Expertise: solid-state electrolytes; recycling\n\
                      - Email: maria@example.org\n\
                      - Website: https://garcia.example.org";
        let experts = extract(answer);
        let maria = &experts[0];
        assert_eq!(maria.location.as_deref(), Some("Madrid, Spain"));
        assert_eq!(
            maria.areas,
            Some(vec!["solid-state electrolytes".to_string(), "recycling".to_string()])
        );
        assert_eq!(maria.email.as_deref(), Some("maria@example.org"));
        assert_eq!(maria.website.as_deref(), Some("https://garcia.example.org"));
    }

    #[test]
    fn test_next_item_stops_scan() {
        let answer = "1. Jane Smith\n- Professor at MIT\n2. John Doe\n- Founder at Acme Company";
        let experts = extract(answer);
        assert_eq!(experts.len(), 2);
        assert_eq!(experts[0].affiliation.as_deref(), Some("MIT"));
        assert_eq!(experts[1].name, "John Doe");
        assert_eq!(experts[1].affiliation.as_deref(), Some("Acme Company"));
    }

    #[test]
    fn test_lookahead_window() {
        let answer = "1. Jane Smith\n- one\n\n- two\n- three\n- four\n- Professor at MIT";
        let experts = extract(answer);
        assert_eq!(experts[0].summary.as_deref(), Some("one two three four"));
        assert!(experts[0].title.is_none());
    }

    #[test]
    fn test_plain_lines_continue_summary() {
        let experts = extract("1. Jane Smith\nLeads the **grid storage** program.\n- Holds 12 patents");
        assert_eq!(
            experts[0].summary.as_deref(),
            Some("Leads the grid storage program. Holds 12 patents")
        );
    }

    #[test]
    fn test_topic_lists_rejected() {
        let answer = "1. Key Findings\n2. Battery Chemistry Overview\n3. Stanford University\n4. Next Steps";
        assert!(extract(answer).is_empty());
    }

    #[test]
    fn test_long_heading_rejected() {
        assert!(extract("1. Alpha Beta Gamma Delta Epsilon").is_empty());
    }

    #[test]
    fn test_repeated_name_kept_once() {
        let answer = "1. Jane Smith\n- Professor at MIT\n2. Jane Smith\n- Director at Caltech";
        let experts = extract(answer);
        assert_eq!(experts.len(), 1);
        assert_eq!(experts[0].affiliation.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_no_numbered_items() {
        assert!(extract("").is_empty());
        assert!(extract("Jane Smith is a Professor at MIT.").is_empty());
    }

    #[test]
    fn test_website_for_table_and_search() {
        let config = ExtractorConfig::default();
        assert_eq!(website_for(&config, "Oxford").as_deref(), Some("https://www.ox.ac.uk"));
        assert_eq!(
            website_for(&config, "Massachusetts Institute of Technology").as_deref(),
            Some("https://www.mit.edu")
        );
        assert_eq!(
            website_for(&config, "Summit Labs").as_deref(),
            Some("https://www.google.com/search?q=Summit+Labs")
        );
        assert_eq!(website_for(&config, "42"), None);
    }
}

//! Prompt for expert matching over the chat endpoint

use crate::types::ExpertQuery;

/// Builds the expert-matching prompt sent as a chat message
pub struct ExpertPromptBuilder<'a> {
    query: &'a ExpertQuery,
}

impl<'a> ExpertPromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(query: &'a ExpertQuery) -> Self {
        Self { query }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(MATCHING_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("- Category/industry: {}\n", self.query.category.trim()));
        prompt.push_str(&format!("- Location filter: {}\n", self.location()));
        prompt.push_str(&format!("- Keywords: {}\n", self.query.keywords.trim()));
        prompt.push_str(&format!("- Count: {}\n\n", self.query.count));

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    fn location(&self) -> &str {
        let location = self.query.location.trim();
        if location.is_empty() {
            "Any"
        } else {
            location
        }
    }
}

const MATCHING_INSTRUCTIONS: &str =
    "You are an expert-matching assistant. Based on the following filters:";

const OUTPUT_FORMAT_REMINDER: &str = r#"Return ONLY valid JSON array named "experts" with objects containing:
name, title, affiliation, location, email, website, areas (array of strings), summary.
Example:
{"experts":[{"name":"...", "title":"...", "affiliation":"...", "location":"...", "email":"", "website":"", "areas":["a","b"], "summary":"..."}]}
No commentary outside JSON."#;

//! Parse structured expert payloads returned by the agent

use crate::error::ExtractorError;
use botornot_domain::ExpertRecord;
use serde_json::Value;
use tracing::warn;

/// Parse an `{"experts": [...]}` payload into expert records
///
/// The payload may be the whole text, a fenced ```` ```json ```` block, or
/// the first `{...}` block inside prose. Records without a name are skipped.
/// An `{"error": ...}` payload becomes [`ExtractorError::Upstream`].
pub fn parse_experts_payload(response: &str) -> Result<Vec<ExpertRecord>, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    if let Some(error) = obj.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(ExtractorError::Upstream(message));
    }

    let experts_array = obj
        .get("experts")
        .and_then(Value::as_array)
        .ok_or_else(|| ExtractorError::InvalidFormat("Missing 'experts' array".to_string()))?;

    let mut experts = Vec::new();
    for (idx, expert_json) in experts_array.iter().enumerate() {
        match serde_json::from_value::<ExpertRecord>(expert_json.clone()) {
            Ok(expert) => {
                let expert = expert.normalized();
                if let Err(e) = expert.validate() {
                    warn!("Expert {} failed validation: {}", idx, e);
                    continue;
                }
                experts.push(expert);
            }
            Err(e) => {
                warn!("Failed to parse expert {}: {}", idx, e);
            }
        }
    }

    Ok(experts)
}

/// Locate the JSON object in a response
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    if let Some(fenced) = fenced_block(trimmed) {
        return Ok(fenced);
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&trimmed[start..=end]),
        _ => Err(ExtractorError::InvalidFormat(
            "No JSON object in response".to_string(),
        )),
    }
}

/// Body of the first ```` ``` ```` fence, language tag skipped
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let response = r#"{
            "experts": [
                {
                    "name": "Jane Smith",
                    "title": "Professor",
                    "affiliation": "MIT",
                    "location": "Cambridge, MA",
                    "areas": ["battery chemistry", "electrolytes"],
                    "email": "",
                    "website": "https://www.mit.edu"
                }
            ]
        }"#;

        let experts = parse_experts_payload(response).unwrap();
        assert_eq!(experts.len(), 1);
        assert_eq!(experts[0].name, "Jane Smith");
        assert_eq!(experts[0].affiliation.as_deref(), Some("MIT"));
        assert_eq!(experts[0].areas.as_ref().map(Vec::len), Some(2));
        assert!(experts[0].email.is_none());
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "Here are the matches:\n```json\n{\"experts\": [{\"name\": \"Ravi Patel\"}]}\n```\nGood luck!";

        let experts = parse_experts_payload(response).unwrap();
        assert_eq!(experts.len(), 1);
        assert_eq!(experts[0].name, "Ravi Patel");
    }

    #[test]
    fn test_parse_json_embedded_in_prose() {
        let response = r#"Sure! {"experts": [{"name": "Ada Lovelace"}]} Hope this helps."#;
        let experts = parse_experts_payload(response).unwrap();
        assert_eq!(experts[0].name, "Ada Lovelace");
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_experts_payload("This is not JSON");
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));

        let result = parse_experts_payload("{ broken");
        assert!(matches!(result, Err(ExtractorError::JsonParse(_))));
    }

    #[test]
    fn test_parse_missing_experts_array() {
        let result = parse_experts_payload(r#"{"people": []}"#);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_error_payload() {
        let result = parse_experts_payload(r#"{"error": "Agent backend unavailable"}"#);
        match result {
            Err(ExtractorError::Upstream(message)) => assert_eq!(message, "Agent backend unavailable"),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_partial_success() {
        let response = r#"{"experts": [
            {"name": "Jane Smith"},
            {"name": "   "},
            {"title": "No name at all"},
            {"name": 42},
            {"name": "John Doe", "summary": "Grid storage"}
        ]}"#;

        let experts = parse_experts_payload(response).unwrap();
        assert_eq!(experts.len(), 2);
        assert_eq!(experts[0].name, "Jane Smith");
        assert_eq!(experts[1].name, "John Doe");
    }

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(extract_json(json).unwrap(), json);
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response).unwrap(), r#"{"key": "value"}"#);
    }
}

//! Expert records - structured profiles of domain experts named in an answer

use serde::{Deserialize, Serialize};

/// Structured profile of a domain expert.
///
/// Records are produced either by the answer extractor or by an external
/// structured API, and are rebuilt for every answer. Optional fields are left
/// unset rather than holding empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpertRecord {
    /// Display name (required, non-empty)
    #[serde(default)]
    pub name: String,

    /// Role or position, e.g. "Professor at MIT"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Institution or company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,

    /// City, country or region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-text description of the expert's work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Areas of expertise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas: Option<Vec<String>>,

    /// Website or profile link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Contact address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ExpertRecord {
    /// Create a record carrying only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check the record is displayable
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        Ok(())
    }

    /// Trim every field and drop the ones left empty.
    ///
    /// External APIs frequently send `""` for unknown values; after
    /// normalization those fields read as absent.
    pub fn normalized(self) -> Self {
        let areas = self.areas.map(|areas| {
            areas
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect::<Vec<_>>()
        });

        Self {
            name: self.name.trim().to_string(),
            title: non_empty(self.title),
            affiliation: non_empty(self.affiliation),
            location: non_empty(self.location),
            summary: non_empty(self.summary),
            areas: areas.filter(|a| !a.is_empty()),
            website: non_empty(self.website),
            email: non_empty(self.email),
        }
    }

    /// Affiliation for display, `"Independent"` when unknown
    pub fn affiliation_or_independent(&self) -> &str {
        self.affiliation.as_deref().unwrap_or("Independent")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_fails_validation() {
        assert!(ExpertRecord::new("").validate().is_err());
        assert!(ExpertRecord::new("   ").validate().is_err());
        assert!(ExpertRecord::new("Jane Smith").validate().is_ok());
    }

    #[test]
    fn test_normalized_drops_empty_fields() {
        let record = ExpertRecord {
            name: " Jane Smith ".to_string(),
            email: Some(String::new()),
            website: Some("  ".to_string()),
            areas: Some(vec!["".to_string(), " batteries ".to_string()]),
            ..ExpertRecord::default()
        }
        .normalized();

        assert_eq!(record.name, "Jane Smith");
        assert_eq!(record.email, None);
        assert_eq!(record.website, None);
        assert_eq!(record.areas, Some(vec!["batteries".to_string()]));
    }

    #[test]
    fn test_unset_fields_are_not_serialized() {
        let json = serde_json::to_string(&ExpertRecord::new("Jane Smith")).unwrap();
        assert_eq!(json, r#"{"name":"Jane Smith"}"#);
    }

    #[test]
    fn test_deserializes_partial_record() {
        let record: ExpertRecord =
            serde_json::from_str(r#"{"name":"Ada Lovelace","areas":["computing"]}"#).unwrap();
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.areas, Some(vec!["computing".to_string()]));
        assert_eq!(record.affiliation_or_independent(), "Independent");
    }
}

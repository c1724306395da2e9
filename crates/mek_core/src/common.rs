//! Fields shared by every unit kind.

use serde::{Deserialize, Serialize};

use crate::document::UnitDocument;

/// Identity and tech metadata common to every kind.
///
/// Extraction never fails: absent values become empty strings or 0, and rule
/// checks are left to the validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonFields {
    /// Chassis name.
    pub chassis: String,
    /// Model designation.
    pub model: String,
    /// Introduction year.
    pub year: u32,
    /// Raw tech base / rules level string (the `type` block).
    pub tech_base_raw: String,
    /// Raw era name.
    pub era_raw: String,
    /// Battlefield role.
    pub role: String,
    /// Publication source.
    pub source: String,
}

/// Pull the common fields out of a document.
#[must_use]
pub fn extract_common_fields(doc: &UnitDocument) -> CommonFields {
    let tag = |key: &str| doc.tag_str(key).unwrap_or_default().to_string();

    CommonFields {
        chassis: doc.name.trim().to_string(),
        model: doc.model.trim().to_string(),
        year: doc.year,
        tech_base_raw: doc.tech_type.trim().to_string(),
        era_raw: tag("era"),
        role: tag("role"),
        source: tag("source"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TagValue;

    #[test]
    fn test_extract_defaults_on_empty_document() {
        let common = extract_common_fields(&UnitDocument::default());
        assert_eq!(common, CommonFields::default());
    }

    #[test]
    fn test_extract_reads_tags() {
        let mut doc = UnitDocument {
            name: " Locust ".to_string(),
            model: "LCT-1V".to_string(),
            year: 2499,
            tech_type: "IS Level 1".to_string(),
            ..Default::default()
        };
        doc.tags
            .insert("role".to_string(), TagValue::from("Scout"));
        doc.tags.insert(
            "source".to_string(),
            TagValue::List(vec!["TRO 3025".to_string(), "Revised".to_string()]),
        );

        let common = extract_common_fields(&doc);
        assert_eq!(common.chassis, "Locust");
        assert_eq!(common.model, "LCT-1V");
        assert_eq!(common.year, 2499);
        assert_eq!(common.tech_base_raw, "IS Level 1");
        assert_eq!(common.role, "Scout");
        assert_eq!(common.source, "TRO 3025");
        assert!(common.era_raw.is_empty());
    }
}

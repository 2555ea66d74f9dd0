//! Jurisdiction Records - Read-Only Report Input

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Column headers of every requirements table, in column order.
pub const REQUIREMENT_HEADERS: [&str; 6] = [
    "Document",
    "Required? (P/D)",
    "Deadline from Filing",
    "Form (filed)",
    "Execution (how)",
    "Notes",
];

/// One row of a jurisdiction's requirements table. Missing JSON keys read
/// as empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementRow {
    pub document: String,
    pub required: String,
    pub deadline: String,
    pub form: String,
    pub execution: String,
    pub notes: String,
}

impl RequirementRow {
    pub fn new(
        document: &str,
        required: &str,
        deadline: &str,
        form: &str,
        execution: &str,
        notes: &str,
    ) -> Self {
        Self {
            document: document.to_string(),
            required: required.to_string(),
            deadline: deadline.to_string(),
            form: form.to_string(),
            execution: execution.to_string(),
            notes: notes.to_string(),
        }
    }

    /// Cell texts in the order of [`REQUIREMENT_HEADERS`].
    pub fn cells(&self) -> [&str; 6] {
        [
            self.document.as_str(),
            self.required.as_str(),
            self.deadline.as_str(),
            self.form.as_str(),
            self.execution.as_str(),
            self.notes.as_str(),
        ]
    }
}

/// One country or regional system summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionRecord {
    pub name: String,
    pub map_reference: String,
    pub population: String,
    pub system: String,
    pub office: String,
    pub languages: String,
    pub translation_rule: String,
    #[serde(default)]
    pub requirements: Vec<RequirementRow>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl JurisdictionRecord {
    /// Label/value pairs of the key-facts block.
    pub fn key_facts<'a>(&'a self, last_verified: &'a str) -> [(&'static str, &'a str); 6] {
        [
            ("Population", self.population.as_str()),
            ("System / Coverage", self.system.as_str()),
            ("Office / Authority", self.office.as_str()),
            ("Filing language(s)", self.languages.as_str()),
            ("Translation rule", self.translation_rule.as_str()),
            ("Last verified", last_verified),
        ]
    }

    /// Section heading text.
    pub fn heading(&self) -> String {
        format!("{} — Patents & Designs", self.name)
    }
}

/// Report front matter and the date stamped into every key-facts block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverPage {
    pub title: String,
    pub subtitle: String,
    pub scope: String,
    pub last_verified: String,
    pub footer: String,
}

/// A complete report input: cover plus ordered records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub cover: CoverPage,
    pub jurisdictions: Vec<JurisdictionRecord>,
}

impl Dataset {
    pub fn load_from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_follow_header_order() {
        let row = RequirementRow::new("PoA", "Y/Y", "90 days", "Original", "Notarized", "n");
        assert_eq!(row.cells(), ["PoA", "Y/Y", "90 days", "Original", "Notarized", "n"]);
        assert_eq!(row.cells().len(), REQUIREMENT_HEADERS.len());
    }

    #[test]
    fn test_missing_row_keys_are_empty_cells() {
        let row: RequirementRow =
            serde_json::from_str(r#"{"document": "Assignment", "required": "Y/Y"}"#).unwrap();
        assert_eq!(row.cells(), ["Assignment", "Y/Y", "", "", "", ""]);
    }

    #[test]
    fn test_notes_optional_in_json() {
        let json = r#"{
            "name": "Oman", "map_reference": "maps/oman.png", "population": "5m",
            "system": "National", "office": "MoCIIP", "languages": "Arabic",
            "translation_rule": "Arabic", "requirements": []
        }"#;
        let record: JurisdictionRecord = serde_json::from_str(json).unwrap();
        assert!(record.notes.is_none());
        assert_eq!(record.heading(), "Oman — Patents & Designs");
    }
}

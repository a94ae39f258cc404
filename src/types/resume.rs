// src/types/resume.rs
//! Resume data structures shared by the scorer, the API and the CLI

use serde::{Deserialize, Serialize};

/// Structured resume record. Every field defaults to empty so partially
/// filled editor state always deserializes; missing sections score low
/// instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
}

/// One work experience entry, in resume display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

impl ResumeRecord {
    /// Display title fallback when a stored resume has no explicit title.
    pub fn default_title(&self) -> String {
        if self.personal_info.full_name.trim().is_empty() {
            "Untitled resume".to_string()
        } else {
            format!("{} - resume", self.personal_info.full_name.trim())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_to_empty() {
        let record: ResumeRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, ResumeRecord::default());

        let record: ResumeRecord =
            serde_json::from_str(r#"{"personal_info": {"full_name": "Ada"}}"#).unwrap();
        assert_eq!(record.personal_info.full_name, "Ada");
        assert_eq!(record.personal_info.email, "");
        assert!(record.experience.is_empty());
    }

    #[test]
    fn test_default_title() {
        let mut record = ResumeRecord::default();
        assert_eq!(record.default_title(), "Untitled resume");

        record.personal_info.full_name = "Ada Lovelace".to_string();
        assert_eq!(record.default_title(), "Ada Lovelace - resume");
    }
}

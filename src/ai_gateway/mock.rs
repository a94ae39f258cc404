// src/ai_gateway/mock.rs
//! Static fallback reports used when the gateway returns output the JSON
//! parser cannot make sense of.

use crate::types::response::{KeywordScanReport, SkillsGapReport};
use crate::types::resume::ResumeRecord;

pub fn keyword_scan_fallback(resume: &ResumeRecord) -> KeywordScanReport {
    KeywordScanReport {
        matched_keywords: resume.skills.iter().filter(|s| !s.is_empty()).take(5).cloned().collect(),
        missing_keywords: vec![
            "communication".to_string(),
            "leadership".to_string(),
            "project management".to_string(),
        ],
        suggestions: vec![
            "Mirror the exact wording of skills from the job description".to_string(),
            "Add measurable outcomes to your experience bullet points".to_string(),
            "Keep section headings standard so ATS software can find them".to_string(),
        ],
    }
}

pub fn skills_gap_fallback(resume: &ResumeRecord, target_role: &str) -> SkillsGapReport {
    SkillsGapReport {
        strengths: resume.skills.iter().filter(|s| !s.is_empty()).take(3).cloned().collect(),
        gaps: vec![format!("Role-specific expertise for: {}", target_role)],
        learning_suggestions: vec![
            format!("Review recent job postings for {} roles and note recurring requirements", target_role),
            "Build a small portfolio project demonstrating the missing skills".to_string(),
        ],
    }
}

pub fn cover_letter_fallback(resume: &ResumeRecord, job_title: &str, company: &str) -> String {
    let name = if resume.personal_info.full_name.is_empty() {
        "The candidate"
    } else {
        resume.personal_info.full_name.as_str()
    };

    format!(
        "Dear Hiring Manager,\n\n\
         I am writing to apply for the {job_title} position at {company}. \
         My background and skills align well with the responsibilities of this role, \
         and I would welcome the opportunity to contribute to your team.\n\n\
         My experience has given me a strong foundation in the areas this position requires, \
         and I am confident I can deliver value from day one.\n\n\
         Thank you for your consideration.\n\n\
         Sincerely,\n{name}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_fallback_uses_resume_skills() {
        let mut resume = ResumeRecord::default();
        resume.skills = vec!["Rust".to_string(), "".to_string(), "SQL".to_string()];

        let report = keyword_scan_fallback(&resume);
        assert_eq!(report.matched_keywords, vec!["Rust", "SQL"]);
        assert!(!report.suggestions.is_empty());
    }

    #[test]
    fn test_cover_letter_fallback_mentions_role_and_company() {
        let letter = cover_letter_fallback(&ResumeRecord::default(), "Engineer", "Acme");
        assert!(letter.contains("Engineer position at Acme"));
        assert!(letter.contains("The candidate"));
    }

    #[test]
    fn test_skills_gap_fallback_names_target_role() {
        let report = skills_gap_fallback(&ResumeRecord::default(), "Data Engineer");
        assert!(report.gaps[0].contains("Data Engineer"));
    }
}

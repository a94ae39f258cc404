// src/scoring/ats.rs
//! ATS compatibility scoring rubric.
//!
//! Pure and total: any resume record maps to a score between 0 and 100 plus
//! a fixed-order checklist. Missing or empty fields lower the score, they
//! never produce an error. The weights and thresholds are product-tuned
//! constants and must stay exactly as written.

use crate::templates;
use crate::types::resume::ResumeRecord;
use serde::{Deserialize, Serialize};

pub const CONTACT_POINTS: u32 = 20;
pub const SUMMARY_POINTS: u32 = 15;
pub const EXPERIENCE_FULL_POINTS: u32 = 25;
pub const EXPERIENCE_PARTIAL_POINTS: u32 = 15;
pub const EDUCATION_POINTS: u32 = 15;
pub const SKILLS_FULL_POINTS: u32 = 15;
pub const SKILLS_PARTIAL_POINTS: u32 = 10;
pub const MAX_SCORE: u32 = 100;

/// Summary must be strictly longer than this many characters.
const SUMMARY_MIN_CHARS: usize = 50;
const SKILLS_FULL_COUNT: usize = 5;
const SKILLS_PARTIAL_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Pass,
    Warning,
    Fail,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsCheck {
    pub kind: CheckKind,
    pub message: String,
}

impl AtsCheck {
    fn new(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Scoring result: total score, one check per category plus one
/// informational line for the template bonus. Six checks, always in the
/// same order: contact, summary, experience, education, skills, template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    pub score: u32,
    pub checks: Vec<AtsCheck>,
    pub template_bonus: u32,
}

impl AtsScore {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Presentation band derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::Excellent
        } else if score >= 60 {
            ScoreBand::Good
        } else {
            ScoreBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "green",
            ScoreBand::Good => "yellow",
            ScoreBand::NeedsImprovement => "red",
        }
    }
}

/// Score a resume against the ATS rubric for the given template id.
///
/// Categories are evaluated independently and summed; the total is clamped
/// to 100. Unknown template ids fall back to the default bonus.
pub fn score_resume(resume: &ResumeRecord, template_id: &str) -> AtsScore {
    let mut score = 0;
    let mut checks = Vec::with_capacity(6);

    // Contact completeness: all-or-nothing, no partial credit.
    let info = &resume.personal_info;
    if non_empty(&info.full_name) && non_empty(&info.email) && non_empty(&info.phone) {
        score += CONTACT_POINTS;
        checks.push(AtsCheck::new(CheckKind::Pass, "Contact information complete"));
    } else {
        checks.push(AtsCheck::new(CheckKind::Fail, "Missing contact information"));
    }

    // Summary quality: strictly more than 50 characters.
    if non_empty(&info.summary) && info.summary.chars().count() > SUMMARY_MIN_CHARS {
        score += SUMMARY_POINTS;
        checks.push(AtsCheck::new(CheckKind::Pass, "Professional summary present"));
    } else {
        checks.push(AtsCheck::new(
            CheckKind::Warning,
            "Add a professional summary of at least 50 characters",
        ));
    }

    // Experience depth: entries missing company, position or description
    // do not count.
    let valid_experience = resume
        .experience
        .iter()
        .filter(|e| non_empty(&e.company) && non_empty(&e.position) && non_empty(&e.description))
        .count();
    if valid_experience >= 2 {
        score += EXPERIENCE_FULL_POINTS;
        checks.push(AtsCheck::new(CheckKind::Pass, "Work experience well documented"));
    } else if valid_experience == 1 {
        score += EXPERIENCE_PARTIAL_POINTS;
        checks.push(AtsCheck::new(
            CheckKind::Warning,
            "Add more work experience entries",
        ));
    } else {
        checks.push(AtsCheck::new(CheckKind::Fail, "Missing work experience"));
    }

    // Education completeness.
    let has_education = resume
        .education
        .iter()
        .any(|e| non_empty(&e.institution) && non_empty(&e.degree));
    if has_education {
        score += EDUCATION_POINTS;
        checks.push(AtsCheck::new(CheckKind::Pass, "Education section complete"));
    } else {
        checks.push(AtsCheck::new(CheckKind::Fail, "Missing education information"));
    }

    // Skills sufficiency: the first entry guards against an all-empty
    // placeholder array.
    let first_skill_filled = resume.skills.first().map_or(false, |s| non_empty(s));
    if resume.skills.len() >= SKILLS_FULL_COUNT && first_skill_filled {
        score += SKILLS_FULL_POINTS;
        checks.push(AtsCheck::new(CheckKind::Pass, "Good skills coverage"));
    } else if resume.skills.len() >= SKILLS_PARTIAL_COUNT && first_skill_filled {
        score += SKILLS_PARTIAL_POINTS;
        checks.push(AtsCheck::new(
            CheckKind::Warning,
            "Add more skills (5+ recommended)",
        ));
    } else {
        checks.push(AtsCheck::new(CheckKind::Fail, "Missing skills section"));
    }

    // Template bonus: informational only, always added.
    let template_bonus = templates::ats_bonus(template_id);
    score += template_bonus;
    checks.push(AtsCheck::new(
        CheckKind::Info,
        format!("Template ATS Score: {}/10", template_bonus),
    ));

    AtsScore {
        score: score.min(MAX_SCORE),
        checks,
        template_bonus,
    }
}

fn non_empty(s: &str) -> bool {
    !s.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resume::{EducationEntry, ExperienceEntry, PersonalInfo};

    fn filled_resume() -> ResumeRecord {
        ResumeRecord {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+41 79 555 00 11".to_string(),
                location: "Geneva".to_string(),
                summary: "Analytical engineer with a decade of experience building engines."
                    .to_string(),
            },
            experience: vec![
                ExperienceEntry {
                    company: "Analytical Engines Ltd".to_string(),
                    position: "Lead Engineer".to_string(),
                    duration: "2019 - 2024".to_string(),
                    description: "Designed computation pipelines".to_string(),
                },
                ExperienceEntry {
                    company: "Babbage & Co".to_string(),
                    position: "Engineer".to_string(),
                    duration: "2015 - 2019".to_string(),
                    description: "Built difference engines".to_string(),
                },
            ],
            education: vec![EducationEntry {
                institution: "University of London".to_string(),
                degree: "BSc Mathematics".to_string(),
                year: "2014".to_string(),
            }],
            skills: vec![
                "Rust".to_string(),
                "SQL".to_string(),
                "Distributed systems".to_string(),
                "Mentoring".to_string(),
                "Algorithms".to_string(),
                "Documentation".to_string(),
            ],
        }
    }

    #[test]
    fn test_score_bounds_and_check_count() {
        let records = [ResumeRecord::default(), filled_resume()];
        for record in &records {
            for template in ["classic-minimal", "tech-specialist", "custom-xyz", ""] {
                let result = score_resume(record, template);
                assert!(result.score <= 100);
                assert_eq!(result.checks.len(), 6);
            }
        }
    }

    #[test]
    fn test_checks_keep_category_order() {
        let result = score_resume(&ResumeRecord::default(), "classic-minimal");
        let kinds: Vec<CheckKind> = result.checks.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CheckKind::Fail,    // contact
                CheckKind::Warning, // summary
                CheckKind::Fail,    // experience
                CheckKind::Fail,    // education
                CheckKind::Fail,    // skills
                CheckKind::Info,    // template bonus
            ]
        );
        assert_eq!(result.checks[5].message, "Template ATS Score: 10/10");
    }

    #[test]
    fn test_empty_resume_scores_template_bonus_only() {
        // Empty personal info, one empty experience entry, one empty
        // education entry, no skills.
        let record = ResumeRecord {
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            ..ResumeRecord::default()
        };
        let result = score_resume(&record, "classic-minimal");
        assert_eq!(result.score, 10);
        assert_eq!(result.template_bonus, 10);
        assert_eq!(result.band(), ScoreBand::NeedsImprovement);
    }

    #[test]
    fn test_full_resume_scores_98_with_modern_professional() {
        let mut record = filled_resume();
        record.personal_info.summary = "x".repeat(80);
        let result = score_resume(&record, "modern-professional");
        // 20 + 15 + 25 + 15 + 15 + 8
        assert_eq!(result.score, 98);
        assert_eq!(result.template_bonus, 8);
        assert_eq!(result.band(), ScoreBand::Excellent);
    }

    #[test]
    fn test_single_experience_entry_drops_to_88() {
        let mut record = filled_resume();
        record.personal_info.summary = "x".repeat(80);
        record.experience.truncate(1);
        let result = score_resume(&record, "modern-professional");
        assert_eq!(result.score, 88);
        assert_eq!(result.checks[2].kind, CheckKind::Warning);
    }

    #[test]
    fn test_summary_boundary_at_50_chars() {
        let mut record = ResumeRecord::default();

        record.personal_info.summary = "x".repeat(49);
        assert_eq!(score_resume(&record, "custom").checks[1].kind, CheckKind::Warning);

        record.personal_info.summary = "x".repeat(50);
        assert_eq!(score_resume(&record, "custom").checks[1].kind, CheckKind::Warning);

        record.personal_info.summary = "x".repeat(51);
        let result = score_resume(&record, "custom");
        assert_eq!(result.checks[1].kind, CheckKind::Pass);
        assert_eq!(result.score, SUMMARY_POINTS + 6);
    }

    #[test]
    fn test_skills_tiers_and_placeholder_guard() {
        let mut record = ResumeRecord::default();

        record.skills = vec!["Rust".into(), "SQL".into(), "Git".into()];
        let result = score_resume(&record, "custom");
        assert_eq!(result.checks[4].kind, CheckKind::Warning);
        assert_eq!(result.score, SKILLS_PARTIAL_POINTS + 6);

        record.skills.push("Docker".into());
        record.skills.push("CI".into());
        let result = score_resume(&record, "custom");
        assert_eq!(result.checks[4].kind, CheckKind::Pass);
        assert_eq!(result.score, SKILLS_FULL_POINTS + 6);

        // Five entries but the first one empty: placeholder array, no credit.
        record.skills = vec!["".into(), "a".into(), "b".into(), "c".into(), "d".into()];
        let result = score_resume(&record, "custom");
        assert_eq!(result.checks[4].kind, CheckKind::Fail);
    }

    #[test]
    fn test_partial_contact_gets_no_credit() {
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = "Ada".to_string();
        record.personal_info.email = "ada@example.com".to_string();
        let without_phone = score_resume(&record, "custom").score;

        record.personal_info.phone = "123".to_string();
        let with_phone = score_resume(&record, "custom").score;

        // Filling in a missing required field never lowers the score.
        assert_eq!(without_phone, 6);
        assert_eq!(with_phone, CONTACT_POINTS + 6);
        assert!(with_phone >= without_phone);
    }

    #[test]
    fn test_unrecognized_template_falls_back_to_default_bonus() {
        let result = score_resume(&ResumeRecord::default(), "custom-xyz");
        assert_eq!(result.template_bonus, 6);
        assert_eq!(result.checks[5].message, "Template ATS Score: 6/10");
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let record = filled_resume();
        let a = score_resume(&record, "tech-specialist");
        let b = score_resume(&record, "tech-specialist");
        assert_eq!(a, b);
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::NeedsImprovement);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::NeedsImprovement);
        assert_eq!(ScoreBand::Good.label(), "Good");
        assert_eq!(ScoreBand::NeedsImprovement.color(), "red");
    }
}

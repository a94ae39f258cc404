// src/templates.rs
//! Resume template catalog.
//!
//! Templates are presentational tags with a fixed ATS-friendliness bonus.
//! The bonus table is a product constant: simpler layouts parse better in
//! applicant tracking systems, so they earn more points.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ATS_BONUS: u32 = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub ats_bonus: u32,
}

const CATALOG: &[ResumeTemplate] = &[
    ResumeTemplate {
        id: "classic-minimal",
        name: "Classic Minimal",
        description: "Single-column layout with no graphics, the safest choice for ATS parsing",
        ats_bonus: 10,
    },
    ResumeTemplate {
        id: "tech-specialist",
        name: "Tech Specialist",
        description: "Skills-forward layout for engineering roles",
        ats_bonus: 9,
    },
    ResumeTemplate {
        id: "modern-professional",
        name: "Modern Professional",
        description: "Two-column layout with a sidebar for contact details",
        ats_bonus: 8,
    },
];

/// ATS bonus for a template id. Unknown ids get the default bonus, never an
/// error.
pub fn ats_bonus(template_id: &str) -> u32 {
    CATALOG
        .iter()
        .find(|t| t.id == template_id)
        .map(|t| t.ats_bonus)
        .unwrap_or(DEFAULT_ATS_BONUS)
}

pub fn find(template_id: &str) -> Option<&'static ResumeTemplate> {
    CATALOG.iter().find(|t| t.id == template_id)
}

pub fn catalog() -> &'static [ResumeTemplate] {
    CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_table() {
        assert_eq!(ats_bonus("classic-minimal"), 10);
        assert_eq!(ats_bonus("tech-specialist"), 9);
        assert_eq!(ats_bonus("modern-professional"), 8);
    }

    #[test]
    fn test_unknown_template_gets_default_bonus() {
        assert_eq!(ats_bonus("custom-xyz"), DEFAULT_ATS_BONUS);
        assert_eq!(ats_bonus(""), DEFAULT_ATS_BONUS);
        assert!(find("custom-xyz").is_none());
    }

    #[test]
    fn test_catalog_bonuses_stay_in_range() {
        for template in catalog() {
            assert!(template.ats_bonus <= 10);
        }
    }
}

// src/ai_gateway/prompts.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const KEYWORD_SCAN_PROMPT: &str = "You are an ATS keyword analyst. Compare the resume below \
against the job description. Respond with JSON only, using this shape: \
{\"matched_keywords\": [...], \"missing_keywords\": [...], \"suggestions\": [...]}.\n\n\
Resume:\n{resume}\n\nJob description:\n{job_description}";

const SKILLS_GAP_PROMPT: &str = "You are a career coach. Given the resume below and the \
target role, list the candidate's strengths, the skill gaps for the role, and concrete \
learning suggestions. Respond with JSON only: \
{\"strengths\": [...], \"gaps\": [...], \"learning_suggestions\": [...]}.\n\n\
Resume:\n{resume}\n\nTarget role: {target_role}";

const COVER_LETTER_PROMPT: &str = "Write a concise, professional cover letter (3 short \
paragraphs, plain text, no placeholders) for the candidate below applying to the role of \
{job_title} at {company}.\n\nResume:\n{resume}";

/// Prompt templates with `{placeholder}` slots. Built-in defaults can be
/// overridden from a prompts.yaml file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptLibrary {
    pub keyword_scan: String,
    pub skills_gap: String,
    pub cover_letter: String,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self {
            keyword_scan: KEYWORD_SCAN_PROMPT.to_string(),
            skills_gap: SKILLS_GAP_PROMPT.to_string(),
            cover_letter: COVER_LETTER_PROMPT.to_string(),
        }
    }
}

impl PromptLibrary {
    /// Load overrides from a YAML file, falling back to the defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;
        let library: PromptLibrary =
            serde_yaml::from_str(&content).context("Failed to parse prompts.yaml")?;

        info!("Loaded prompt overrides from {}", path.display());
        Ok(library)
    }

    /// Substitute `{name}` placeholders in a template.
    pub fn render(template: &str, values: &[(&str, &str)]) -> String {
        let mut out = template.to_string();
        for (name, value) in values {
            out = out.replace(&format!("{{{}}}", name), value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let rendered = PromptLibrary::render(
            "Role: {target_role} for {target_role} at {company}",
            &[("target_role", "Engineer"), ("company", "Acme")],
        );
        assert_eq!(rendered, "Role: Engineer for Engineer at Acme");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let rendered = PromptLibrary::render("Hello {name}", &[("other", "x")]);
        assert_eq!(rendered, "Hello {name}");
    }

    #[test]
    fn test_default_templates_carry_their_slots() {
        let library = PromptLibrary::default();
        assert!(library.keyword_scan.contains("{resume}"));
        assert!(library.keyword_scan.contains("{job_description}"));
        assert!(library.skills_gap.contains("{target_role}"));
        assert!(library.cover_letter.contains("{job_title}"));
        assert!(library.cover_letter.contains("{company}"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let library = PromptLibrary::load(Path::new("/nonexistent/prompts.yaml")).unwrap();
        assert_eq!(library.keyword_scan, PromptLibrary::default().keyword_scan);
    }
}

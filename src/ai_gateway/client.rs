// src/ai_gateway/client.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, warn};

use super::{mock, prompts::PromptLibrary};
use crate::types::response::{
    ChatMessage, CompletionRequest, CompletionResponse, KeywordScanReport, SkillsGapReport,
};
use crate::types::resume::ResumeRecord;

const COMPLETIONS_ENDPOINT: &str = "/v1/chat/completions";
const SYSTEM_ROLE: &str = "You are a career-services assistant. Follow the output format \
instructions exactly.";

pub struct GatewayClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    prompts: PromptLibrary,
}

impl GatewayClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
            prompts: PromptLibrary::default(),
        })
    }

    pub fn with_prompts(mut self, prompts: PromptLibrary) -> Self {
        self.prompts = prompts;
        self
    }

    /// Send one chat completion and return the raw model text.
    pub async fn complete(&self, user_prompt: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, COMPLETIONS_ENDPOINT);

        let payload = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_ROLE.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: 0.2,
        };

        info!("Calling AI gateway: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to AI gateway")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("AI gateway returned error status {}: {}", status, error_text);
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse AI gateway response")?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("AI gateway returned no choices"))?;

        Ok(content)
    }

    /// Scan a resume against a job description for keyword coverage.
    /// Falls back to a static report when the model output is not valid JSON.
    pub async fn keyword_scan(
        &self,
        resume: &ResumeRecord,
        job_description: &str,
    ) -> Result<KeywordScanReport> {
        let resume_text = render_resume(resume);
        let prompt = PromptLibrary::render(
            &self.prompts.keyword_scan,
            &[
                ("resume", resume_text.as_str()),
                ("job_description", job_description),
            ],
        );

        let raw = self.complete(&prompt).await?;
        match parse_model_json::<KeywordScanReport>(&raw) {
            Some(report) => Ok(report),
            None => {
                warn!("Keyword scan output was not parseable JSON, using fallback report");
                Ok(mock::keyword_scan_fallback(resume))
            }
        }
    }

    /// Compare a resume against a target role and report skill gaps.
    pub async fn skills_gap(
        &self,
        resume: &ResumeRecord,
        target_role: &str,
    ) -> Result<SkillsGapReport> {
        let resume_text = render_resume(resume);
        let prompt = PromptLibrary::render(
            &self.prompts.skills_gap,
            &[
                ("resume", resume_text.as_str()),
                ("target_role", target_role),
            ],
        );

        let raw = self.complete(&prompt).await?;
        match parse_model_json::<SkillsGapReport>(&raw) {
            Some(report) => Ok(report),
            None => {
                warn!("Skills gap output was not parseable JSON, using fallback report");
                Ok(mock::skills_gap_fallback(resume, target_role))
            }
        }
    }

    /// Generate a cover letter. Plain text output; an empty completion
    /// falls back to the deterministic template letter.
    pub async fn cover_letter(
        &self,
        resume: &ResumeRecord,
        job_title: &str,
        company: &str,
    ) -> Result<String> {
        let resume_text = render_resume(resume);
        let prompt = PromptLibrary::render(
            &self.prompts.cover_letter,
            &[
                ("resume", resume_text.as_str()),
                ("job_title", job_title),
                ("company", company),
            ],
        );

        let raw = self.complete(&prompt).await?;
        let letter = raw.trim();
        if letter.is_empty() {
            warn!("Cover letter completion was empty, using fallback letter");
            return Ok(mock::cover_letter_fallback(resume, job_title, company));
        }

        Ok(letter.to_string())
    }
}

/// Flatten a resume record into plain text for prompt interpolation.
fn render_resume(resume: &ResumeRecord) -> String {
    let mut text = String::new();
    let info = &resume.personal_info;

    text.push_str(&format!("Name: {}\n", info.full_name));
    if !info.summary.is_empty() {
        text.push_str(&format!("Summary: {}\n", info.summary));
    }

    if !resume.experience.is_empty() {
        text.push_str("Experience:\n");
        for exp in &resume.experience {
            text.push_str(&format!(
                "- {} at {} ({}): {}\n",
                exp.position, exp.company, exp.duration, exp.description
            ));
        }
    }

    if !resume.education.is_empty() {
        text.push_str("Education:\n");
        for edu in &resume.education {
            text.push_str(&format!("- {} at {} ({})\n", edu.degree, edu.institution, edu.year));
        }
    }

    let skills: Vec<&str> = resume
        .skills
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.as_str())
        .collect();
    if !skills.is_empty() {
        text.push_str(&format!("Skills: {}\n", skills.join(", ")));
    }

    text
}

/// Extract and parse the JSON object embedded in model output. Models wrap
/// JSON in prose and markdown fences, so bracket the first `{` to the last
/// `}` before parsing.
fn parse_model_json<T: serde::de::DeserializeOwned>(text: &str) -> Option<T> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resume::ExperienceEntry;

    #[test]
    fn test_parse_model_json_plain() {
        let report: KeywordScanReport = parse_model_json(
            r#"{"matched_keywords": ["rust"], "missing_keywords": [], "suggestions": ["a"]}"#,
        )
        .unwrap();
        assert_eq!(report.matched_keywords, vec!["rust"]);
    }

    #[test]
    fn test_parse_model_json_with_fences_and_prose() {
        let text = "Here is the analysis:\n```json\n{\"matched_keywords\": [], \
                    \"missing_keywords\": [\"sql\"], \"suggestions\": []}\n```\nHope it helps!";
        let report: KeywordScanReport = parse_model_json(text).unwrap();
        assert_eq!(report.missing_keywords, vec!["sql"]);
    }

    #[test]
    fn test_parse_model_json_rejects_garbage() {
        assert!(parse_model_json::<KeywordScanReport>("no json here").is_none());
        assert!(parse_model_json::<KeywordScanReport>("{broken").is_none());
        assert!(parse_model_json::<KeywordScanReport>("} {").is_none());
    }

    #[test]
    fn test_render_resume_skips_empty_sections() {
        let mut resume = ResumeRecord::default();
        resume.personal_info.full_name = "Ada".to_string();
        resume.experience.push(ExperienceEntry {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            duration: "2020-2024".to_string(),
            description: "Built things".to_string(),
        });

        let text = render_resume(&resume);
        assert!(text.contains("Name: Ada"));
        assert!(text.contains("Engineer at Acme"));
        assert!(!text.contains("Summary:"));
        assert!(!text.contains("Skills:"));
    }
}

// src/types/response.rs
//! Wire types for the external AI gateway and scraping service.

use serde::{Deserialize, Serialize};

// ===== AI gateway (chat-completion) =====

#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: ChatMessage,
}

// ===== Analysis reports parsed from model output =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordScanReport {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsGapReport {
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub learning_suggestions: Vec<String>,
}

// ===== Scraping service (actor run lifecycle) =====

#[derive(Debug, Deserialize)]
pub struct RunEnvelope {
    pub data: RunStatus,
}

#[derive(Debug, Deserialize)]
pub struct RunStatus {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: Option<String>,
}

/// Raw scraped job item. Everything optional: the scraper's output shape
/// varies per source site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawJobItem {
    pub title: Option<String>,
    pub company: Option<String>,
    #[serde(alias = "companyName")]
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub link: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "descriptionHtml")]
    pub description_html: Option<String>,
}

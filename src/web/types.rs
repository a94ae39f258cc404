// src/web/types.rs - Standard request/response envelope plus endpoint payloads

use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

use crate::ai_gateway::PromptLibrary;
use crate::config::ServiceConfig;
use crate::scoring::AtsCheck;
use crate::types::resume::ResumeRecord;

/// Rocket-managed server state shared by the handlers.
pub struct ServerConfig {
    pub services: ServiceConfig,
    pub prompts: PromptLibrary,
}

// ===== Standard response envelope =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_format: Option<DisplayFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_actions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DisplayFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<DisplaySection>>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DisplaySection {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<String>>,
}

// Request envelope with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            display_format: None,
            conversation_id,
        }
    }

    pub fn with_display_format(mut self, display_format: DisplayFormat) -> Self {
        self.display_format = Some(display_format);
        self
    }
}

impl ActionResponse {
    pub fn success(message: String, action: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
            next_actions: None,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }
}

// ===== Endpoint request payloads =====

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ScoreResumeRequest {
    pub resume: ResumeRecord,
    pub template: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SaveResumeRequest {
    pub resume: ResumeRecord,
    pub title: Option<String>,
    pub template: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct UpdateResumeRequest {
    pub resume: ResumeRecord,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct KeywordScanRequest {
    pub resume: ResumeRecord,
    pub job_description: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SkillsGapRequest {
    pub resume: ResumeRecord,
    pub target_role: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct CoverLetterRequest {
    pub resume: ResumeRecord,
    pub job_title: String,
    pub company: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct JobSearchRequest {
    pub keywords: String,
    pub location: Option<String>,
    pub limit: Option<usize>,
}

// ===== Endpoint data payloads =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ScoreReportData {
    pub score: u32,
    pub label: &'static str,
    pub color: &'static str,
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    pub template_bonus: u32,
    pub checks: Vec<AtsCheck>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResumeSummary {
    pub id: String,
    pub title: String,
    pub template: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SavedResumeData {
    pub id: String,
    pub title: String,
    pub template: String,
    pub resume: ResumeRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TemplateData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ats_bonus: u32,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct UserInfo {
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub account_name: String,
}

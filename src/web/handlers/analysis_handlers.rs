// src/web/handlers/analysis_handlers.rs - AI gateway proxies
use crate::ai_gateway::GatewayClient;
use crate::auth::AuthenticatedUser;
use crate::types::response::{KeywordScanReport, SkillsGapReport};
use crate::web::types::{
    CoverLetterRequest, DataResponse, KeywordScanRequest, ServerConfig, SkillsGapRequest,
    StandardErrorResponse, StandardRequest, TextResponse, WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn keyword_scan_handler(
    request: Json<StandardRequest<KeywordScanRequest>>,
    auth: AuthenticatedUser,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<KeywordScanReport>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    info!("User {} requested keyword scan", auth.email());

    let gateway = match build_gateway(config) {
        Ok(gateway) => gateway,
        Err(e) => return Err(gateway_config_error(e, conversation_id)),
    };

    match gateway
        .keyword_scan(&request.data.resume, &request.data.job_description)
        .await
    {
        Ok(report) => Ok(Json(DataResponse::success(
            format!(
                "{} keywords matched, {} missing",
                report.matched_keywords.len(),
                report.missing_keywords.len()
            ),
            report,
            conversation_id,
        ))),
        Err(e) => {
            error!("Keyword scan failed for {}: {}", auth.email(), e);
            Err(gateway_error(&e, conversation_id))
        }
    }
}

pub async fn skills_gap_handler(
    request: Json<StandardRequest<SkillsGapRequest>>,
    auth: AuthenticatedUser,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<SkillsGapReport>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    info!(
        "User {} requested skills gap analysis for role: {}",
        auth.email(),
        request.data.target_role
    );

    let gateway = match build_gateway(config) {
        Ok(gateway) => gateway,
        Err(e) => return Err(gateway_config_error(e, conversation_id)),
    };

    match gateway
        .skills_gap(&request.data.resume, &request.data.target_role)
        .await
    {
        Ok(report) => Ok(Json(DataResponse::success(
            format!("{} gaps identified", report.gaps.len()),
            report,
            conversation_id,
        ))),
        Err(e) => {
            error!("Skills gap analysis failed for {}: {}", auth.email(), e);
            Err(gateway_error(&e, conversation_id))
        }
    }
}

pub async fn cover_letter_handler(
    request: Json<StandardRequest<CoverLetterRequest>>,
    auth: AuthenticatedUser,
    config: &State<ServerConfig>,
) -> Result<Json<TextResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    info!(
        "User {} requested cover letter for {} at {}",
        auth.email(),
        request.data.job_title,
        request.data.company
    );

    let gateway = match build_gateway(config) {
        Ok(gateway) => gateway,
        Err(e) => return Err(gateway_config_error(e, conversation_id)),
    };

    match gateway
        .cover_letter(
            &request.data.resume,
            &request.data.job_title,
            &request.data.company,
        )
        .await
    {
        Ok(letter) => Ok(Json(TextResponse::success(letter, conversation_id))),
        Err(e) => {
            error!("Cover letter generation failed for {}: {}", auth.email(), e);
            Err(gateway_error(&e, conversation_id))
        }
    }
}

fn build_gateway(config: &State<ServerConfig>) -> anyhow::Result<GatewayClient> {
    let services = &config.services;
    Ok(GatewayClient::new(
        services.ai_gateway_url.clone(),
        services.ai_gateway_key.clone(),
        services.ai_model.clone(),
        services.timeout_seconds,
    )?
    .with_prompts(config.prompts.clone()))
}

fn gateway_config_error(
    e: anyhow::Error,
    conversation_id: Option<String>,
) -> Json<StandardErrorResponse> {
    error!("Failed to initialize AI gateway client: {}", e);
    Json(StandardErrorResponse::new(
        "Service configuration error".to_string(),
        "SERVICE_CONFIG_ERROR".to_string(),
        vec![
            "Ensure the AI gateway is configured".to_string(),
            "Contact system administrator".to_string(),
        ],
        conversation_id,
    ))
}

fn gateway_error(e: &anyhow::Error, conversation_id: Option<String>) -> Json<StandardErrorResponse> {
    let message = e.to_string();
    let (error_code, suggestions) = if message.contains("error status") {
        (
            "GATEWAY_ERROR".to_string(),
            vec![
                "The AI service is temporarily unavailable".to_string(),
                "Try again in a few moments".to_string(),
            ],
        )
    } else {
        (
            "ANALYSIS_ERROR".to_string(),
            vec![
                "Try again in a few moments".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
        )
    };

    Json(StandardErrorResponse::new(
        message,
        error_code,
        suggestions,
        conversation_id,
    ))
}

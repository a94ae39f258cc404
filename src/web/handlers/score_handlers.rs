// src/web/handlers/score_handlers.rs
use crate::auth::OptionalAuth;
use crate::scoring::{self, CheckKind};
use crate::templates;
use crate::web::types::{
    DataResponse, DisplayFormat, DisplaySection, ScoreReportData, ScoreResumeRequest,
    StandardRequest, TemplateData, WithConversationId,
};

use rocket::serde::json::Json;
use tracing::info;

const DEFAULT_TEMPLATE: &str = "classic-minimal";

/// Score a resume against the ATS rubric. Total over its input: any record
/// shape produces a report, so this handler has no error path.
pub async fn score_resume_handler(
    request: Json<StandardRequest<ScoreResumeRequest>>,
    auth: OptionalAuth,
) -> Json<DataResponse<ScoreReportData>> {
    let conversation_id = request.conversation_id();
    let template = request
        .data
        .template
        .clone()
        .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

    let result = scoring::score_resume(&request.data.resume, &template);
    let band = result.band();

    match &auth.user {
        Some(user) => info!(
            "Scored resume for {}: {} ({})",
            user.email(),
            result.score,
            band.label()
        ),
        None => info!("Scored anonymous resume: {} ({})", result.score, band.label()),
    }

    let display_format = score_display_format(&result);

    let template_name = templates::find(&template).map(|t| t.name.to_string());

    let data = ScoreReportData {
        score: result.score,
        label: band.label(),
        color: band.color(),
        template,
        template_name,
        template_bonus: result.template_bonus,
        checks: result.checks,
    };

    Json(
        DataResponse::success(
            format!("ATS compatibility: {}% ({})", data.score, data.label),
            data,
            conversation_id,
        )
        .with_display_format(display_format),
    )
}

pub async fn get_templates_handler() -> Json<DataResponse<Vec<TemplateData>>> {
    let data: Vec<TemplateData> = templates::catalog()
        .iter()
        .map(|t| TemplateData {
            id: t.id.to_string(),
            name: t.name.to_string(),
            description: t.description.to_string(),
            ats_bonus: t.ats_bonus,
        })
        .collect();

    Json(DataResponse::success(
        format!("{} templates available", data.len()),
        data,
        None,
    ))
}

fn score_display_format(result: &scoring::AtsScore) -> DisplayFormat {
    let band = result.band();

    let points = result
        .checks
        .iter()
        .map(|check| {
            let marker = match check.kind {
                CheckKind::Pass => "✓",
                CheckKind::Warning => "!",
                CheckKind::Fail => "✗",
                CheckKind::Info => "i",
            };
            format!("{} {}", marker, check.message)
        })
        .collect();

    DisplayFormat {
        format_type: "score_report".to_string(),
        sections: Some(vec![DisplaySection {
            title: "ATS Compatibility".to_string(),
            content: format!("{}% - {}", result.score, band.label()),
            score: Some(band.color().to_string()),
            points: Some(points),
        }]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resume::ResumeRecord;

    fn score_request(template: Option<&str>) -> Json<StandardRequest<ScoreResumeRequest>> {
        Json(StandardRequest {
            data: ScoreResumeRequest {
                resume: ResumeRecord::default(),
                template: template.map(str::to_string),
            },
            conversation_id: None,
        })
    }

    #[tokio::test]
    async fn test_score_report_names_known_template() {
        let response =
            score_resume_handler(score_request(Some("tech-specialist")), OptionalAuth {
                user: None,
            })
            .await;

        assert_eq!(response.data.template, "tech-specialist");
        assert_eq!(response.data.template_name.as_deref(), Some("Tech Specialist"));
        assert_eq!(response.data.template_bonus, 9);
    }

    #[tokio::test]
    async fn test_score_report_unknown_template_has_no_name() {
        let response =
            score_resume_handler(score_request(Some("custom-xyz")), OptionalAuth { user: None })
                .await;

        assert!(response.data.template_name.is_none());
        assert_eq!(response.data.template_bonus, templates::DEFAULT_ATS_BONUS);
    }

    #[tokio::test]
    async fn test_score_defaults_to_classic_minimal() {
        let response = score_resume_handler(score_request(None), OptionalAuth { user: None }).await;

        assert_eq!(response.data.template, "classic-minimal");
        assert_eq!(response.data.template_name.as_deref(), Some("Classic Minimal"));
    }
}

// src/web/handlers/job_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::job_search::{JobPosting, JobSearchQuery, ScrapeClient};
use crate::web::types::{
    DataResponse, JobSearchRequest, ServerConfig, StandardErrorResponse, StandardRequest,
    WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn search_jobs_handler(
    request: Json<StandardRequest<JobSearchRequest>>,
    auth: AuthenticatedUser,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<Vec<JobPosting>>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    info!(
        "User {} searching jobs: '{}'",
        auth.email(),
        request.data.keywords
    );

    let services = &config.services;
    let client = match ScrapeClient::new(
        services.scrape_api_url.clone(),
        services.scrape_api_token.clone(),
        services.timeout_seconds,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize scrape client: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Service configuration error".to_string(),
                "SERVICE_CONFIG_ERROR".to_string(),
                vec!["Contact system administrator".to_string()],
                conversation_id,
            )));
        }
    };

    let query = JobSearchQuery {
        keywords: request.data.keywords.clone(),
        location: request.data.location.clone(),
        limit: request.data.limit,
    };

    match client.search(&query).await {
        Ok(postings) => Ok(Json(DataResponse::success(
            format!("Found {} job postings", postings.len()),
            postings,
            conversation_id,
        ))),
        Err(e) => {
            error!("Job search failed for {}: {}", auth.email(), e);
            let message = e.to_string();
            let (error_code, suggestions) = if message.contains("did not finish") {
                (
                    "SEARCH_TIMEOUT".to_string(),
                    vec![
                        "The scraping run took too long".to_string(),
                        "Narrow the search keywords and try again".to_string(),
                    ],
                )
            } else {
                (
                    "SEARCH_ERROR".to_string(),
                    vec![
                        "The job search service is temporarily unavailable".to_string(),
                        "Try again in a few moments".to_string(),
                    ],
                )
            };
            Err(Json(StandardErrorResponse::new(
                message,
                error_code,
                suggestions,
                conversation_id,
            )))
        }
    }
}

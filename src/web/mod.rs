// src/web/mod.rs - Route table, CORS fairing, catchers and server startup

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::ai_gateway::PromptLibrary;
use crate::auth::{AuthConfig, AuthenticatedUser, OptionalAuth};
use crate::config::ConfigManager;
use crate::database::DatabaseConfig;
use crate::job_search::JobPosting;
use crate::types::response::{KeywordScanReport, SkillsGapReport};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, put, routes, Request, Response, State};
use std::path::Path;
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// API Routes

#[post("/resume/score", data = "<request>")]
pub async fn score_resume(
    request: Json<StandardRequest<ScoreResumeRequest>>,
    auth: OptionalAuth,
) -> Json<DataResponse<ScoreReportData>> {
    handlers::score_resume_handler(request, auth).await
}

#[get("/templates")]
pub async fn get_templates() -> Json<DataResponse<Vec<TemplateData>>> {
    handlers::get_templates_handler().await
}

#[post("/resumes", data = "<request>")]
pub async fn save_resume(
    request: Json<StandardRequest<SaveResumeRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<ResumeSummary>>, Json<StandardErrorResponse>> {
    handlers::save_resume_handler(request, auth, db_config).await
}

#[get("/resumes")]
pub async fn list_resumes(
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<Vec<ResumeSummary>>>, Json<StandardErrorResponse>> {
    handlers::list_resumes_handler(auth, db_config).await
}

#[get("/resumes/<resume_id>")]
pub async fn get_resume(
    resume_id: String,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<SavedResumeData>>, Json<StandardErrorResponse>> {
    handlers::get_resume_handler(resume_id, auth, db_config).await
}

#[put("/resumes/<resume_id>", data = "<request>")]
pub async fn update_resume(
    resume_id: String,
    request: Json<StandardRequest<UpdateResumeRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<ResumeSummary>>, Json<StandardErrorResponse>> {
    handlers::update_resume_handler(resume_id, request, auth, db_config).await
}

#[delete("/resumes/<resume_id>")]
pub async fn delete_resume(
    resume_id: String,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_resume_handler(resume_id, auth, db_config).await
}

#[post("/analyze/keywords", data = "<request>")]
pub async fn analyze_keywords(
    request: Json<StandardRequest<KeywordScanRequest>>,
    auth: AuthenticatedUser,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<KeywordScanReport>>, Json<StandardErrorResponse>> {
    handlers::keyword_scan_handler(request, auth, config).await
}

#[post("/analyze/skills-gap", data = "<request>")]
pub async fn analyze_skills_gap(
    request: Json<StandardRequest<SkillsGapRequest>>,
    auth: AuthenticatedUser,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<SkillsGapReport>>, Json<StandardErrorResponse>> {
    handlers::skills_gap_handler(request, auth, config).await
}

#[post("/cover-letter", data = "<request>")]
pub async fn generate_cover_letter(
    request: Json<StandardRequest<CoverLetterRequest>>,
    auth: AuthenticatedUser,
    config: &State<ServerConfig>,
) -> Result<Json<TextResponse>, Json<StandardErrorResponse>> {
    handlers::cover_letter_handler(request, auth, config).await
}

#[post("/jobs/search", data = "<request>")]
pub async fn search_jobs(
    request: Json<StandardRequest<JobSearchRequest>>,
    auth: AuthenticatedUser,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<Vec<JobPosting>>>, Json<StandardErrorResponse>> {
    handlers::search_jobs_handler(request, auth, config).await
}

#[get("/me")]
pub async fn get_current_user(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    handlers::get_current_user_handler(auth).await
}

#[get("/me", rank = 2)]
pub async fn get_current_user_error() -> Json<StandardErrorResponse> {
    handlers::get_current_user_error_handler().await
}

#[get("/health")]
pub async fn health(auth: OptionalAuth) -> Json<TextResponse> {
    handlers::health_handler(auth).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

// Main server start function
pub async fn start_web_server(
    config: ConfigManager,
    port: u16,
    auth_config: AuthConfig,
) -> Result<()> {
    let prompts = PromptLibrary::load(Path::new("prompts.yaml"))?;

    let server_config = ServerConfig {
        services: config.services.clone(),
        prompts,
    };

    let mut db_config = DatabaseConfig::new(config.environment.database_path.clone());

    if let Err(e) = db_config.init_pool().await {
        error!("Failed to initialize database: {}", e);
        return Err(e);
    }

    if let Err(e) = db_config.migrate().await {
        error!("Failed to run database migrations: {}", e);
        return Err(e);
    }

    info!("Starting CareerPilot API server on port {}", port);
    info!("Database: {}", db_config.database_path.display());
    info!("AI gateway: {}", config.services.ai_gateway_url);

    let figment = rocket::Config::figment().merge(("port", port));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(server_config)
        .manage(auth_config)
        .manage(db_config)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                score_resume,
                get_templates,
                save_resume,
                list_resumes,
                get_resume,
                update_resume,
                delete_resume,
                analyze_keywords,
                analyze_skills_gap,
                generate_cover_letter,
                search_jobs,
                get_current_user,
                get_current_user_error,
                health,
                options,
            ],
        )
        .launch()
        .await?;

    Ok(())
}

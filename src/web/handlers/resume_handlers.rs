// src/web/handlers/resume_handlers.rs - Saved-resume CRUD
use crate::auth::AuthenticatedUser;
use crate::database::{DatabaseConfig, ResumeRepository, StoredResume};
use crate::web::types::{
    ActionResponse, DataResponse, ResumeSummary, SavedResumeData, SaveResumeRequest,
    StandardErrorResponse, StandardRequest, UpdateResumeRequest, WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn save_resume_handler(
    request: Json<StandardRequest<SaveResumeRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<ResumeSummary>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let account = auth.account();

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => return Err(database_error(e, conversation_id)),
    };

    let title = request
        .data
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| request.data.resume.default_title());
    let template = request
        .data
        .template
        .clone()
        .unwrap_or_else(|| "classic-minimal".to_string());

    let repo = ResumeRepository::new(pool);
    match repo
        .insert(account.id, &title, &template, &request.data.resume)
        .await
    {
        Ok(stored) => {
            info!("User {} saved resume: {}", auth.email(), stored.id);
            Ok(Json(DataResponse::success(
                format!("Resume '{}' saved", stored.title),
                summarize(&stored),
                conversation_id,
            )))
        }
        Err(e) => {
            error!("Failed to save resume for {}: {}", auth.email(), e);
            Err(database_error(e, conversation_id))
        }
    }
}

pub async fn list_resumes_handler(
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<Vec<ResumeSummary>>>, Json<StandardErrorResponse>> {
    let account = auth.account();

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => return Err(database_error(e, None)),
    };

    let repo = ResumeRepository::new(pool);
    match repo.list_for_account(account.id).await {
        Ok(resumes) => {
            let summaries: Vec<ResumeSummary> = resumes.iter().map(summarize).collect();
            Ok(Json(DataResponse::success(
                format!("{} saved resumes", summaries.len()),
                summaries,
                None,
            )))
        }
        Err(e) => {
            error!("Failed to list resumes for {}: {}", auth.email(), e);
            Err(database_error(e, None))
        }
    }
}

pub async fn get_resume_handler(
    resume_id: String,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<SavedResumeData>>, Json<StandardErrorResponse>> {
    let account = auth.account();

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => return Err(database_error(e, None)),
    };

    let repo = ResumeRepository::new(pool);
    let stored = match repo.find(account.id, &resume_id).await {
        Ok(Some(stored)) => stored,
        Ok(None) => return Err(not_found(&resume_id)),
        Err(e) => {
            error!("Failed to load resume {}: {}", resume_id, e);
            return Err(database_error(e, None));
        }
    };

    let record = match stored.record() {
        Ok(record) => record,
        Err(e) => {
            error!("Corrupt payload for resume {}: {}", resume_id, e);
            return Err(Json(StandardErrorResponse::new(
                "Stored resume payload could not be read".to_string(),
                "CORRUPT_RESUME".to_string(),
                vec!["Delete this resume and save it again".to_string()],
                None,
            )));
        }
    };

    Ok(Json(DataResponse::success(
        format!("Resume '{}'", stored.title),
        SavedResumeData {
            id: stored.id,
            title: stored.title,
            template: stored.template,
            resume: record,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        },
        None,
    )))
}

pub async fn update_resume_handler(
    resume_id: String,
    request: Json<StandardRequest<UpdateResumeRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<ResumeSummary>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let account = auth.account();

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => return Err(database_error(e, conversation_id)),
    };

    let repo = ResumeRepository::new(pool);
    match repo
        .update_payload(account.id, &resume_id, &request.data.resume)
        .await
    {
        Ok(true) => {}
        Ok(false) => return Err(not_found(&resume_id)),
        Err(e) => {
            error!("Failed to update resume {}: {}", resume_id, e);
            return Err(database_error(e, conversation_id));
        }
    }

    match repo.find(account.id, &resume_id).await {
        Ok(Some(stored)) => {
            info!("User {} updated resume: {}", auth.email(), resume_id);
            Ok(Json(DataResponse::success(
                format!("Resume '{}' updated", stored.title),
                summarize(&stored),
                conversation_id,
            )))
        }
        Ok(None) => Err(not_found(&resume_id)),
        Err(e) => {
            error!("Failed to reload resume {}: {}", resume_id, e);
            Err(database_error(e, conversation_id))
        }
    }
}

pub async fn delete_resume_handler(
    resume_id: String,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let account = auth.account();

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => return Err(database_error(e, None)),
    };

    let repo = ResumeRepository::new(pool);
    match repo.delete(account.id, &resume_id).await {
        Ok(true) => {
            info!("User {} deleted resume: {}", auth.email(), resume_id);
            Ok(Json(ActionResponse::success(
                "Resume deleted".to_string(),
                "delete_resume".to_string(),
                None,
            )))
        }
        Ok(false) => Err(not_found(&resume_id)),
        Err(e) => {
            error!("Failed to delete resume {}: {}", resume_id, e);
            Err(database_error(e, None))
        }
    }
}

fn summarize(stored: &StoredResume) -> ResumeSummary {
    ResumeSummary {
        id: stored.id.clone(),
        title: stored.title.clone(),
        template: stored.template.clone(),
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    }
}

fn database_error(
    e: anyhow::Error,
    conversation_id: Option<String>,
) -> Json<StandardErrorResponse> {
    error!("Database operation failed: {}", e);
    Json(StandardErrorResponse::new(
        "Database operation failed".to_string(),
        "DATABASE_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
        conversation_id,
    ))
}

fn not_found(resume_id: &str) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("Resume not found: {}", resume_id),
        "RESUME_NOT_FOUND".to_string(),
        vec![
            "Check the resume id".to_string(),
            "List your saved resumes to see available ids".to_string(),
        ],
        None,
    ))
}

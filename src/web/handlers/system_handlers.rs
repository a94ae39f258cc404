// src/web/handlers/system_handlers.rs
use crate::auth::{AuthenticatedUser, OptionalAuth};
use crate::web::types::{DataResponse, StandardErrorResponse, TextResponse, UserInfo};

use rocket::serde::json::Json;
use tracing::info;

pub async fn get_current_user_handler(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    let user = auth.user();
    let account = auth.account();

    Json(DataResponse::success(
        format!("Authenticated as {}", user.email),
        UserInfo {
            uid: user.uid.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            account_name: account.account_name.clone(),
        },
        None,
    ))
}

pub async fn get_current_user_error_handler() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Authentication required".to_string(),
        "AUTHORIZATION_ERROR".to_string(),
        vec![
            "Login is required".to_string(),
            "Provide a valid bearer token".to_string(),
        ],
        None,
    ))
}

pub async fn health_handler(auth: OptionalAuth) -> Json<TextResponse> {
    if let Some(user) = auth.user {
        info!(
            "Health check by authenticated user: {} (account: {})",
            user.email(),
            user.account().account_name
        );
    } else {
        info!("Health check by anonymous user");
    }
    Json(TextResponse::success("OK".to_string(), None))
}

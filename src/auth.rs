// src/auth.rs
use crate::database::{Account, AccountService, DatabaseConfig};
use anyhow::Result;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiUser {
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub name: Option<String>,
    pub exp: usize, // Expiration timestamp
    pub iat: usize, // Issued at timestamp
}

impl From<Claims> for ApiUser {
    fn from(claims: Claims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

pub struct AuthConfig {
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Read the signing secret from the environment
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("AUTH_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("AUTH_JWT_SECRET environment variable not set"))?;
        Ok(Self::new(secret))
    }
}

/// Authenticated user with account information
pub struct AuthenticatedUser {
    pub api_user: ApiUser,
    pub account: Account,
}

impl AuthenticatedUser {
    pub fn user(&self) -> &ApiUser {
        &self.api_user
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn email(&self) -> &str {
        &self.api_user.email
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let db_config = match req.guard::<&State<DatabaseConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        // Extract Authorization header
        let token = match req.headers().get_one("Authorization") {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            Some(_) => {
                warn!("Invalid Authorization header format");
                return Outcome::Error((Status::Unauthorized, AuthError::InvalidToken));
            }
            None => {
                warn!("Missing Authorization header");
                return Outcome::Error((Status::Unauthorized, AuthError::MissingToken));
            }
        };

        let api_user = match verify_token(token, auth_config) {
            Ok(user) => user,
            Err(e) => {
                error!("Token verification failed: {}", e);
                return Outcome::Error((Status::Unauthorized, AuthError::TokenVerificationFailed));
            }
        };

        let pool = match db_config.pool() {
            Ok(pool) => pool,
            Err(e) => {
                error!("Database connection failed: {}", e);
                return Outcome::Error((Status::InternalServerError, AuthError::DatabaseError));
            }
        };

        let account_service = AccountService::new(pool);
        let account = match account_service.get_or_create(&api_user.email).await {
            Ok(account) => account,
            Err(e) => {
                error!(
                    "Failed to get or create account for {}: {}",
                    api_user.email, e
                );
                return Outcome::Error((Status::InternalServerError, AuthError::DatabaseError));
            }
        };

        info!(
            "User {} authenticated for account: {}",
            api_user.email, account.account_name
        );

        Outcome::Success(AuthenticatedUser { api_user, account })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    TokenVerificationFailed,
    DatabaseError,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authorization token required",
            AuthError::InvalidToken => "Invalid authorization token format",
            AuthError::TokenVerificationFailed => "Token verification failed",
            AuthError::DatabaseError => "Database error occurred",
        }
    }
}

fn verify_token(token: &str, auth_config: &AuthConfig) -> Result<ApiUser> {
    let validation = Validation::new(Algorithm::HS256);
    let decoding_key = DecodingKey::from_secret(auth_config.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

    Ok(token_data.claims.into())
}

// Optional auth guard that doesn't fail if no auth is provided
pub struct OptionalAuth {
    pub user: Option<AuthenticatedUser>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthenticatedUser::from_request(req).await {
            Outcome::Success(auth) => Outcome::Success(OptionalAuth { user: Some(auth) }),
            _ => Outcome::Success(OptionalAuth { user: None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(secret: &str, exp_offset: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            exp: (now + exp_offset) as usize,
            iat: now as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_auth_config_from_env() {
        std::env::set_var("AUTH_JWT_SECRET", "env-secret");
        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.jwt_secret, "env-secret");

        std::env::remove_var("AUTH_JWT_SECRET");
        assert!(AuthConfig::from_env().is_err());
    }

    #[test]
    fn test_verify_token_roundtrip() {
        let config = AuthConfig::new("test-secret".to_string());
        let token = make_token("test-secret", 3600);

        let user = verify_token(&token, &config).unwrap();
        assert_eq!(user.uid, "user-1");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_verify_token_rejects_wrong_secret() {
        let config = AuthConfig::new("test-secret".to_string());
        let token = make_token("other-secret", 3600);
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_verify_token_rejects_expired() {
        let config = AuthConfig::new("test-secret".to_string());
        let token = make_token("test-secret", -3600);
        assert!(verify_token(&token, &config).is_err());
    }
}

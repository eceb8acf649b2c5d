use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::config;
use crate::db::dbstore;
use crate::models::{
    ErrorResponse, LoginRequest, RegisterRequest, RegisterResponse, ServiceError, TokenResponse,
};
use crate::services::auth_service;

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ServiceError> {
    let db = dbstore::require_db()?;

    let user_id = auth_service::authenticate_user(&db, &payload.username, &payload.password).await?;

    let config = config::get_config();
    let token = auth_service::issue_token(&user_id, &config.jwt_secret_key)?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    )
)]
pub async fn register(
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ServiceError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ServiceError::BadRequest(
            "Username and password must not be empty".to_string(),
        ));
    }

    let db = dbstore::require_db()?;

    if db.get_user_by_username(&payload.username).await?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "Username '{}' already taken",
            payload.username
        )));
    }

    let user_id = Uuid::new_v4().to_string();
    let password_hash = auth_service::hash_password(&payload.password);
    db.insert_user(&user_id, &payload.username, &password_hash).await?;

    info!("Registered user {} ({})", payload.username, user_id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            username: payload.username,
        }),
    ))
}

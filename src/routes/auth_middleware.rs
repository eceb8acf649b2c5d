use axum::{extract::Request, middleware::Next, response::Response};
use tracing::error;

use crate::config;
use crate::models::ServiceError;
use crate::services::auth_service::{get_auth_token, validate_jwt};

/// Validate the bearer token and put the authenticated user id into request
/// extensions for downstream handlers.
pub async fn auth_middleware(mut req: Request, next: Next) -> Result<Response, ServiceError> {
    // 1. Get the auth token from the request
    let token = match get_auth_token(&req) {
        Ok(token) => token,
        Err(e) => return Err(ServiceError::Unauthorized(e)),
    };

    // 2. Validate the token
    let config = config::get_config();
    let token_data = match validate_jwt(&token, &config.jwt_secret_key) {
        Ok(token_data) => token_data,
        Err(e) => {
            error!("JWT validation failed: {}", e);
            return Err(ServiceError::Unauthorized("Invalid token".to_string()));
        }
    };

    // 3. Extract the user id
    let user_id = match token_data.claims.get("sub").and_then(|v| v.as_str()) {
        Some(sub) => sub.to_string(),
        None => {
            error!("JWT token does not contain 'sub' claim");
            return Err(ServiceError::Unauthorized("Invalid token".to_string()));
        }
    };

    // 4. Set the user id into request extensions for downstream handlers
    req.extensions_mut().insert(user_id);

    // Token is valid, proceed to next middleware/handler
    Ok(next.run(req).await)
}

use axum::http::{self};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::db::dbstore::DbStore;
use crate::models::ServiceError;

/// Token lifetime, matching the original backend's 1-day expiry.
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

// Get the auth token from a request
pub fn get_auth_token<B>(req: &http::Request<B>) -> Result<String, String> {
    // 1. Try to get token from Authorization header
    if let Some(auth_header) = req.headers().get(http::header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| "Invalid Authorization header".to_string())?;
        Ok(auth_str
            .strip_prefix("Bearer ")
            .unwrap_or(auth_str)
            .to_string())
    }
    // 2. Try to get token from cookies
    else {
        let cookie_header = req
            .headers()
            .get(http::header::COOKIE)
            .ok_or_else(|| "Missing Authorization header or Cookie".to_string())?
            .to_str()
            .map_err(|_| "Invalid Cookie header".to_string())?;

        for cookie in cookie::Cookie::split_parse(cookie_header) {
            if let Ok(c) = cookie {
                if c.name() == "auth_token" {
                    return Ok(c.value().to_string());
                }
            }
        }
        Err("auth_token cookie not found".to_string())
    }
}

/// SHA-256 hex digest of a password, the credential scheme of the user store.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{:x}", digest)
}

/// Verify credentials against the user store and return the user id.
pub async fn authenticate_user(
    db: &DbStore,
    username: &str,
    password: &str,
) -> Result<String, ServiceError> {
    let user = db
        .get_user_by_username(username)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("Invalid credentials".to_string()))?;

    if user.password_hash != hash_password(password) {
        return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
    }

    info!("User {} authenticated successfully", user.id);
    Ok(user.id)
}

/// Issue a signed bearer token for a user id.
pub fn issue_token(user_id: &str, secret: &str) -> Result<String, ServiceError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| ServiceError::Internal("Token expiry overflow".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(format!("Failed to sign token: {}", e)))
}

// Validate a JWT token and return the token data
pub fn validate_jwt(
    token: &str,
    secret: &str,
) -> Result<TokenData<serde_json::Value>, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<serde_json::Value>(token, &decoding_key, &validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_deterministic_sha256_hex() {
        assert_eq!(hash_password("secret"), hash_password("secret"));
        assert_ne!(hash_password("secret"), hash_password("other"));
        // Known digest of the empty string.
        assert_eq!(
            hash_password(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn issued_tokens_validate_and_carry_the_user_id() {
        let token = issue_token("user-42", "test-secret").expect("token issued");
        let data = validate_jwt(&token, "test-secret").expect("token valid");
        assert_eq!(
            data.claims.get("sub").and_then(|v| v.as_str()),
            Some("user-42")
        );
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = issue_token("user-42", "test-secret").expect("token issued");
        assert!(validate_jwt(&token, "wrong-secret").is_err());
    }

    #[tokio::test]
    async fn authenticate_user_checks_the_stored_hash() {
        let db = DbStore::connect("sqlite::memory:").await.unwrap();
        db.insert_user("u1", "alice", &hash_password("pw"))
            .await
            .unwrap();

        assert_eq!(authenticate_user(&db, "alice", "pw").await.unwrap(), "u1");
        assert!(matches!(
            authenticate_user(&db, "alice", "nope").await,
            Err(ServiceError::Unauthorized(_))
        ));
        assert!(matches!(
            authenticate_user(&db, "ghost", "pw").await,
            Err(ServiceError::Unauthorized(_))
        ));
    }
}

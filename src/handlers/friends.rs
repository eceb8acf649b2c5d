use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use tracing::info;

use crate::db::dbstore;
use crate::models::{ErrorResponse, FriendEntry, FriendResponse, FriendStatusRequest, ServiceError};

/// Send a friend request to another user
#[utoipa::path(
    post,
    path = "/api/friends/{friend_id}",
    params(
        ("friend_id" = String, Path, description = "Target user identifier")
    ),
    responses(
        (status = 201, description = "Request recorded", body = FriendResponse),
        (status = 404, description = "Target user not found", body = ErrorResponse),
        (status = 409, description = "Relationship already exists", body = ErrorResponse)
    )
)]
pub async fn add_friend(
    Path(friend_id): Path<String>,
    Extension(user_id): Extension<String>,
) -> Result<(StatusCode, Json<FriendResponse>), ServiceError> {
    if friend_id == user_id {
        return Err(ServiceError::BadRequest(
            "Cannot send a friend request to yourself".to_string(),
        ));
    }

    let db = dbstore::require_db()?;

    if db.get_user_by_id(&friend_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "User '{}' not found",
            friend_id
        )));
    }

    if !db.insert_friend(&user_id, &friend_id, "pending").await? {
        return Err(ServiceError::Conflict(
            "A friend request between these users already exists".to_string(),
        ));
    }

    info!("Friend request from {} to {}", user_id, friend_id);

    Ok((
        StatusCode::CREATED,
        Json(FriendResponse {
            status: "pending".to_string(),
        }),
    ))
}

/// Accept or reject a pending friend request
#[utoipa::path(
    put,
    path = "/api/friends/{friend_id}",
    params(
        ("friend_id" = String, Path, description = "User whose request is being answered")
    ),
    request_body = FriendStatusRequest,
    responses(
        (status = 200, description = "Request updated", body = FriendResponse),
        (status = 404, description = "No such request", body = ErrorResponse)
    )
)]
pub async fn respond_friend(
    Path(friend_id): Path<String>,
    Extension(user_id): Extension<String>,
    Json(payload): Json<FriendStatusRequest>,
) -> Result<Json<FriendResponse>, ServiceError> {
    if payload.status != "accepted" && payload.status != "rejected" {
        return Err(ServiceError::BadRequest(
            "Status must be 'accepted' or 'rejected'".to_string(),
        ));
    }

    let db = dbstore::require_db()?;

    // The request row is keyed by its sender; the receiver answers it.
    if !db
        .update_friend_status(&friend_id, &user_id, &payload.status)
        .await?
    {
        return Err(ServiceError::NotFound(format!(
            "No friend request from '{}'",
            friend_id
        )));
    }

    info!(
        "Friend request from {} to {} marked {}",
        friend_id, user_id, payload.status
    );

    Ok(Json(FriendResponse {
        status: payload.status,
    }))
}

/// List the user's friend relationships on both sides
#[utoipa::path(
    get,
    path = "/api/friends",
    responses(
        (status = 200, description = "Friend relationships", body = [FriendEntry])
    )
)]
pub async fn list_friends(
    Extension(user_id): Extension<String>,
) -> Result<Json<Vec<FriendEntry>>, ServiceError> {
    let db = dbstore::require_db()?;

    let rows = db.list_friends(&user_id).await?;
    Ok(Json(
        rows.into_iter()
            .map(|f| FriendEntry {
                user_id: f.user_id,
                friend_id: f.friend_id,
                status: f.status,
                created_at: f.created_at,
            })
            .collect(),
    ))
}

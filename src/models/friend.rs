use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A friend relationship row
#[derive(Serialize, Deserialize, ToSchema)]
pub struct FriendEntry {
    pub user_id: String,
    pub friend_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for answering a friend request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct FriendStatusRequest {
    /// Either "accepted" or "rejected"
    pub status: String,
}

/// Response for friend mutations
#[derive(Serialize, Deserialize, ToSchema)]
pub struct FriendResponse {
    pub status: String,
}

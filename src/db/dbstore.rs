use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Error as SqlxError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

// Global database instance
static DB: OnceCell<Arc<DbStore>> = OnceCell::const_new();

/// Initialize the global database connection
///
/// # Arguments
/// * `database_url` - SQLite connection string
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error
pub async fn init_db(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = DbStore::connect(database_url).await?;
    DB.set(Arc::new(db))
        .map_err(|_| "Database already initialized")?;
    Ok(())
}

/// Get the global database instance
pub fn get_db() -> Option<Arc<DbStore>> {
    DB.get().cloned()
}

/// Get the global database instance or fail with an internal error.
pub fn require_db() -> Result<Arc<DbStore>, crate::models::ServiceError> {
    get_db().ok_or_else(|| crate::models::ServiceError::Internal("Database not initialized".to_string()))
}

/// User row from the users table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Document row with content
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentRow {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub content: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Document row without content, for listings
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentSummaryRow {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Document version row, without the content blob
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VersionRow {
    pub id: String,
    pub document_id: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

/// Friend relationship row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FriendRow {
    pub user_id: String,
    pub friend_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Database connection pool
pub struct DbStore {
    pool: SqlitePool,
}

impl DbStore {
    /// Create a new database connection pool and ensure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, SqlxError> {
        info!("Connecting to database...");

        // An in-memory SQLite database exists per connection; keep a single
        // one so every query sees the same data.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 20 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        info!("Database connection pool created successfully");

        Ok(db)
    }

    /// Create the tables if they do not exist yet.
    async fn migrate(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE,
                password_hash TEXT,
                created_at TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                title TEXT,
                owner_id TEXT,
                content BLOB,
                created_at TIMESTAMP,
                updated_at TIMESTAMP,
                FOREIGN KEY (owner_id) REFERENCES users (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS document_versions (
                id TEXT PRIMARY KEY,
                document_id TEXT,
                content BLOB,
                created_at TIMESTAMP,
                created_by TEXT,
                FOREIGN KEY (document_id) REFERENCES documents (id),
                FOREIGN KEY (created_by) REFERENCES users (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS document_permissions (
                document_id TEXT,
                user_id TEXT,
                permission TEXT,
                FOREIGN KEY (document_id) REFERENCES documents (id),
                FOREIGN KEY (user_id) REFERENCES users (id),
                PRIMARY KEY (document_id, user_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS friends (
                user_id TEXT,
                friend_id TEXT,
                status TEXT,
                created_at TIMESTAMP,
                FOREIGN KEY (user_id) REFERENCES users (id),
                FOREIGN KEY (friend_id) REFERENCES users (id),
                PRIMARY KEY (user_id, friend_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ---- users ----

    pub async fn insert_user(
        &self,
        id: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<(), SqlxError> {
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, SqlxError> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>, SqlxError> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    // ---- documents ----

    pub async fn insert_document(
        &self,
        id: &str,
        title: &str,
        owner_id: &str,
        content: &[u8],
    ) -> Result<(), SqlxError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO documents (id, title, owner_id, content, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(owner_id)
        .bind(content)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_document(&self, id: &str) -> Result<Option<DocumentRow>, SqlxError> {
        sqlx::query_as::<_, DocumentRow>("SELECT * FROM documents WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Fetch only the owner of a document.
    pub async fn get_document_owner(&self, id: &str) -> Result<Option<String>, SqlxError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT owner_id FROM documents WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(owner_id,)| owner_id))
    }

    /// Documents the user owns or holds any permission on.
    pub async fn list_documents_for(
        &self,
        user_id: &str,
    ) -> Result<Vec<DocumentSummaryRow>, SqlxError> {
        sqlx::query_as::<_, DocumentSummaryRow>(
            r#"
            SELECT DISTINCT d.id, d.title, d.owner_id, d.created_at, d.updated_at
            FROM documents d
            LEFT JOIN document_permissions p ON d.id = p.document_id
            WHERE d.owner_id = ?1 OR p.user_id = ?1
            ORDER BY d.updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Replace a document's content, snapshotting the previous content into
    /// the version history. Returns the id of the created version.
    pub async fn update_content_with_version(
        &self,
        document_id: &str,
        content: &[u8],
        updated_by: &str,
    ) -> Result<Option<String>, SqlxError> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<(Vec<u8>,)> =
            sqlx::query_as("SELECT content FROM documents WHERE id = ?1")
                .bind(document_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous_content,)) = previous else {
            return Ok(None);
        };

        let version_id = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO document_versions (id, document_id, content, created_at, created_by)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&version_id)
        .bind(document_id)
        .bind(&previous_content)
        .bind(Utc::now())
        .bind(updated_by)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE documents SET content = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(content)
            .bind(Utc::now())
            .bind(document_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(version_id))
    }

    pub async fn list_versions(&self, document_id: &str) -> Result<Vec<VersionRow>, SqlxError> {
        sqlx::query_as::<_, VersionRow>(
            r#"
            SELECT id, document_id, created_at, created_by
            FROM document_versions
            WHERE document_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
    }

    // ---- permissions ----

    pub async fn upsert_permission(
        &self,
        document_id: &str,
        user_id: &str,
        permission: &str,
    ) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO document_permissions (document_id, user_id, permission)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(document_id)
        .bind(user_id)
        .bind(permission)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_permission(
        &self,
        document_id: &str,
        user_id: &str,
    ) -> Result<Option<String>, SqlxError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT permission FROM document_permissions WHERE document_id = ?1 AND user_id = ?2",
        )
        .bind(document_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(permission,)| permission))
    }

    // ---- friends ----

    /// Record a pending friend request. Returns false when a relationship
    /// between the pair already exists.
    pub async fn insert_friend(
        &self,
        user_id: &str,
        friend_id: &str,
        status: &str,
    ) -> Result<bool, SqlxError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO friends (user_id, friend_id, status, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update the status of an existing request. Returns false when no such
    /// request exists.
    pub async fn update_friend_status(
        &self,
        user_id: &str,
        friend_id: &str,
        status: &str,
    ) -> Result<bool, SqlxError> {
        let result =
            sqlx::query("UPDATE friends SET status = ?1 WHERE user_id = ?2 AND friend_id = ?3")
                .bind(status)
                .bind(user_id)
                .bind(friend_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All relationships the user is part of, on either side.
    pub async fn list_friends(&self, user_id: &str) -> Result<Vec<FriendRow>, SqlxError> {
        sqlx::query_as::<_, FriendRow>(
            r#"
            SELECT user_id, friend_id, status, created_at
            FROM friends
            WHERE user_id = ?1 OR friend_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_db() -> DbStore {
        DbStore::connect("sqlite::memory:")
            .await
            .expect("in-memory database")
    }

    #[tokio::test]
    async fn user_round_trip() {
        let db = memory_db().await;
        db.insert_user("u1", "alice", "hash").await.unwrap();

        let user = db.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.password_hash, "hash");

        assert!(db.get_user_by_username("bob").await.unwrap().is_none());
        assert!(db.get_user_by_id("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn document_owner_lookup() {
        let db = memory_db().await;
        db.insert_user("u1", "alice", "hash").await.unwrap();
        db.insert_document("d1", "notes", "u1", b"hello").await.unwrap();

        assert_eq!(db.get_document_owner("d1").await.unwrap(), Some("u1".to_string()));
        assert_eq!(db.get_document_owner("missing").await.unwrap(), None);

        let doc = db.get_document("d1").await.unwrap().unwrap();
        assert_eq!(doc.title, "notes");
        assert_eq!(doc.content, b"hello");
    }

    #[tokio::test]
    async fn permission_upsert_overwrites() {
        let db = memory_db().await;
        db.insert_user("u1", "alice", "hash").await.unwrap();
        db.insert_document("d1", "notes", "u1", b"hello").await.unwrap();

        db.upsert_permission("d1", "u2", "read").await.unwrap();
        db.upsert_permission("d1", "u2", "write").await.unwrap();

        assert_eq!(db.get_permission("d1", "u2").await.unwrap(), Some("write".to_string()));
        assert_eq!(db.get_permission("d1", "u3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn content_update_snapshots_previous_version() {
        let db = memory_db().await;
        db.insert_user("u1", "alice", "hash").await.unwrap();
        db.insert_document("d1", "notes", "u1", b"v1").await.unwrap();

        let version_id = db
            .update_content_with_version("d1", b"v2", "u1")
            .await
            .unwrap()
            .expect("document exists");

        let doc = db.get_document("d1").await.unwrap().unwrap();
        assert_eq!(doc.content, b"v2");

        let versions = db.list_versions("d1").await.unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].id, version_id);
        assert_eq!(versions[0].created_by, "u1");

        // Updating a missing document creates no version.
        assert!(db
            .update_content_with_version("missing", b"x", "u1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn listing_includes_owned_and_shared_documents() {
        let db = memory_db().await;
        db.insert_user("u1", "alice", "hash").await.unwrap();
        db.insert_user("u2", "bob", "hash").await.unwrap();
        db.insert_document("d1", "mine", "u1", b"a").await.unwrap();
        db.insert_document("d2", "theirs", "u2", b"b").await.unwrap();
        db.insert_document("d3", "shared", "u2", b"c").await.unwrap();
        db.upsert_permission("d3", "u1", "read").await.unwrap();

        let docs = db.list_documents_for("u1").await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert!(ids.contains(&"d1"));
        assert!(ids.contains(&"d3"));
        assert!(!ids.contains(&"d2"));
    }

    #[tokio::test]
    async fn friend_request_lifecycle() {
        let db = memory_db().await;
        db.insert_user("u1", "alice", "hash").await.unwrap();
        db.insert_user("u2", "bob", "hash").await.unwrap();

        assert!(db.insert_friend("u1", "u2", "pending").await.unwrap());
        // A duplicate request is ignored.
        assert!(!db.insert_friend("u1", "u2", "pending").await.unwrap());

        assert!(db.update_friend_status("u1", "u2", "accepted").await.unwrap());
        assert!(!db.update_friend_status("u2", "u1", "accepted").await.unwrap());

        let friends = db.list_friends("u2").await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].status, "accepted");
    }
}

use moka::sync::Cache;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::info;

use crate::db::dbstore::DbStore;
use crate::models::ServiceError;

/// Cache of document_id -> owner_id. Ownership never changes after creation,
/// so entries only ever expire, never go stale.
static OWNER_CACHE: OnceLock<Cache<String, String>> = OnceLock::new();

fn get_owner_cache() -> &'static Cache<String, String> {
    OWNER_CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(100_000)
            .time_to_idle(Duration::from_secs(5 * 60))
            .build()
    })
}

async fn get_or_fetch_owner(db: &DbStore, document_id: &str) -> Result<Option<String>, ServiceError> {
    let cache = get_owner_cache();

    if let Some(owner) = cache.get(document_id) {
        return Ok(Some(owner));
    }

    let owner = db.get_document_owner(document_id).await?;
    if let Some(owner) = &owner {
        cache.insert(document_id.to_string(), owner.clone());
    }
    Ok(owner)
}

/// Grant or change a permission on a document.
///
/// Only the document's owner may mutate permissions; anyone else fails with
/// an authorization error and nothing is written.
pub async fn set_permission(
    db: &DbStore,
    document_id: &str,
    requester_id: &str,
    target_user_id: &str,
    level: &str,
) -> Result<(), ServiceError> {
    let owner = get_or_fetch_owner(db, document_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Document '{}' not found", document_id)))?;

    if owner != requester_id {
        return Err(ServiceError::Authorization(
            "Only the document owner can change permissions".to_string(),
        ));
    }

    db.upsert_permission(document_id, target_user_id, level).await?;

    info!(
        "Permission '{}' on document {} granted to user {}",
        level, document_id, target_user_id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth_service::hash_password;
    use uuid::Uuid;

    async fn db_with_document(owner: &str) -> (DbStore, String) {
        let db = DbStore::connect("sqlite::memory:").await.unwrap();
        db.insert_user(owner, &format!("user-{}", owner), &hash_password("pw"))
            .await
            .unwrap();
        // Unique per test run; the owner cache is process-wide.
        let document_id = Uuid::new_v4().to_string();
        db.insert_document(&document_id, "notes", owner, b"content")
            .await
            .unwrap();
        (db, document_id)
    }

    #[tokio::test]
    async fn owner_can_grant_permissions() {
        let (db, document_id) = db_with_document("owner-1").await;

        set_permission(&db, &document_id, "owner-1", "friend-1", "write")
            .await
            .unwrap();

        assert_eq!(
            db.get_permission(&document_id, "friend-1").await.unwrap(),
            Some("write".to_string())
        );
    }

    #[tokio::test]
    async fn non_owner_is_rejected_and_nothing_is_written() {
        let (db, document_id) = db_with_document("owner-1").await;

        let result = set_permission(&db, &document_id, "intruder", "friend-1", "write").await;
        assert!(matches!(result, Err(ServiceError::Authorization(_))));

        assert_eq!(db.get_permission(&document_id, "friend-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_document_reports_not_found() {
        let db = DbStore::connect("sqlite::memory:").await.unwrap();
        let unknown = Uuid::new_v4().to_string();

        let result = set_permission(&db, &unknown, "anyone", "friend-1", "read").await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn repeated_grants_use_the_cached_owner() {
        let (db, document_id) = db_with_document("owner-1").await;

        set_permission(&db, &document_id, "owner-1", "friend-1", "read")
            .await
            .unwrap();
        // Second grant resolves the owner from the cache and still enforces
        // the ownership check.
        let result = set_permission(&db, &document_id, "intruder", "friend-2", "read").await;
        assert!(matches!(result, Err(ServiceError::Authorization(_))));
        assert_eq!(db.get_permission(&document_id, "friend-2").await.unwrap(), None);
    }
}

//! Generic per-request orchestration shared by every entity handler:
//! assign id -> validate -> stamp -> delegate to the persistence adapter.
//! Terminal on first error; the only side effect is the adapter call.

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Entity;
use crate::store::Collection;

/// Create a record: assign a fresh id when the client supplied none,
/// validate, stamp both timestamps, then conditionally write.
pub async fn create_record<T: Entity>(
    collection: &Collection<T>,
    mut record: T,
) -> Result<T, ApiError> {
    if record.id().is_empty() {
        record.set_id(Uuid::new_v4().to_string());
    }
    record.validate()?;

    let now = Utc::now();
    record.stamp_created(now);
    record.stamp_updated(now);

    collection.create(&record).await?;
    Ok(record)
}

pub async fn fetch_record<T: Entity>(
    collection: &Collection<T>,
    id: &str,
) -> Result<T, ApiError> {
    Ok(collection.get(id).await?)
}

pub async fn list_records<T: Entity>(collection: &Collection<T>) -> Result<Vec<T>, ApiError> {
    Ok(collection.scan_all().await?)
}

/// Partial update: read, merge via the caller's closure, re-validate the
/// merged record, re-stamp `updated_at`, then conditionally write. The write
/// precondition catches an id deleted since the read; there is no version
/// check, so two concurrent updates race last-writer-wins.
pub async fn update_record<T, F>(
    collection: &Collection<T>,
    id: &str,
    merge: F,
) -> Result<T, ApiError>
where
    T: Entity,
    F: FnOnce(&mut T),
{
    let mut record = collection.get(id).await?;
    merge(&mut record);
    record.validate()?;
    record.stamp_updated(Utc::now());

    collection.update(&record).await?;
    Ok(record)
}

pub async fn delete_record<T: Entity>(
    collection: &Collection<T>,
    id: &str,
) -> Result<(), ApiError> {
    Ok(collection.delete(id).await?)
}

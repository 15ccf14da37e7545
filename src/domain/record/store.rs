use async_trait::async_trait;
use mongodb::bson::Document;

use crate::domain::record::model::{Record, RecordKind, StoredRecord};
use crate::utils::errors::AppError;

/// Per-user list/create access to records. Implementations must only ever
/// return records owned by `user_id`, in the store's own order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_records(&self, user_id: &str, kind: RecordKind) -> Result<Vec<StoredRecord>, AppError>;
    async fn create_record(&self, user_id: &str, kind: RecordKind, fields: Document) -> Result<String, AppError>;
}

/// Decodes stored records in order, skipping any that fail the default policy.
pub fn decode_records<R: Record>(stored: Vec<StoredRecord>) -> Vec<R> {
    stored
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match R::from_stored(record) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    log::warn!("Skipping undecodable {} record {}: {}", R::KIND.collection_name(), id, e);
                    None
                }
            }
        })
        .collect()
}

/// Lists and decodes `R` records for `user_id`.
pub async fn list_typed<R: Record>(store: &dyn RecordStore, user_id: &str) -> Result<Vec<R>, AppError> {
    let stored = store.list_records(user_id, R::KIND).await?;
    Ok(decode_records(stored))
}

use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;

use crate::domain::record::{RecordKind, RecordStore, StoredRecord};
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::errors::AppError;

const OWNER_FIELD: &str = "user_id";

/// One collection per record kind; every document carries its owner's uid.
pub struct MongoRecordStore {
    pets: Collection<Document>,
    owners: Collection<Document>,
}

impl MongoRecordStore {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            pets: context.collection(RecordKind::Pets.collection_name()),
            owners: context.collection(RecordKind::Owners.collection_name()),
        }
    }

    fn collection(&self, kind: RecordKind) -> &Collection<Document> {
        match kind {
            RecordKind::Pets => &self.pets,
            RecordKind::Owners => &self.owners,
        }
    }
}

fn into_stored(mut document: Document) -> Result<StoredRecord, AppError> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        Some(other) => other.to_string(),
        None => return Err(AppError::InvalidData("record without _id".to_string())),
    };
    document.remove(OWNER_FIELD);
    Ok(StoredRecord::new(id, document))
}

#[async_trait]
impl RecordStore for MongoRecordStore {

    async fn list_records(&self, user_id: &str, kind: RecordKind) -> Result<Vec<StoredRecord>, AppError> {
        if user_id.is_empty() {
            return Err(AppError::InvalidData("user id cannot be empty".to_string()));
        }

        let mut filter = Document::new();
        filter.insert(OWNER_FIELD, user_id);

        let mut cursor = self.collection(kind)
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await?;
        let mut records = Vec::new();

        while let Some(document) = cursor.next().await {
            match document {
                Ok(document) => records.push(into_stored(document)?),
                Err(e) => return Err(AppError::MongoError(e)),
            }
        }

        log::debug!("Fetched {} {} documents for user {}", records.len(), kind.collection_name(), user_id);
        Ok(records)
    }

    async fn create_record(&self, user_id: &str, kind: RecordKind, fields: Document) -> Result<String, AppError> {
        if user_id.is_empty() {
            return Err(AppError::InvalidData("user id cannot be empty".to_string()));
        }

        let mut document = fields;
        document.remove("_id");
        document.insert(OWNER_FIELD, user_id);

        let result = self.collection(kind).insert_one(document).await?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            other => Err(AppError::InvalidData(format!("unexpected inserted id {}", other))),
        }
    }
}

use crate::domain::record::{OwnerContact, Pet, Record, RecordStore};
use crate::utils::errors::AppError;

pub fn sample_pets() -> Vec<Pet> {
    vec![
        Pet::new("Buddy", "Dog", "Labrador", 2),
        Pet::new("Luna", "Cat", "Siamese", 4),
        Pet::new("Coco", "Rabbit", "Holland Lop", 1),
        Pet::new("Max", "Dog", "German Shepherd", 6),
    ]
}

pub fn sample_owner_contacts() -> Vec<OwnerContact> {
    vec![
        OwnerContact::new("Ana Torres", "555-0101", "ana.torres@example.com", "12 Elm Street, Springfield"),
        OwnerContact::new("Ben Okafor", "555-0102", "ben.okafor@example.com", "48 Oak Avenue, Riverton"),
        OwnerContact::new("Chloe Martin", "555-0103", "chloe.martin@example.com", "7 Birch Lane, Lakeside"),
    ]
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub pets: usize,
    pub owners: usize,
}

async fn create_all<R: Record>(store: &dyn RecordStore, user_id: &str, records: &[R]) -> Result<usize, AppError> {
    for record in records {
        let id = store.create_record(user_id, R::KIND, record.to_fields()).await?;
        log::debug!("Seeded {} record {} for user {}", R::KIND.collection_name(), id, user_id);
    }
    Ok(records.len())
}

/// Copies the fixed sample lists into `user_id`'s records. Stops at the first failure.
pub async fn seed_sample_records(store: &dyn RecordStore, user_id: &str) -> Result<SeedReport, AppError> {
    let report = SeedReport {
        pets: create_all(store, user_id, &sample_pets()).await?,
        owners: create_all(store, user_id, &sample_owner_contacts()).await?,
    };
    log::info!("Seeded {} pets and {} contacts for user {}", report.pets, report.owners, user_id);
    Ok(report)
}

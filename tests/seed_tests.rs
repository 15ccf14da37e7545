mod common;

use common::{ScriptedRecordStore, UID};
use pawfect_care::domain::RecordKind;
use pawfect_care::infrastructure::seed::{sample_owner_contacts, sample_pets, seed_sample_records, SeedReport};
use pawfect_care::utils::errors::AppError;

#[tokio::test]
async fn test_seed_creates_every_sample_for_user() {
    let store = ScriptedRecordStore::new();

    let report = seed_sample_records(&store, UID).await.unwrap();

    assert_eq!(report, SeedReport { pets: sample_pets().len(), owners: sample_owner_contacts().len() });
    assert_eq!(report, SeedReport { pets: 4, owners: 3 });

    let created = store.created.lock().unwrap();
    assert_eq!(created.len(), 7);
    assert!(created.iter().all(|(user_id, _, _)| user_id == UID));
    assert_eq!(created.iter().filter(|(_, kind, _)| *kind == RecordKind::Pets).count(), 4);
    assert_eq!(created.iter().filter(|(_, kind, _)| *kind == RecordKind::Owners).count(), 3);

    let (_, _, first) = &created[0];
    assert_eq!(first.get_str("name").unwrap(), "Buddy");
    assert_eq!(first.get_str("type").unwrap(), "Dog");
}

#[tokio::test]
async fn test_seed_stops_at_first_write_failure() {
    let store = ScriptedRecordStore::failing_creates();

    let result = seed_sample_records(&store, UID).await;

    assert!(matches!(result, Err(AppError::Fetch(ref message)) if message == "write rejected"));
    assert!(store.created.lock().unwrap().is_empty());
}

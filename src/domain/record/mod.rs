pub mod model;
pub mod store;

pub use model::{OwnerContact, Pet, Record, RecordKind, StoredRecord};
pub use store::RecordStore;

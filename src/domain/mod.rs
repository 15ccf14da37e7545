pub mod record;
pub mod session;

pub use record::{OwnerContact, Pet, Record, RecordKind, RecordStore, StoredRecord};
pub use session::{SessionContext, UserIdentity};

pub mod database;
pub mod mongodb;
pub mod seed;

pub use database::mongo_context;
pub use self::mongodb::{record_store, session_context};

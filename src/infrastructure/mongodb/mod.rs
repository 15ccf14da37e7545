pub mod record_store;
pub mod session_context;

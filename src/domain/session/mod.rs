pub mod context;
pub mod model;

pub use context::SessionContext;
pub use model::UserIdentity;

pub mod errors;
pub mod config;
pub mod logging;
pub mod security;

pub use errors::AppError;
pub use config::AppConfig;
pub use security::*;

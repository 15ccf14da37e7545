use async_trait::async_trait;

use crate::domain::session::model::UserIdentity;
use crate::utils::errors::AppError;

/// Identity and credential operations. A successful `sign_in` or `sign_up`
/// makes the returned identity the current user.
#[async_trait]
pub trait SessionContext: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, AppError>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserIdentity, AppError>;
    fn current_user(&self) -> Option<UserIdentity>;
    fn sign_out(&self);
}

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::domain::session::{SessionContext, UserIdentity};
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::security::AuthUtils;
use crate::utils::errors::AppError;

const INVALID_CREDENTIAL: &str = "The supplied auth credential is incorrect, malformed or has expired.";
const EMAIL_IN_USE: &str = "The email address is already in use by another account.";
const BADLY_FORMATTED_EMAIL: &str = "The email address is badly formatted.";
const DUPLICATE_KEY: i32 = 11000;
const WEAK_PASSWORD: &str = "The given password is invalid. [ Password should be at least 6 characters ]";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub email_hash: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Email/password accounts in MongoDB. Holds the current user for this process.
pub struct MongoSessionContext {
    accounts: Collection<Account>,
    secret_key: String,
    token_ttl_minutes: i64,
    current: RwLock<Option<UserIdentity>>,
}

impl MongoSessionContext {
    /// Opens the `accounts` collection, making sure an email can only be registered once.
    pub async fn init(context: &MongoContext, secret_key: &str, token_ttl_minutes: i64) -> Result<Self, AppError> {
        let accounts: Collection<Account> = context.collection("accounts");

        let unique_email = IndexModel::builder()
            .keys(doc! { "email_hash": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        accounts.create_index(unique_email).await.map_err(|e| {
            log::error!("Failed to create accounts email index: {}", e);
            AppError::MongoError(e)
        })?;

        Ok(Self {
            accounts,
            secret_key: secret_key.to_string(),
            token_ttl_minutes,
            current: RwLock::new(None),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        match self.accounts.find_one(doc! { "email_hash": AuthUtils::email_hash(email) }).await {
            Ok(account) => Ok(account),
            Err(e) => Err(AppError::MongoError(e))
        }
    }

    fn establish(&self, uid: String, email: &str) -> Result<UserIdentity, AppError> {
        let token = AuthUtils::generate_access_token(&uid, email, &self.secret_key, self.token_ttl_minutes)?;
        let identity = UserIdentity::new(uid, email).with_access_token(token);

        let mut current = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = Some(identity.clone());
        Ok(identity)
    }
}

fn check_credentials(email: &str, password: &str) -> Result<(), AppError> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace),
        None => false,
    };
    if !well_formed {
        return Err(AppError::Auth(BADLY_FORMATTED_EMAIL.to_string()));
    }
    if password.encode_utf16().count() < 6 {
        return Err(AppError::Auth(WEAK_PASSWORD.to_string()));
    }
    Ok(())
}

fn write_error_code(error: &MongoError) -> Option<i32> {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        _ => None,
    }
}

/// A concurrent sign-up for the same email loses on the unique index.
fn insert_error(error: MongoError) -> AppError {
    if write_error_code(&error) == Some(DUPLICATE_KEY) {
        AppError::Auth(EMAIL_IN_USE.to_string())
    } else {
        AppError::MongoError(error)
    }
}

async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || AuthUtils::hash_password(&password))
        .await
        .map_err(|e| AppError::Auth(e.to_string()))?
        .map_err(|e| AppError::Auth(e.to_string()))
}

async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || AuthUtils::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Auth(e.to_string()))?
        .map_err(|e| AppError::Auth(e.to_string()))
}

#[async_trait]
impl SessionContext for MongoSessionContext {

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, AppError> {
        let email = email.trim();
        let account = self.find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Auth(INVALID_CREDENTIAL.to_string()))?;

        if !verify_password(password, &account.password).await? {
            return Err(AppError::Auth(INVALID_CREDENTIAL.to_string()));
        }

        let uid = account.id
            .map(|oid| oid.to_hex())
            .ok_or_else(|| AppError::InvalidData("account without _id".to_string()))?;

        log::info!("Session opened for account {}", uid);
        self.establish(uid, &account.email)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserIdentity, AppError> {
        let email = email.trim();
        check_credentials(email, password)?;

        if self.find_by_email(email).await?.is_some() {
            return Err(AppError::Auth(EMAIL_IN_USE.to_string()));
        }

        let account = Account {
            id: None,
            email: email.to_string(),
            email_hash: AuthUtils::email_hash(email),
            password: hash_password(password).await?,
            created_at: Utc::now(),
        };

        let result = self.accounts.insert_one(&account).await.map_err(insert_error)?;
        let uid = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => return Err(AppError::InvalidData(format!("unexpected inserted id {}", other))),
        };

        log::info!("Account {} created", uid);
        self.establish(uid, email)
    }

    fn current_user(&self) -> Option<UserIdentity> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn sign_out(&self) {
        let mut current = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(identity) = current.take() {
            log::info!("Session closed for account {}", identity.uid);
        }
    }
}

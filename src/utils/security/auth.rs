use sha2::{Digest, Sha256};
use jsonwebtoken::{encode, EncodingKey, Header};
use chrono::{Utc, Duration};
use bcrypt::{hash as crypt_hash, DEFAULT_COST};

use crate::utils::errors::AppError;
use crate::utils::security::jwt::{Claims, SessionData};

pub struct AuthUtils;

impl AuthUtils {

    /// Hex SHA-256 of the normalised (trimmed, lowercased) email, used as the lookup key.
    pub fn email_hash(email: &str) -> String {
        let normalized = email.trim().to_lowercase();
        let hasher = Sha256::new_with_prefix(normalized.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn hash_password(input: &str) -> Result<String, bcrypt::BcryptError> {
        crypt_hash(input, DEFAULT_COST)
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(password, hash)
    }

    pub fn generate_access_token(
        uid: &str,
        email: &str,
        secret_key: &str,
        ttl_minutes: i64
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::minutes(ttl_minutes))
            .ok_or_else(|| AppError::InvalidData("token expiry out of range".to_string()))?
            .timestamp() as u64;

        let claims = Claims {
            sub: uid.to_owned(),
            exp: expiration,
            iat: now.timestamp() as u64,
            data: SessionData {
                email: email.to_string(),
            },
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret_key.as_ref()),
        ).map_err(|e| AppError::Auth(format!("failed to sign access token: {}", e)))
    }
}

// ---------------------------------------- TESTS ----------------------------------------------

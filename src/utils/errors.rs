use mongodb::{bson, error::Error as MongoError};
use thiserror::Error;
use bson::ser::Error as BsonError;
use bson::de::Error as BsonDeError;

#[derive(Debug, Error, Clone)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    MongoError(#[from] MongoError),

    #[error("Serialization error")]
    SerializationError(#[from] BsonError),

    #[error("Deserialization error")]
    DeserializationError(#[from] BsonDeError)
}

impl AppError {

    /// Text a screen or form may show to the user, if the error carries any.
    pub fn diagnostic(&self) -> Option<String> {
        let message = match self {
            AppError::Validation(message)
            | AppError::Auth(message)
            | AppError::Fetch(message)
            | AppError::InvalidData(message)
            | AppError::Config(message) => message.clone(),
            AppError::MongoError(e) => e.to_string(),
            AppError::SerializationError(_) | AppError::DeserializationError(_) => String::new(),
        };

        let trimmed = message.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// `diagnostic()` or the given fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        self.diagnostic().unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

// ----------------------------- TESTS --------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn create_mock_mongo_error() -> MongoError {
        MongoError::from(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Test mongo error"
        ))
    }

    fn create_mock_bson_error() -> BsonError {
        let mut map = HashMap::new();
        map.insert(42, "value");

        bson::to_bson(&map).unwrap_err()
    }

    fn create_mock_bson_de_error() -> BsonDeError {
        let invalid_bson = bson::Bson::RegularExpression(bson::Regex {
            pattern: "".to_string(),
            options: "".to_string(),
        });

        bson::from_bson::<String>(invalid_bson).unwrap_err()
    }

    #[test]
    fn test_app_error_display() {
        let validation = AppError::Validation("Please fill all fields".to_string());
        assert_eq!(validation.to_string(), "Validation error: Please fill all fields");

        let auth = AppError::Auth("Wrong password".to_string());
        assert_eq!(auth.to_string(), "Authentication error: Wrong password");

        let fetch = AppError::Fetch("Network unreachable".to_string());
        assert_eq!(fetch.to_string(), "Fetch error: Network unreachable");

        let config = AppError::Config("SECRET_KEY missing".to_string());
        assert_eq!(config.to_string(), "Configuration error: SECRET_KEY missing");
    }

    #[test]
    fn test_diagnostic_returns_provider_text() {
        let error = AppError::Fetch("PERMISSION_DENIED".to_string());
        assert_eq!(error.diagnostic().as_deref(), Some("PERMISSION_DENIED"));
    }

    #[test]
    fn test_diagnostic_is_none_for_blank_messages() {
        assert!(AppError::Fetch("".to_string()).diagnostic().is_none());
        assert!(AppError::Auth("   ".to_string()).diagnostic().is_none());
        assert!(AppError::SerializationError(create_mock_bson_error()).diagnostic().is_none());
        assert!(AppError::DeserializationError(create_mock_bson_de_error()).diagnostic().is_none());
    }

    #[test]
    fn test_message_or_uses_fallback() {
        let blank = AppError::Fetch(String::new());
        assert_eq!(blank.message_or("Failed to load pets"), "Failed to load pets");

        let filled = AppError::Fetch("offline".to_string());
        assert_eq!(filled.message_or("Failed to load pets"), "offline");
    }

    #[test]
    fn test_mongo_error_diagnostic_mentions_source() {
        let error = AppError::from(create_mock_mongo_error());
        let message = error.diagnostic().unwrap();
        assert!(message.contains("Test mongo error"));
    }

    #[test]
    fn test_from_bson_errors() {
        match AppError::from(create_mock_bson_error()) {
            AppError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError variant"),
        }

        match AppError::from(create_mock_bson_de_error()) {
            AppError::DeserializationError(_) => {}
            _ => panic!("Expected DeserializationError variant"),
        }
    }

    #[test]
    fn test_is_validation() {
        assert!(AppError::Validation("x".to_string()).is_validation());
        assert!(!AppError::Auth("x".to_string()).is_validation());
    }

    #[test]
    fn test_app_error_clone() {
        let first = AppError::Auth("Provider message".to_string());
        let cloned = first.clone();

        assert_eq!(first.to_string(), cloned.to_string());
    }
}

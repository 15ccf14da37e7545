use serde::{Deserialize, Serialize};
use mongodb::{options::ClientOptions, Client, Collection, Database};
use regex::Regex;

use crate::utils::errors::AppError;

#[derive(Clone, Debug)]
pub struct MongoContext {
    db: Database
}

impl MongoContext {

    pub async fn init(uri: &str, db_name: &str) -> Result<MongoContext, AppError> {
        Self::validate_mongo_uri(uri)?;
        log::info!("Connecting to MongoDB database {}", db_name);

        let mut client_options = ClientOptions::parse(uri)
            .await?;

        client_options.app_name = Some("PawfectCare".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| {
                log::error!("Failed to create MongoDB client: {}", e);
                AppError::Config(format!("Failed to create MongoDB client: {}", e))
            })?;

        client.list_database_names()
            .await
            .map_err(|e| {
                log::error!("Failed to connect to MongoDB: {}", e);
                AppError::Config(format!("Failed to connect to MongoDB: {}", e))
            })?;

        let db = client.database(db_name);
        log::info!("Connected to MongoDB database {}", db_name);

        Ok(MongoContext { db })
    }

    pub fn get_db(&self) -> &Database {
        &self.db
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync + for<'de> Deserialize<'de> + Serialize,
    {
        self.db.collection::<T>(name)
    }

    fn validate_mongo_uri(uri: &str) -> Result<(), AppError> {
        let trimmed_uri = uri.trim();
        if trimmed_uri.is_empty() {
            return Err(AppError::Config("Invalid MongoDB URI: cannot be empty or whitespace".to_string()));
        }

        let host_part = match trimmed_uri
            .strip_prefix("mongodb://")
            .or_else(|| trimmed_uri.strip_prefix("mongodb+srv://"))
        {
            Some(host_part) => host_part,
            None => return Err(AppError::Config(format!(
                "Invalid MongoDB URI: must start with 'mongodb://' or 'mongodb+srv://'. Got: {}", uri
            ))),
        };

        if host_part.trim().is_empty() {
            return Err(AppError::Config("Invalid MongoDB URI: missing host after protocol".to_string()));
        }

        if uri.contains(char::is_whitespace) {
            return Err(AppError::Config("Invalid MongoDB URI: cannot contain whitespace".to_string()));
        }

        let re = Regex::new(r"^mongodb(\+srv)?://([^/\s]+)(/.*)?$")
            .map_err(|e| AppError::Config(e.to_string()))?;
        if !re.is_match(trimmed_uri) {
            return Err(AppError::Config(format!(
                "Invalid MongoDB URI format. Expected format: mongodb://host[:port][/database] or mongodb+srv://host[/database]. Got: {}", uri
            )));
        }

        Ok(())
    }

}

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Shared secret for the bulk tariff import endpoint. When unset the
    /// endpoint refuses every request.
    pub admin_import_token: Option<String>,
    /// CSV file applied to the vault at startup, if configured.
    pub tariff_seed_file: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        // An empty token would be matched by an empty header; treat it as unset.
        let admin_import_token = env_map
            .get("ADMIN_IMPORT_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let tariff_seed_file = env_map
            .get("TARIFF_SEED_FILE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Config {
            port,
            database_path,
            admin_import_token,
            tariff_seed_file,
        })
    }
}

use crate::domain::SchemaVariant;
use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    pub schema: SchemaVariant,
    pub max_connections: u32,
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
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let schema = match env_map
            .get("EARTHQUAKE_SCHEMA")
            .map(|s| s.as_str())
            .unwrap_or("extended")
        {
            "minimal" => SchemaVariant::Minimal,
            "extended" => SchemaVariant::Extended,
            other => {
                return Err(ConfigError::InvalidValue(
                    "EARTHQUAKE_SCHEMA".to_string(),
                    format!("must be minimal or extended, got {}", other),
                ))
            }
        };

        let max_connections = env_map
            .get("DB_MAX_CONNECTIONS")
            .map(|s| s.as_str())
            .unwrap_or("5")
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "DB_MAX_CONNECTIONS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        Ok(Config {
            host,
            port,
            database_path,
            schema,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_PATH".to_string(), "/tmp/quakes.db".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_path, "/tmp/quakes.db");
        assert_eq!(config.schema, SchemaVariant::Extended);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_missing_database_path() {
        let mut env_map = setup_required_env();
        env_map.remove("DATABASE_PATH");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_blank_database_path() {
        let mut env_map = setup_required_env();
        env_map.insert("DATABASE_PATH".to_string(), "  ".to_string());
        assert!(matches!(
            Config::from_env_map(env_map),
            Err(ConfigError::MissingEnv(_))
        ));
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_host() {
        let mut env_map = setup_required_env();
        env_map.insert("HOST".to_string(), "localhost:80".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "HOST"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_minimal_schema() {
        let mut env_map = setup_required_env();
        env_map.insert("EARTHQUAKE_SCHEMA".to_string(), "minimal".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.schema, SchemaVariant::Minimal);
    }

    #[test]
    fn test_invalid_schema() {
        let mut env_map = setup_required_env();
        env_map.insert("EARTHQUAKE_SCHEMA".to_string(), "point".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "EARTHQUAKE_SCHEMA"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_zero_max_connections() {
        let mut env_map = setup_required_env();
        env_map.insert("DB_MAX_CONNECTIONS".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DB_MAX_CONNECTIONS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}

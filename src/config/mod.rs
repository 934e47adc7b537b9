use crate::error::{AppError, Result};
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

/// Key/value configuration store, seeded from the process environment.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot of the current environment. Call `dotenvy::dotenv()` first
    /// if `.env` values should be visible.
    pub fn new() -> Self {
        Self::from_pairs(env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let service = Self::default();
        for (key, value) in pairs {
            service.config.insert(key.into(), value.into());
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse `key` into `T`, falling back to `default` when unset.
    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|e| AppError::Config {
                key: key.to_string(),
                message: format!("{:?}: {}", raw, e),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Create the `users` table on startup when it is missing.
    pub sync_schema: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            sync_schema: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://users.db?mode=rwc";

    pub fn load(config: &ConfigService) -> Result<Self> {
        let database = DatabaseConfig {
            url: config.get_or("DATABASE_URL", Self::DEFAULT_DATABASE_URL),
            max_connections: config.parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            sync_schema: config.parse_or("DATABASE_SYNC_SCHEMA", true)?,
        };

        Ok(Self {
            host: config.get_or("HOST", "0.0.0.0"),
            port: config.parse_or("PORT", 3000)?,
            database,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

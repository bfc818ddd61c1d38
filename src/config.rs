// src/config.rs
use std::{env, path::PathBuf};
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local tables; nothing survives a restart.
    Memory,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    allowed_origins: Vec<String>,
    storage_backend: StorageBackend,
    theme_path: Option<PathBuf>,
    database_max_connections: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

impl AppConfig {
    /// Build configuration from environment variables, loading `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_backend = match lookup("STORAGE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid(format!(
                    "STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        let database_url = match (lookup("DATABASE_URL"), storage_backend) {
            (Some(url), _) => url,
            (None, StorageBackend::Memory) => String::new(),
            (None, StorageBackend::Postgres) => return Err(ConfigError::Missing("DATABASE_URL")),
        };

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        let theme_path = lookup("THEME_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer".into(),
                    )
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            listen_addr,
            allowed_origins,
            storage_backend,
            theme_path,
            database_max_connections,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    /// Theme file to load instead of the bundled one.
    pub fn theme_path(&self) -> Option<&std::path::Path> {
        self.theme_path.as_deref()
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "memory"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("THEME_PATH", "/etc/dispatch/theme.json"),
        ]))
        .unwrap();
        assert_eq!(config.storage_backend(), StorageBackend::Memory);
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(
            config.allowed_origins(),
            ["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(
            config.theme_path(),
            Some(std::path::Path::new("/etc/dispatch/theme.json"))
        );
        assert_eq!(config.database_max_connections(), DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn rejects_unknown_backend_and_bad_pool_size() {
        assert!(AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "redis")])).is_err());
        assert!(
            AppConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://localhost/cms"),
                ("DATABASE_MAX_CONNECTIONS", "0"),
            ]))
            .is_err()
        );
    }
}

use std::{net::SocketAddr, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_PATH: &str = "./config/usuarios.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid HTTP_WORKERS {0:?}: expected an integer >= 1")]
    Workers(String),

    #[error("invalid DATABASE_CREATE {0:?}: expected true or false")]
    CreateFlag(String),
}

/// Where the `Usuarios` table lives. Handlers open a fresh connection from
/// this for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub create_if_missing: bool,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatabaseConfig {
            path: path.into(),
            create_if_missing: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub workers: usize,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                value: bind.clone(),
                source,
            })?;

        let workers = match lookup("HTTP_WORKERS") {
            None => 1,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(ConfigError::Workers(raw)),
            },
        };

        let path = lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_owned());
        let create_if_missing = match lookup("DATABASE_CREATE") {
            None => true,
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::CreateFlag(raw))?,
        };

        Ok(AppConfig {
            bind_addr,
            workers,
            database: DatabaseConfig {
                path: PathBuf::from(path),
                create_if_missing,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.workers, 1);
        assert_eq!(config.database, DatabaseConfig::new(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("HTTP_WORKERS", "4"),
            ("DATABASE_PATH", "/tmp/tesis.db"),
            ("DATABASE_CREATE", "no"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.workers, 4);
        assert_eq!(config.database.path, PathBuf::from("/tmp/tesis.db"));
        assert!(!config.database.create_if_missing);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::BindAddr { .. })
        ));
        assert!(matches!(
            config_from(&[("HTTP_WORKERS", "0")]),
            Err(ConfigError::Workers(_))
        ));
        assert!(matches!(
            config_from(&[("HTTP_WORKERS", "many")]),
            Err(ConfigError::Workers(_))
        ));
        assert!(matches!(
            config_from(&[("DATABASE_CREATE", "maybe")]),
            Err(ConfigError::CreateFlag(_))
        ));
    }
}

// src/config.rs
use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("cannot resolve working directory: {0}")]
    WorkingDir(#[from] std::io::Error),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Directory uploaded images are written to and served from.
    pub upload_root: PathBuf,
    /// Loads templates from disk instead of the bundled copies when set.
    pub template_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let host = parse_or("HOST", lookup("HOST"), || DEFAULT_HOST.parse().ok())?;
        let port = parse_or("PORT", lookup("PORT"), || Some(DEFAULT_PORT))?;
        let max_upload_bytes = parse_or("MAX_UPLOAD_BYTES", lookup("MAX_UPLOAD_BYTES"), || {
            Some(DEFAULT_MAX_UPLOAD_BYTES)
        })?;

        let upload_root = match lookup("UPLOAD_ROOT").filter(|dir| !dir.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?.join("uploads"),
        };

        Ok(Self {
            database_url,
            host,
            port,
            upload_root,
            template_dir: lookup("TEMPLATE_DIR").filter(|dir| !dir.is_empty()).map(PathBuf::from),
            max_upload_bytes,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: impl FnOnce() -> Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => default().ok_or(ConfigError::Missing(key)),
    }
}
